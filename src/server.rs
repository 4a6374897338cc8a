// ABOUTME: HTTP server assembly binding all route modules into one axum app
// ABOUTME: Owns the listener lifecycle and the CORS and tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Server composition and lifecycle
//!
//! [`MealmindServer`] merges every domain router over the shared
//! [`ServerResources`], applies CORS and request tracing, and serves the
//! result on the configured port.

use anyhow::{Context, Result};
use axum::Router;
use http::{header::HeaderName, HeaderValue, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, HealthRoutes, NotificationRoutes, PlanRoutes, SubscriptionRoutes, TokenRoutes,
    TrackerRoutes, TrialRoutes,
};

/// The Mealmind HTTP server
pub struct MealmindServer {
    resources: Arc<ServerResources>,
}

impl MealmindServer {
    /// Create a server over already-assembled shared resources
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router with middleware layers applied
    pub fn router(&self) -> Router {
        Self::base_router(&self.resources)
            .layer(setup_cors())
            .layer(TraceLayer::new_for_http())
    }

    /// Merge all domain routers without middleware (tests exercise this directly)
    pub fn base_router(resources: &Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(PlanRoutes::routes(resources.clone()))
            .merge(TrackerRoutes::routes(resources.clone()))
            .merge(TrialRoutes::routes(resources.clone()))
            .merge(SubscriptionRoutes::routes(resources.clone()))
            .merge(TokenRoutes::routes(resources.clone()))
            .merge(NotificationRoutes::routes(resources.clone()))
    }

    /// Bind the port and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server loop fails
    pub async fn run(self, port: u16) -> Result<()> {
        let app = self.router();

        let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;

        info!("Mealmind HTTP server listening on port {}", port);

        axum::serve(listener, app)
            .await
            .context("HTTP server terminated unexpectedly")?;

        Ok(())
    }
}

/// Configure CORS from the `CORS_ALLOWED_ORIGINS` environment variable
///
/// Empty or "*" allows any origin (development); otherwise a comma-separated
/// origin list is enforced.
fn setup_cors() -> CorsLayer {
    let allowed = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let allow_origin = if allowed.is_empty() || allowed == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
}
