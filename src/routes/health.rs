// ABOUTME: Health and readiness route handlers for service monitoring
// ABOUTME: Readiness verifies the database pool can execute a query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Health check routes
//!
//! `/health` reports process liveness; `/ready` additionally pings the
//! database so load balancers stop routing to an instance that lost its
//! storage.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::error;

use crate::resources::ServerResources;

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    /// Handle GET /health
    async fn handle_health() -> Response {
        let body = serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        (StatusCode::OK, Json(body)).into_response()
    }

    /// Handle GET /ready
    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        match resources.database.ping().await {
            Ok(()) => {
                let body = serde_json::json!({
                    "status": "ready",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                });
                (StatusCode::OK, Json(body)).into_response()
            }
            Err(e) => {
                error!("readiness check failed: {e}");
                let body = serde_json::json!({
                    "status": "not_ready",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                });
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
        }
    }
}
