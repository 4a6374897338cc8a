// ABOUTME: Subscription upgrade route flipping the subscription flag
// ABOUTME: Unknown users get a structured not-found response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Subscription routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Request to upgrade an account
#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    pub user_id: Uuid,
    /// Marketing name of the purchased tier, echoed back in the message
    pub plan: String,
}

/// Acknowledgement message
#[derive(Debug, Serialize, Deserialize)]
pub struct UpgradeResponse {
    pub message: String,
}

/// Subscription routes handler
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create all subscription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/subscription/upgrade", post(Self::handle_upgrade))
            .with_state(resources)
    }

    /// Handle POST /subscription/upgrade
    async fn handle_upgrade(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpgradeRequest>,
    ) -> Result<Response, AppError> {
        let updated = resources
            .database
            .set_subscribed(request.user_id, true)
            .await
            .map_err(|e| AppError::database(format!("Failed to update subscription: {e}")))?;

        if !updated {
            return Err(AppError::not_found("User").with_user_id(request.user_id));
        }

        info!(user_id = %request.user_id, plan = %request.plan, "subscription upgraded");

        let response = UpgradeResponse {
            message: format!("User upgraded to {} plan", request.plan),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
