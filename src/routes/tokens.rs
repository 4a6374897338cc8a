// ABOUTME: Reward token routes acknowledging plan-completion milestones
// ABOUTME: Informational acknowledgements; no token balance is stored yet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Reward token routes
//!
//! TODO: persist an earned-token balance per user once the rewards model is
//! settled; today these endpoints only acknowledge the event.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Request naming the rewarded user
#[derive(Debug, Deserialize)]
pub struct AwardTokenRequest {
    pub user_id: Uuid,
}

/// Query parameters for sharing
#[derive(Debug, Deserialize)]
pub struct ShareTokenQuery {
    pub user_id: Uuid,
}

/// Acknowledgement message
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
}

/// Token routes handler
pub struct TokenRoutes;

impl TokenRoutes {
    /// Create all token routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tokens/award", post(Self::handle_award))
            .route("/tokens/share", get(Self::handle_share))
            .with_state(resources)
    }

    /// Handle POST /tokens/award
    async fn handle_award(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AwardTokenRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .get_user(request.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?;

        if user.is_none() {
            return Err(AppError::not_found("User").with_user_id(request.user_id));
        }

        let response = TokenResponse {
            message: "Token awarded for completion".into(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /tokens/share?user_id=
    async fn handle_share(
        State(_resources): State<Arc<ServerResources>>,
        Query(query): Query<ShareTokenQuery>,
    ) -> Result<Response, AppError> {
        let response = serde_json::json!({
            "message": "Token shared to social",
            "user": query.user_id,
        });
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
