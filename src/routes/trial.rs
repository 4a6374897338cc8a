// ABOUTME: Trial status route reporting days left and plan count
// ABOUTME: Trial window is configurable and clamps at zero days remaining
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Trial status routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Query parameters for the status endpoint
#[derive(Debug, Deserialize)]
pub struct TrialStatusQuery {
    pub user_id: Uuid,
}

/// Trial status for one account
#[derive(Debug, Serialize, Deserialize)]
pub struct TrialStatusResponse {
    pub trial_days_left: i64,
    pub plans_created: i64,
    pub is_subscribed: bool,
}

/// Trial routes handler
pub struct TrialRoutes;

impl TrialRoutes {
    /// Create all trial routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/trial/status", get(Self::handle_status))
            .with_state(resources)
    }

    /// Handle GET /trial/status?user_id=
    async fn handle_status(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<TrialStatusQuery>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .get_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?
            .ok_or_else(|| AppError::not_found("User").with_user_id(query.user_id))?;

        let plans_created = resources
            .database
            .count_plans_for_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to count plans: {e}")))?;

        let response = TrialStatusResponse {
            trial_days_left: user.trial_days_left(Utc::now(), resources.config.trial_days),
            plans_created,
            is_subscribed: user.is_subscribed,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
