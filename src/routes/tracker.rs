// ABOUTME: Tracker route handlers toggling a day's cheat flag
// ABOUTME: Idempotent set operations with structured not-found responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Tracker routes
//!
//! `complete` clears and `cheat` sets a day's deviation flag. Both are
//! idempotent sets, not flips; concurrent calls are last-writer-wins.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Request naming one day of one plan
#[derive(Debug, Deserialize)]
pub struct TrackDayRequest {
    pub plan_id: Uuid,
    pub day: i32,
}

/// Acknowledgement message
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackDayResponse {
    pub message: String,
}

/// Tracker routes handler
pub struct TrackerRoutes;

impl TrackerRoutes {
    /// Create all tracker routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tracker/complete", post(Self::handle_complete))
            .route("/tracker/cheat", post(Self::handle_cheat))
            .with_state(resources)
    }

    /// Handle POST /tracker/complete - clear the cheat flag
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<TrackDayRequest>,
    ) -> Result<Response, AppError> {
        Self::set_flag(&resources, &request, false).await?;
        Ok((
            StatusCode::OK,
            Json(TrackDayResponse {
                message: "Meal marked as complete".into(),
            }),
        )
            .into_response())
    }

    /// Handle POST /tracker/cheat - set the cheat flag
    async fn handle_cheat(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<TrackDayRequest>,
    ) -> Result<Response, AppError> {
        Self::set_flag(&resources, &request, true).await?;
        Ok((
            StatusCode::OK,
            Json(TrackDayResponse {
                message: "Cheat day marked".into(),
            }),
        )
            .into_response())
    }

    async fn set_flag(
        resources: &Arc<ServerResources>,
        request: &TrackDayRequest,
        cheat: bool,
    ) -> Result<(), AppError> {
        let updated = resources
            .database
            .set_cheat_day(request.plan_id, request.day, cheat)
            .await
            .map_err(|e| AppError::database(format!("Failed to update day: {e}")))?;

        if updated {
            Ok(())
        } else {
            Err(AppError::not_found("Meal")
                .with_resource_id(format!("{}/day/{}", request.plan_id, request.day)))
        }
    }
}
