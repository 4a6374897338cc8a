// ABOUTME: Notification dispatch routes for email and WhatsApp messages
// ABOUTME: Handlers enqueue background delivery and return immediately
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Notification routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::notifications::{EmailNotification, WhatsAppNotification};
use crate::resources::ServerResources;

/// Acknowledgement message
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub message: String,
}

/// Notification routes handler
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/notifications/email", post(Self::handle_email))
            .route("/notifications/whatsapp", post(Self::handle_whatsapp))
            .with_state(resources)
    }

    /// Handle POST /notifications/email - queue and return
    async fn handle_email(
        State(resources): State<Arc<ServerResources>>,
        Json(notification): Json<EmailNotification>,
    ) -> Result<Response, AppError> {
        if !notification.email.contains('@') {
            return Err(AppError::invalid_input("recipient email is not valid"));
        }

        resources.notifier.send_email(notification);

        let response = NotificationResponse {
            message: "Email is being sent".into(),
        };
        Ok((StatusCode::ACCEPTED, Json(response)).into_response())
    }

    /// Handle POST /notifications/whatsapp
    async fn handle_whatsapp(
        State(resources): State<Arc<ServerResources>>,
        Json(notification): Json<WhatsAppNotification>,
    ) -> Result<Response, AppError> {
        resources.notifier.send_whatsapp(&notification);

        let response = NotificationResponse {
            message: "WhatsApp message queued".into(),
        };
        Ok((StatusCode::ACCEPTED, Json(response)).into_response())
    }
}
