// ABOUTME: Best-effort notification sender with background delivery
// ABOUTME: Posts to a configured HTTP relay or logs when unconfigured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Notifications
//!
//! Delivery is best effort and never blocks the request: handlers enqueue a
//! background task and return immediately. With no relay configured the
//! message is logged and dropped; a delivery failure is logged, not
//! surfaced.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::NotificationConfig;

/// Email notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailNotification {
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// WhatsApp notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppNotification {
    pub phone_number: String,
    pub message: String,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    to: &'a str,
    subject: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
}

/// Best-effort notification sender
#[derive(Clone)]
pub struct Notifier {
    config: NotificationConfig,
    client: Client,
}

impl Notifier {
    /// Create a notifier with the given relay configuration
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Queue an email for background delivery and return immediately
    pub fn send_email(&self, notification: EmailNotification) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.deliver_email(&notification).await;
        });
    }

    /// Log a WhatsApp message; no real transport is wired up
    pub fn send_whatsapp(&self, notification: &WhatsAppNotification) {
        info!(
            phone = %notification.phone_number,
            "whatsapp notification (mock): {}",
            notification.message
        );
    }

    async fn deliver_email(&self, notification: &EmailNotification) {
        let Some(relay_url) = &self.config.relay_url else {
            info!(
                to = %notification.email,
                subject = %notification.subject,
                "no notification relay configured; email logged only"
            );
            return;
        };

        let payload = RelayPayload {
            to: &notification.email,
            subject: &notification.subject,
            message: &notification.message,
            sender: self.config.sender.as_deref(),
        };

        match self.client.post(relay_url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!(to = %notification.email, "email handed to relay");
            }
            Ok(response) => {
                error!(
                    to = %notification.email,
                    status = %response.status(),
                    "notification relay rejected email"
                );
            }
            Err(e) => {
                error!(to = %notification.email, "failed to reach notification relay: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_relay_is_silent() {
        let notifier = Notifier::new(NotificationConfig {
            relay_url: None,
            sender: None,
        });
        // Logs and drops; must not panic or block
        notifier
            .deliver_email(&EmailNotification {
                email: "a@example.com".into(),
                subject: "hi".into(),
                message: "body".into(),
            })
            .await;
    }

    #[test]
    fn test_relay_payload_omits_missing_sender() {
        let payload = RelayPayload {
            to: "a@example.com",
            subject: "s",
            message: "m",
            sender: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("sender"));
    }
}
