// ABOUTME: User account model with trial and subscription state
// ABOUTME: Supports password credentials and Google-linked accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
///
/// Accounts created through Google OAuth have no password credential;
/// password accounts have no `google_id` until the user links one. The
/// trial clock starts at account creation and never resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Bcrypt password hash; absent for OAuth-created accounts
    pub password_hash: Option<String>,
    /// Google subject id when the account is linked to Google
    pub google_id: Option<String>,
    /// When the free trial started
    pub trial_start: DateTime<Utc>,
    /// Whether the account holds an active subscription
    pub is_subscribed: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a password credential
    #[must_use]
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: Some(password_hash),
            google_id: None,
            trial_start: now,
            is_subscribed: false,
            created_at: now,
        }
    }

    /// Create a new user from a verified Google identity
    #[must_use]
    pub fn from_google(email: String, google_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash: None,
            google_id: Some(google_id),
            trial_start: now,
            is_subscribed: false,
            created_at: now,
        }
    }

    /// Whole trial days remaining at `now`, clamped at zero
    #[must_use]
    pub fn trial_days_left(&self, now: DateTime<Utc>, trial_days: i64) -> i64 {
        let elapsed = now.signed_duration_since(self.trial_start).num_days();
        (trial_days - elapsed).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_trial_days_left_counts_down() {
        let mut user = User::new("a@example.com".into(), "hash".into());
        user.trial_start = Utc::now() - Duration::days(3);
        assert_eq!(user.trial_days_left(Utc::now(), 7), 4);
    }

    #[test]
    fn test_trial_days_left_clamps_at_zero() {
        let mut user = User::new("a@example.com".into(), "hash".into());
        user.trial_start = Utc::now() - Duration::days(30);
        assert_eq!(user.trial_days_left(Utc::now(), 7), 0);
    }

    #[test]
    fn test_google_user_has_no_password() {
        let user = User::from_google("g@example.com".into(), "sub-123".into());
        assert!(user.password_hash.is_none());
        assert_eq!(user.google_id.as_deref(), Some("sub-123"));
        assert!(!user.is_subscribed);
    }
}
