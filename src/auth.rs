// ABOUTME: JWT-based session token issuing and validation plus password hashing
// ABOUTME: HS256 tokens carrying the user id and email with a fixed expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Authentication
//!
//! Session tokens are HS256 JWTs signed with the configured secret.
//! Passwords are bcrypt-hashed; verification runs on the blocking pool so it
//! never stalls the async executor.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::User;

/// JWT claims for user sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct AuthManager {
    secret: String,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager with the given signing secret and token lifetime
    #[must_use]
    pub fn new(secret: String, expiry_hours: i64) -> Self {
        Self {
            secret,
            expiry_hours,
        }
    }

    /// Issue a session token for the user
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    /// Returns `AuthExpired` for expired tokens and `AuthInvalid` for any
    /// other validation failure.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::new(crate::errors::ErrorCode::AuthExpired, "Token has expired")
            }
            _ => AppError::auth_invalid(format!("Invalid token: {e}")),
        })
    }

    /// User id carried by a valid token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or carries a malformed id.
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid, AppError> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))
    }
}

/// Hash a password with bcrypt at the default cost
///
/// # Errors
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against its hash on the blocking pool
///
/// # Errors
/// Returns an error if the verification task fails.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

/// Extract the token from a `Bearer` authorization header value
///
/// # Errors
/// Returns an error for non-Bearer schemes or empty tokens.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::auth_required)?
        .trim();
    if token.is_empty() {
        return Err(AppError::auth_required());
    }
    Ok(token)
}
