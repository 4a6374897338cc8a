// ABOUTME: Authentication route handlers for signup, login and Google OAuth
// ABOUTME: Thin wrappers delegating to an AuthService over the shared resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Authentication routes
//!
//! Password accounts are created through signup/login with bcrypt-hashed
//! credentials. `google-oauth` exchanges a verified Google ID token for a
//! session, creating or linking the account as needed. Token verification
//! against Google is an opaque external call.

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

use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;

/// Google's ID-token introspection endpoint
const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 8;

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google OAuth exchange request carrying the ID token
#[derive(Debug, Deserialize)]
pub struct GoogleOauthRequest {
    pub credential: String,
}

/// User info embedded in session responses
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
}

/// Session response with a bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    email: Option<String>,
    sub: Option<String>,
}

/// Authentication service for business logic
#[derive(Clone)]
struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Handle signup: validate, hash, create the account
    async fn signup(&self, request: SignupRequest) -> Result<SessionResponse, AppError> {
        info!("signup attempt for {}", request.email);

        if !is_valid_email(&request.email) {
            return Err(AppError::invalid_input("email address is not valid"));
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid_input(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(format!("Failed to check email: {e}")))?
            .is_some()
        {
            return Err(AppError::already_exists("Account"));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(request.email, password_hash);

        self.resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        info!(user_id = %user.id, "user registered");

        self.session_for(&user)
    }

    /// Handle login: verify password, issue a session token
    async fn login(&self, request: LoginRequest) -> Result<SessionResponse, AppError> {
        info!("login attempt for {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        let Some(hash) = &user.password_hash else {
            // OAuth-created account with no password credential
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        if !verify_password(&request.password, hash).await? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        self.session_for(&user)
    }

    /// Handle the Google OAuth exchange: verify, create-or-link, issue token
    async fn google_oauth(&self, request: GoogleOauthRequest) -> Result<SessionResponse, AppError> {
        let token_info = self.verify_google_token(&request.credential).await?;

        let email = token_info
            .email
            .ok_or_else(|| AppError::auth_invalid("Email not present in Google account"))?;
        let google_id = token_info
            .sub
            .ok_or_else(|| AppError::auth_invalid("Subject not present in Google token"))?;

        let user = match self
            .resources
            .database
            .get_user_by_email(&email)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?
        {
            Some(mut existing) => {
                if existing.google_id.is_none() {
                    self.resources
                        .database
                        .set_google_id(existing.id, &google_id)
                        .await
                        .map_err(|e| {
                            AppError::database(format!("Failed to link Google account: {e}"))
                        })?;
                    existing.google_id = Some(google_id);
                }
                existing
            }
            None => {
                let user = User::from_google(email, google_id);
                self.resources
                    .database
                    .create_user(&user)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;
                info!(user_id = %user.id, "user created from Google identity");
                user
            }
        };

        self.session_for(&user)
    }

    /// Verify a Google ID token through the tokeninfo endpoint
    async fn verify_google_token(&self, credential: &str) -> Result<GoogleTokenInfo, AppError> {
        let response = self
            .resources
            .http_client
            .get(GOOGLE_TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("google", format!("Failed to verify token: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::auth_invalid("Invalid Google token"));
        }

        response
            .json::<GoogleTokenInfo>()
            .await
            .map_err(|e| AppError::external_service("google", format!("Bad tokeninfo body: {e}")))
    }

    fn session_for(&self, user: &User) -> Result<SessionResponse, AppError> {
        let access_token = self.resources.auth_manager.generate_token(user)?;
        Ok(SessionResponse {
            access_token,
            token_type: "bearer".into(),
            user: UserInfo {
                id: user.id,
                email: user.email.clone(),
            },
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/signup", post(Self::handle_signup))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/google-oauth", post(Self::handle_google_oauth))
            .with_state(resources)
    }

    /// Handle POST /auth/signup
    async fn handle_signup(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SignupRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService { resources };
        let response = service.signup(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService { resources };
        let response = service.login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/google-oauth
    async fn handle_google_oauth(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<GoogleOauthRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService { resources };
        let response = service.google_oauth(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
