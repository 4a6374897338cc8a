// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, config, scripted provider and resource helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind
#![allow(dead_code)]

//! Shared test utilities for `mealmind`
//!
//! Common setup for integration tests: an in-memory database, a throwaway
//! server configuration, and a scripted chat provider standing in for the
//! external generation service.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Once};
use std::time::Duration;

use mealmind::{
    auth::hash_password,
    config::{Environment, GenerationConfig, LogLevel, NotificationConfig, ServerConfig},
    database::Database,
    errors::AppError,
    llm::{ChatProvider, ChatRequest, ChatResponse},
    models::User,
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// A syntactically valid four-slot generation payload
pub const SAMPLE_DAY_JSON: &str = r#"{
  "breakfast": {"name": "Oatmeal with Berries", "ingredients": "oats, milk, blueberries", "calories": 420, "macros": "Carbs: 60g, Protein: 14g, Fat: 10g"},
  "lunch": {"name": "Chickpea Salad", "ingredients": "chickpeas, cucumber, tomato, olive oil", "calories": 650, "macros": "Carbs: 70g, Protein: 22g, Fat: 24g"},
  "snacks": {"name": "Apple and Almonds", "ingredients": "apple, almonds", "calories": 280, "macros": "Carbs: 30g, Protein: 7g, Fat: 14g"},
  "dinner": {"name": "Vegetable Stir Fry", "ingredients": "tofu, broccoli, rice, soy sauce", "calories": 700, "macros": "Carbs: 80g, Protein: 30g, Fat: 20g"}
}"#;

/// What the scripted provider should do when asked to complete
#[derive(Clone)]
pub enum ProviderScript {
    /// Return this content
    Respond(String),
    /// Fail with a service error
    Fail(String),
    /// Sleep this long before responding (for deadline tests)
    Delay(Duration, String),
}

/// Scripted stand-in for the external generation service
pub struct ScriptedProvider {
    script: ProviderScript,
}

impl ScriptedProvider {
    pub fn new(script: ProviderScript) -> Self {
        Self { script }
    }

    /// Provider that always returns [`SAMPLE_DAY_JSON`]
    pub fn sample() -> Arc<Self> {
        Arc::new(Self::new(ProviderScript::Respond(SAMPLE_DAY_JSON.into())))
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let content = match &self.script {
            ProviderScript::Respond(content) => content.clone(),
            ProviderScript::Fail(message) => {
                return Err(AppError::external_service("scripted", message.clone()))
            }
            ProviderScript::Delay(delay, content) => {
                tokio::time::sleep(*delay).await;
                content.clone()
            }
        };

        Ok(ChatResponse {
            content,
            model: request
                .model
                .clone()
                .unwrap_or_else(|| "scripted-model".into()),
            usage: None,
        })
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Throwaway configuration for tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-jwt-secret".into(),
        jwt_expiry_hours: 24,
        trial_days: 14,
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        generation: GenerationConfig {
            api_key: None,
            base_url: "http://localhost:1".into(),
            model: "scripted-model".into(),
            temperature: 0.7,
            timeout_secs: 5,
        },
        notifications: NotificationConfig {
            relay_url: None,
            sender: None,
        },
    }
}

/// Full resource setup over an in-memory database and a scripted provider
pub async fn create_test_resources(provider: Arc<dyn ChatProvider>) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        provider,
        Arc::new(test_config()),
    )))
}

/// Create and store a password user, returning it
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let hash = hash_password("correct horse battery staple")?;
    let user = User::new(email.to_string(), hash);
    database.create_user(&user).await?;
    Ok(user)
}
