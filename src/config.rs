// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into an explicit ServerConfig injected at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Environment-based configuration management
//!
//! All runtime settings live in one explicitly constructed [`ServerConfig`]
//! value built once in the binary and injected into every component. No
//! component reads ambient process state after startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for logging format selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Settings for the external meal generation service
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API key for the chat completion provider
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model name to request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Hard deadline for one generation call, in seconds
    pub timeout_secs: u64,
}

/// Settings for the best-effort notification sender
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// HTTP relay endpoint; when unset, notifications are logged only
    pub relay_url: Option<String>,
    /// Sender address reported to the relay
    pub sender: Option<String>,
}

/// Server configuration assembled from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP API
    pub http_port: u16,
    /// Database connection string
    pub database_url: String,
    /// Secret used to sign session JWTs
    pub jwt_secret: String,
    /// JWT lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Trial length granted to new accounts, in days
    pub trial_days: i64,
    /// Deployment environment
    pub environment: Environment,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Meal generation settings
    pub generation: GenerationConfig,
    /// Notification settings
    pub notifications: NotificationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a present variable fails to parse, or if
    /// `MEALMIND_JWT_SECRET` is missing in production.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("MEALMIND_ENV").unwrap_or_default(),
        );

        let jwt_secret = match env::var("MEALMIND_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_production() => {
                anyhow::bail!("MEALMIND_JWT_SECRET must be set in production")
            }
            // Development fallback keeps local setup friction-free
            Err(_) => "mealmind-dev-secret".into(),
        };

        Ok(Self {
            http_port: parse_env_or("MEALMIND_HTTP_PORT", 8081)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/mealmind.db".into()),
            jwt_secret,
            jwt_expiry_hours: parse_env_or("MEALMIND_JWT_EXPIRY_HOURS", 12)?,
            trial_days: parse_env_or("MEALMIND_TRIAL_DAYS", 7)?,
            environment,
            log_level: LogLevel::from_str_or_default(
                &env::var("MEALMIND_LOG_LEVEL").unwrap_or_default(),
            ),
            generation: GenerationConfig {
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("MEALMIND_LLM_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
                model: env::var("MEALMIND_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
                temperature: parse_env_or("MEALMIND_LLM_TEMPERATURE", 0.7)?,
                timeout_secs: parse_env_or("MEALMIND_GENERATION_TIMEOUT_SECS", 30)?,
            },
            notifications: NotificationConfig {
                relay_url: env::var("MEALMIND_NOTIFY_RELAY_URL").ok(),
                sender: env::var("MEALMIND_NOTIFY_SENDER").ok(),
            },
        })
    }

    /// One-line summary for startup logging, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} db={} env={:?} model={} gen_timeout={}s trial_days={}",
            self.http_port,
            self.database_url,
            self.environment,
            self.generation.model,
            self.generation.timeout_secs,
            self.trial_days,
        )
    }
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw}")),
        Err(_) => Ok(default),
    }
}
