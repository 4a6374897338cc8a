// ABOUTME: Logging configuration and structured logging setup for observability
// ABOUTME: Configures log levels and output formats via tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Structured logging setup
//!
//! Production deployments emit JSON lines; development gets the pretty
//! human-readable format. Filtering honours `RUST_LOG` when set and falls
//! back to the configured level otherwise.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ServerConfig};

/// Initialise the global tracing subscriber from server configuration
///
/// # Errors
/// Returns an error if a subscriber is already installed.
pub fn init(config: &ServerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mealmind={},info", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.environment {
        Environment::Production => {
            registry
                .with(fmt::layer().json().with_target(true))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
        }
        Environment::Development | Environment::Testing => {
            registry
                .with(fmt::layer().pretty().with_target(false))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
        }
    }

    Ok(())
}
