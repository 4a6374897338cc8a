// ABOUTME: Production server binary wiring config, database, provider and routes
// ABOUTME: Parses CLI overrides, initializes logging and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Mealmind Server Binary
//!
//! Starts the Mealmind meal-planning API: loads configuration from the
//! environment, opens the SQLite database, wires the chat provider and
//! serves HTTP until stopped.

use anyhow::Result;
use clap::Parser;
use mealmind::{
    config::ServerConfig,
    database::Database,
    llm::openai_compatible::OpenAiCompatibleProvider,
    logging,
    resources::ServerResources,
    server::MealmindServer,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mealmind-server")]
#[command(about = "Mealmind - AI meal planning backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init(&config)?;

    info!("Starting Mealmind API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let provider = Arc::new(OpenAiCompatibleProvider::new((&config.generation).into()));
    info!("Generation provider ready: model {}", config.generation.model);

    let config = Arc::new(config);
    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, provider, config));

    MealmindServer::new(resources).run(port).await
}
