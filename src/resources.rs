// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Holds database, auth, workflow and notifier behind Arcs for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Server Resources
//!
//! One container built at startup and shared by every route via
//! `Arc<ServerResources>`. Components receive their configuration here,
//! never from ambient process state.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::generator::MealPlanGenerator;
use crate::llm::ChatProvider;
use crate::notifications::Notifier;
use crate::planner::PlanService;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub plan_service: Arc<PlanService>,
    pub notifier: Arc<Notifier>,
    pub http_client: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble shared resources from their roots
    ///
    /// The chat provider is injected so tests can substitute a scripted
    /// implementation for the external generation service.
    #[must_use]
    pub fn new(
        database: Database,
        chat_provider: Arc<dyn ChatProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let database = Arc::new(database);

        let auth_manager = Arc::new(AuthManager::new(
            config.jwt_secret.clone(),
            config.jwt_expiry_hours,
        ));

        let generator = MealPlanGenerator::new(chat_provider, config.generation.temperature);
        let plan_service = Arc::new(PlanService::new(
            database.clone(),
            generator,
            config.generation.timeout_secs,
        ));

        let notifier = Arc::new(Notifier::new(config.notifications.clone()));

        Self {
            database,
            auth_manager,
            plan_service,
            notifier,
            http_client: reqwest::Client::new(),
            config,
        }
    }
}
