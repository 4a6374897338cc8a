// ABOUTME: Route module organization for Mealmind HTTP endpoints
// ABOUTME: One module per domain with thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Route modules for the Mealmind API
//!
//! Each domain module exposes a `Routes` struct whose `routes()` associated
//! function returns an `axum::Router` wired to the shared
//! [`crate::resources::ServerResources`]. Handlers stay thin and delegate
//! business logic to the service layer.

/// Signup, login and Google OAuth routes
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Notification dispatch routes
pub mod notifications;
/// Meal plan creation and retrieval routes
pub mod plans;
/// Subscription upgrade routes
pub mod subscription;
/// Reward token routes
pub mod tokens;
/// Day completion / cheat day tracker routes
pub mod tracker;
/// Trial status routes
pub mod trial;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use notifications::NotificationRoutes;
pub use plans::PlanRoutes;
pub use subscription::SubscriptionRoutes;
pub use tokens::TokenRoutes;
pub use tracker::TrackerRoutes;
pub use trial::TrialRoutes;
