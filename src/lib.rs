// ABOUTME: Mealmind library crate root declaring all public modules
// ABOUTME: Backend for AI-generated multi-day meal plans with accounts and trials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Mealmind
//!
//! Backend service for personalized meal planning. Users sign up with a
//! password or a Google identity, get a time-limited trial, and create
//! multi-day meal plans generated by an OpenAI-compatible chat model and
//! stored relationally in SQLite.
//!
//! ## Architecture
//!
//! - [`server`] assembles the axum application over [`resources::ServerResources`]
//! - [`routes`] holds one thin handler module per domain
//! - [`planner`] orchestrates validation, calorie estimation, generation and
//!   the atomic plan write
//! - [`generator`] renders the prompt and parses model output into typed meals
//! - [`llm`] abstracts the chat backend behind a provider trait
//! - [`database`] owns the sqlx pool, schema and repositories
//! - [`energy`] implements the Mifflin-St Jeor daily calorie estimate

#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod database;
pub mod energy;
pub mod errors;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod planner;
pub mod resources;
pub mod routes;
pub mod server;
