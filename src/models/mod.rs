// ABOUTME: Domain model module for Mealmind accounts and meal plans
// ABOUTME: Re-exports User, MealPlan, MealDay and meal payload types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Domain models
//!
//! Plans own their days by id only; the two types never hold live references
//! to each other, so reads reassemble the pair from the repository.

/// Meal plan and per-day meal payload models
pub mod plan;
/// User account model with trial and subscription state
pub mod user;

pub use plan::{DayMeals, MealDay, MealPlan, MealSlot};
pub use user::User;
