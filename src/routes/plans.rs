// ABOUTME: Meal plan route handlers for creation, retrieval and listing
// ABOUTME: Thin wrappers over the plan workflow and repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! Meal plan routes
//!
//! `POST /plans/create` drives the full generation workflow; the read
//! endpoints project stored plans for the client. Day projections include
//! the cheat flag so the tracker state is visible without a second query.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{MealDay, MealPlan, MealSlot};
use crate::planner::CreatePlanRequest;
use crate::resources::ServerResources;

/// Response for plan creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlanResponse {
    pub message: String,
    pub plan_id: Uuid,
}

/// Plan header projection shared by the read endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanHeaderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub duration: i32,
    pub goal: String,
    pub diet: String,
    pub allergies: String,
    pub health_conditions: String,
    pub lifestyle: String,
}

impl From<MealPlan> for PlanHeaderResponse {
    fn from(plan: MealPlan) -> Self {
        Self {
            id: plan.id,
            user_id: plan.user_id,
            title: plan.title,
            start_date: plan.start_date,
            duration: plan.duration,
            goal: plan.goal,
            diet: plan.diet,
            allergies: plan.allergies,
            health_conditions: plan.health_conditions,
            lifestyle: plan.lifestyle,
        }
    }
}

/// One day of a plan as returned to the client
#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub day: i32,
    pub date: NaiveDate,
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub snacks: MealSlot,
    pub dinner: MealSlot,
    pub cheat_day: bool,
}

impl From<MealDay> for DayResponse {
    fn from(day: MealDay) -> Self {
        Self {
            day: day.day,
            date: day.date,
            breakfast: day.meals.breakfast,
            lunch: day.meals.lunch,
            snacks: day.meals.snacks,
            dinner: day.meals.dinner,
            cheat_day: day.cheat_day,
        }
    }
}

/// Full plan projection: header plus ordered days
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanDetailResponse {
    #[serde(flatten)]
    pub header: PlanHeaderResponse,
    pub meals: Vec<DayResponse>,
}

/// Query parameters for listing plans
#[derive(Debug, Deserialize)]
pub struct ListPlansQuery {
    pub user_id: Uuid,
}

/// Meal plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/plans/create", post(Self::handle_create))
            .route("/plans", get(Self::handle_list))
            .route("/plans/:plan_id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle POST /plans/create
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePlanRequest>,
    ) -> Result<Response, AppError> {
        let plan_id = resources.plan_service.create_plan(request).await?;

        let response = CreatePlanResponse {
            message: "Meal plan created".into(),
            plan_id,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /plans/:plan_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(plan_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let (plan, days) = resources
            .database
            .get_plan_with_days(plan_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load plan: {e}")))?
            .ok_or_else(|| AppError::not_found("Plan").with_resource_id(plan_id.to_string()))?;

        let response = PlanDetailResponse {
            header: plan.into(),
            meals: days.into_iter().map(Into::into).collect(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /plans?user_id=
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListPlansQuery>,
    ) -> Result<Response, AppError> {
        let plans = resources
            .database
            .list_plans_for_user(query.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to list plans: {e}")))?;

        let response: Vec<PlanHeaderResponse> = plans.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
