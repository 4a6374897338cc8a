// ABOUTME: Plan creation workflow orchestrating validation, calories, generation and persistence
// ABOUTME: Generation runs before any write so a failure leaves zero rows behind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Plan Workflow
//!
//! The orchestrator behind `POST /plans/create`: validate the request,
//! compute the calorie target, make the single generation call under a
//! deadline, derive each day's date, and persist the header with all day
//! rows in one transaction. The generation call happens before anything is
//! written, so a generation failure never strands a header without days.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tokio::time::{timeout, Duration};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::Database;
use crate::energy::{estimate_daily_calories, ActivityLevel, Sex};
use crate::errors::AppError;
use crate::generator::{GenerationInputs, MealPlanGenerator};
use crate::models::{MealDay, MealPlan};

/// Request to create a meal plan
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanRequest {
    pub title: String,
    pub start_date: NaiveDate,
    pub duration: i32,
    pub goal: String,
    pub diet: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub health_conditions: String,
    #[serde(default)]
    pub lifestyle: String,
    pub user_id: Uuid,
    /// Biometrics; all optional, zero values trigger the calorie fallback
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_activity")]
    pub activity_level: String,
}

fn default_gender() -> String {
    "unspecified".into()
}

fn default_activity() -> String {
    "sedentary".into()
}

/// Plan creation workflow
pub struct PlanService {
    database: Arc<Database>,
    generator: MealPlanGenerator,
    generation_timeout_secs: u64,
}

impl PlanService {
    /// Create the workflow over its collaborators
    #[must_use]
    pub fn new(
        database: Arc<Database>,
        generator: MealPlanGenerator,
        generation_timeout_secs: u64,
    ) -> Self {
        Self {
            database,
            generator,
            generation_timeout_secs,
        }
    }

    /// Create a plan with `duration` days and return its id
    ///
    /// Exactly one header row and `duration` day rows exist on success; on
    /// any failure, none do.
    ///
    /// # Errors
    /// Validation failures reject the request before any side effect;
    /// generation and persistence failures surface as the failure of the
    /// whole request.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, duration = request.duration))]
    pub async fn create_plan(&self, request: CreatePlanRequest) -> Result<Uuid, AppError> {
        Self::validate(&request)?;

        let calories = estimate_daily_calories(
            Sex::parse(&request.gender),
            request.age,
            request.height,
            request.weight,
            ActivityLevel::parse(&request.activity_level),
        );

        // One generation call per plan; its output is reused for every day
        let meals = timeout(
            Duration::from_secs(self.generation_timeout_secs),
            self.generator.generate_day(&GenerationInputs {
                goal: request.goal.clone(),
                diet: request.diet.clone(),
                allergies: request.allergies.clone(),
                calories,
                health_conditions: request.health_conditions.clone(),
                lifestyle: request.lifestyle.clone(),
            }),
        )
        .await
        .map_err(|_| AppError::generation_timeout(self.generation_timeout_secs))??;

        let plan = MealPlan {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            title: request.title,
            start_date: request.start_date,
            duration: request.duration,
            goal: request.goal,
            diet: request.diet,
            allergies: request.allergies,
            health_conditions: request.health_conditions,
            lifestyle: request.lifestyle,
            created_at: Utc::now(),
        };

        let days: Vec<MealDay> = (1..=plan.duration)
            .map(|day| MealDay {
                id: Uuid::new_v4(),
                plan_id: plan.id,
                day,
                date: plan.date_of_day(day),
                meals: meals.clone(),
                cheat_day: false,
            })
            .collect();

        let plan_id = self
            .database
            .create_plan_with_days(&plan, &days)
            .await
            .map_err(|e| AppError::database(format!("Failed to persist plan: {e}")))?;

        info!(%plan_id, calories, days = days.len(), "meal plan created");

        Ok(plan_id)
    }

    fn validate(request: &CreatePlanRequest) -> Result<(), AppError> {
        if request.duration < 1 {
            return Err(AppError::invalid_input("duration must be at least 1 day"));
        }
        if request.title.trim().is_empty() {
            return Err(AppError::invalid_input("title must not be empty"));
        }
        if request.goal.trim().is_empty() {
            return Err(AppError::invalid_input("goal must not be empty"));
        }
        if request.diet.trim().is_empty() {
            return Err(AppError::invalid_input("diet must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(duration: i32) -> CreatePlanRequest {
        CreatePlanRequest {
            title: "Cut".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration,
            goal: "weight loss".into(),
            diet: "balanced".into(),
            allergies: String::new(),
            health_conditions: String::new(),
            lifestyle: String::new(),
            user_id: Uuid::new_v4(),
            gender: "male".into(),
            age: 30,
            height: 180.0,
            weight: 80.0,
            activity_level: "moderate".into(),
        }
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        assert!(PlanService::validate(&request(0)).is_err());
        assert!(PlanService::validate(&request(-3)).is_err());
        assert!(PlanService::validate(&request(1)).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut req = request(3);
        req.title = "   ".into();
        assert!(PlanService::validate(&req).is_err());
    }

    #[test]
    fn test_request_defaults_from_partial_json() {
        let json = serde_json::json!({
            "title": "Bulk",
            "start_date": "2024-06-01",
            "duration": 5,
            "goal": "muscle gain",
            "diet": "omnivore",
            "user_id": Uuid::new_v4(),
        });
        let req: CreatePlanRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.gender, "unspecified");
        assert_eq!(req.activity_level, "sedentary");
        assert_eq!(req.age, 0);
        assert!(req.allergies.is_empty());
    }
}
