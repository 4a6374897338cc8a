// ABOUTME: Meal plan and per-day meal payload models
// ABOUTME: MealPlan header, MealDay rows and the four-slot DayMeals payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One meal within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlot {
    /// Display name, e.g. "Oatmeal with Berries"
    pub name: String,
    /// Ingredient list as free text
    pub ingredients: String,
    /// Estimated calorie count
    pub calories: i32,
    /// Macro breakdown as free text, e.g. "Carbs: 40g, Protein: 10g, Fat: 8g"
    pub macros: String,
}

/// The four meal slots produced by one generation call
///
/// The generation service must return a JSON object with exactly these four
/// keys; anything else is rejected so malformed output never reaches the
/// database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayMeals {
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub snacks: MealSlot,
    pub dinner: MealSlot,
}

/// Meal plan header
///
/// Immutable after creation; days are stored separately and reference the
/// plan by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display title
    pub title: String,
    /// First day of the plan (calendar date, no timezone)
    pub start_date: NaiveDate,
    /// Number of days, at least 1
    pub duration: i32,
    /// Goal, e.g. "weight loss"
    pub goal: String,
    /// Diet tag, e.g. "vegetarian"
    pub diet: String,
    /// Free-text allergy notes
    pub allergies: String,
    /// Free-text health condition notes
    pub health_conditions: String,
    /// Free-text lifestyle notes
    pub lifestyle: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    /// Calendar date of the 1-based day index
    #[must_use]
    pub fn date_of_day(&self, day: i32) -> NaiveDate {
        self.start_date + Duration::days(i64::from(day) - 1)
    }
}

/// One day of a plan with its four meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDay {
    /// Unique day identifier
    pub id: Uuid,
    /// Owning plan, referenced by id only
    pub plan_id: Uuid,
    /// 1-based day index in `[1, duration]`
    pub day: i32,
    /// Absolute calendar date (`start_date + day - 1`)
    pub date: NaiveDate,
    /// Meal payloads for this day
    pub meals: DayMeals,
    /// Off-plan marker set through the tracker
    pub cheat_day: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str) -> MealSlot {
        MealSlot {
            name: name.into(),
            ingredients: "a, b".into(),
            calories: 300,
            macros: "Carbs: 30g, Protein: 10g, Fat: 5g".into(),
        }
    }

    #[test]
    fn test_date_of_day_offsets_from_start() {
        let plan = MealPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Cut".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration: 3,
            goal: "weight loss".into(),
            diet: "balanced".into(),
            allergies: String::new(),
            health_conditions: String::new(),
            lifestyle: String::new(),
            created_at: Utc::now(),
        };
        assert_eq!(
            plan.date_of_day(1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            plan.date_of_day(3),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_day_meals_rejects_missing_slot() {
        let json = r#"{"breakfast": {"name": "x", "ingredients": "y", "calories": 1, "macros": "z"}}"#;
        assert!(serde_json::from_str::<DayMeals>(json).is_err());
    }

    #[test]
    fn test_day_meals_rejects_unknown_key() {
        let mut value = serde_json::to_value(DayMeals {
            breakfast: slot("b"),
            lunch: slot("l"),
            snacks: slot("s"),
            dinner: slot("d"),
        })
        .unwrap();
        value["brunch"] = serde_json::json!({"name": "n", "ingredients": "i", "calories": 1, "macros": "m"});
        assert!(serde_json::from_value::<DayMeals>(value).is_err());
    }
}
