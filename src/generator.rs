// ABOUTME: Meal generation client building the prompt and parsing LLM output
// ABOUTME: One chat call per plan producing a strict four-slot DayMeals value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Meal Plan Generation
//!
//! Renders the fixed prompt from the user's constraints and calorie target,
//! makes a single chat completion call, and parses the reply into
//! [`DayMeals`]. Output that does not match the required shape fails the
//! call; nothing is substituted with defaults, since partial meal data must
//! never reach the day rows. The generator performs no retries; the workflow
//! decides whether to abort.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm::{ChatMessage, ChatProvider, ChatRequest};
use crate::models::DayMeals;

/// Prompt template for one day of meals
///
/// The worked example pins the exact output shape: a single JSON object with
/// the four slot keys and nothing else.
const PROMPT_TEMPLATE: &str = r#"Create a personalized healthy meal plan for one day.
Goal: {goal}
Diet: {diet}
Allergies: {allergies}
Target Daily Calories: {calories}
Health Conditions: {health_conditions}
Lifestyle: {lifestyle}

Format the output in valid JSON like this:

{
  "breakfast": {
    "name": "Oatmeal with Berries",
    "ingredients": "Oats, Milk, Blueberries, Honey",
    "calories": 350,
    "macros": "Carbs: 40g, Protein: 10g, Fat: 8g"
  },
  "lunch": {
    "name": "Grilled Chicken Salad",
    "ingredients": "Chicken Breast, Lettuce, Olive Oil, Lemon Juice",
    "calories": 500,
    "macros": "Carbs: 10g, Protein: 40g, Fat: 25g"
  },
  "snacks": {
    "name": "Apple with Peanut Butter",
    "ingredients": "Apple, Peanut Butter",
    "calories": 200,
    "macros": "Carbs: 20g, Protein: 5g, Fat: 10g"
  },
  "dinner": {
    "name": "Steamed Veggies with Quinoa",
    "ingredients": "Broccoli, Carrots, Quinoa",
    "calories": 450,
    "macros": "Carbs: 50g, Protein: 15g, Fat: 10g"
  }
}
"#;

/// Constraints fed into one generation call
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub goal: String,
    pub diet: String,
    pub allergies: String,
    pub calories: i32,
    pub health_conditions: String,
    pub lifestyle: String,
}

/// Client for the external meal generation service
pub struct MealPlanGenerator {
    provider: Arc<dyn ChatProvider>,
    temperature: f32,
}

impl MealPlanGenerator {
    /// Create a generator over the given chat provider
    #[must_use]
    pub fn new(provider: Arc<dyn ChatProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    /// Render the prompt for the given inputs
    #[must_use]
    pub fn render_prompt(inputs: &GenerationInputs) -> String {
        PROMPT_TEMPLATE
            .replace("{goal}", &inputs.goal)
            .replace("{diet}", &inputs.diet)
            .replace("{allergies}", &inputs.allergies)
            .replace("{calories}", &inputs.calories.to_string())
            .replace("{health_conditions}", &inputs.health_conditions)
            .replace("{lifestyle}", &inputs.lifestyle)
    }

    /// Generate one day's meal set
    ///
    /// Called once per plan; the workflow duplicates the result across all
    /// days of the plan.
    ///
    /// # Errors
    /// Returns a generation error when the service is unreachable or its
    /// output does not parse into the four-slot shape.
    pub async fn generate_day(&self, inputs: &GenerationInputs) -> Result<DayMeals, AppError> {
        let prompt = Self::render_prompt(inputs);

        debug!(
            provider = self.provider.name(),
            calories = inputs.calories,
            "requesting one-day meal generation"
        );

        let request =
            ChatRequest::new(vec![ChatMessage::user(prompt)]).with_temperature(self.temperature);

        let response = self.provider.complete(&request).await?;

        Self::parse_output(&response.content)
    }

    /// Parse raw model output into [`DayMeals`]
    ///
    /// Trims surrounding whitespace and Markdown code fences before parsing,
    /// since models routinely wrap JSON in ```json blocks.
    pub fn parse_output(raw: &str) -> Result<DayMeals, AppError> {
        let cleaned = strip_code_fences(raw.trim());

        serde_json::from_str(cleaned).map_err(|e| {
            warn!("generation output failed to parse: {e}");
            AppError::generation_failed(format!("generation output malformed: {e}"))
        })
    }
}

/// Remove a surrounding Markdown code fence, if present
fn strip_code_fences(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string ("json") up to the first newline
    let body = rest.split_once('\n').map_or(rest, |(_, b)| b);
    body.strip_suffix("```").map_or(body, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_OUTPUT: &str = r#"{
      "breakfast": {"name": "Oats", "ingredients": "Oats, Milk", "calories": 350, "macros": "C:40 P:10 F:8"},
      "lunch": {"name": "Salad", "ingredients": "Chicken, Lettuce", "calories": 500, "macros": "C:10 P:40 F:25"},
      "snacks": {"name": "Apple", "ingredients": "Apple", "calories": 200, "macros": "C:20 P:5 F:10"},
      "dinner": {"name": "Quinoa", "ingredients": "Quinoa, Broccoli", "calories": 450, "macros": "C:50 P:15 F:10"}
    }"#;

    #[test]
    fn test_render_prompt_embeds_all_inputs() {
        let prompt = MealPlanGenerator::render_prompt(&GenerationInputs {
            goal: "weight loss".into(),
            diet: "vegan".into(),
            allergies: "peanuts".into(),
            calories: 2100,
            health_conditions: "none".into(),
            lifestyle: "night shifts".into(),
        });
        for needle in ["weight loss", "vegan", "peanuts", "2100", "night shifts"] {
            assert!(prompt.contains(needle), "missing {needle} in prompt");
        }
        // The worked example must survive templating untouched
        assert!(prompt.contains("\"breakfast\""));
        assert!(prompt.contains("\"dinner\""));
    }

    #[test]
    fn test_parse_valid_output() {
        let meals = MealPlanGenerator::parse_output(VALID_OUTPUT).unwrap();
        assert_eq!(meals.breakfast.name, "Oats");
        assert_eq!(meals.dinner.calories, 450);
    }

    #[test]
    fn test_parse_fenced_output() {
        let fenced = format!("```json\n{VALID_OUTPUT}\n```");
        let meals = MealPlanGenerator::parse_output(&fenced).unwrap();
        assert_eq!(meals.lunch.name, "Salad");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = MealPlanGenerator::parse_output("Here is your meal plan!").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::GenerationFailed);
    }

    #[test]
    fn test_parse_rejects_missing_slot() {
        let partial = r#"{"breakfast": {"name": "Oats", "ingredients": "Oats", "calories": 350, "macros": "x"}}"#;
        let err = MealPlanGenerator::parse_output(partial).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::GenerationFailed);
    }
}
