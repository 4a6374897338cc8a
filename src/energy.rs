// ABOUTME: Daily calorie target estimation from biometric inputs
// ABOUTME: Mifflin-St Jeor basal rate scaled by an activity multiplier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Calorie Estimation
//!
//! Pure, total conversion of biometrics into a daily energy target used to
//! size meal generation. Missing or non-positive biometrics fall back to a
//! fixed 2000 kcal target rather than failing the request.

use serde::{Deserialize, Serialize};

/// Target used when any biometric field is missing or non-positive
pub const FALLBACK_CALORIES: i32 = 2000;

/// Biological sex category for the basal-rate offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Sex {
    /// Lenient parse; anything unrecognised maps to `Unspecified`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unspecified,
        }
    }

    /// Mifflin-St Jeor offset for this category
    #[must_use]
    const fn bmr_offset(self) -> f64 {
        match self {
            Self::Male => 5.0,
            Self::Female => -161.0,
            Self::Unspecified => 0.0,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Very,
    Extra,
}

impl ActivityLevel {
    /// Lenient parse; unrecognised levels map to `Sedentary` (factor 1.2)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "very" => Self::Very,
            "extra" => Self::Extra,
            _ => Self::Sedentary,
        }
    }

    /// Fixed multiplier applied to the basal rate
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Very => 1.725,
            Self::Extra => 1.9,
        }
    }
}

/// Estimate the daily calorie target (TDEE) for the given biometrics
///
/// Returns [`FALLBACK_CALORIES`] when age, height or weight is non-positive;
/// otherwise the Mifflin-St Jeor basal rate times the activity factor,
/// truncated to an integer.
#[must_use]
pub fn estimate_daily_calories(
    sex: Sex,
    age: i32,
    height_cm: f64,
    weight_kg: f64,
    activity: ActivityLevel,
) -> i32 {
    if age <= 0 || height_cm <= 0.0 || weight_kg <= 0.0 {
        return FALLBACK_CALORIES;
    }

    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + sex.bmr_offset();

    #[allow(clippy::cast_possible_truncation)]
    let target = (bmr * activity.factor()) as i32;
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        // (10*80 + 6.25*180 - 5*30 + 5) * 1.55 = 1780 * 1.55 = 2759
        let target = estimate_daily_calories(Sex::Male, 30, 180.0, 80.0, ActivityLevel::Moderate);
        assert_eq!(target, 2759);
    }

    #[test]
    fn test_female_offset() {
        // 1780 - 5 - 161 = 1614; 1614 * 1.2 = 1936.8 -> 1936
        let target =
            estimate_daily_calories(Sex::Female, 30, 180.0, 80.0, ActivityLevel::Sedentary);
        assert_eq!(target, 1936);
    }

    #[test]
    fn test_unspecified_has_no_offset() {
        let male = estimate_daily_calories(Sex::Male, 40, 170.0, 70.0, ActivityLevel::Light);
        let neutral =
            estimate_daily_calories(Sex::Unspecified, 40, 170.0, 70.0, ActivityLevel::Light);
        assert!(male > neutral);
    }

    #[test]
    fn test_fallback_on_non_positive_biometrics() {
        assert_eq!(
            estimate_daily_calories(Sex::Male, 0, 180.0, 80.0, ActivityLevel::Moderate),
            FALLBACK_CALORIES
        );
        assert_eq!(
            estimate_daily_calories(Sex::Male, 30, 0.0, 80.0, ActivityLevel::Moderate),
            FALLBACK_CALORIES
        );
        assert_eq!(
            estimate_daily_calories(Sex::Male, 30, 180.0, -1.0, ActivityLevel::Moderate),
            FALLBACK_CALORIES
        );
    }

    #[test]
    fn test_unknown_activity_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::parse("couch"), ActivityLevel::Sedentary);
        assert!((ActivityLevel::parse("couch").factor() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_positive_output_for_valid_biometrics() {
        for activity in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Very,
            ActivityLevel::Extra,
        ] {
            let target = estimate_daily_calories(Sex::Female, 25, 160.0, 55.0, activity);
            assert!(target > 0, "activity {activity:?} produced {target}");
        }
    }
}
