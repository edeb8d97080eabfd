// ABOUTME: Core data models for the nutrition ledger, goals, and progress reporting
// ABOUTME: Strict structured records with explicit default-zero fields and serde wire names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Common data models
//!
//! Serde renames carry the mobile-client wire contract (`mealText`,
//! `stepCount`, `burnedCalories`, ...). Every numeric field that the wire
//! format treats as "absent means zero" is a concrete default-zero field
//! here, so the ledger invariants are checkable by type.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological gender for BMR calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise (1.2)
    Sedentary,
    /// 1-3 days/week (1.375)
    Light,
    /// 3-5 days/week (1.55)
    Moderate,
    /// 6-7 days/week (1.725)
    Active,
    /// Hard daily training (1.9)
    #[serde(rename = "very active")]
    VeryActive,
}

/// Goal direction for the calorie target adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Caloric surplus (+300 kcal)
    Gain,
    /// Caloric balance
    Maintain,
    /// Caloric deficit (-300 kcal)
    Loss,
}

/// Biometric snapshot used to compute a calorie goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BiometricProfile {
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Weight in kilograms
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal_type: GoalType,
}

/// Running nutritional totals for one calendar day
///
/// The calorie axis is net of the step-derived burn adjustment; the macro
/// axes are exact sums over the day's entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroTotals {
    /// All-zero totals
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }

    /// Add another set of totals into this one
    pub fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
    }

    /// Validate that every field is finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` naming the offending field
    pub fn validate_non_negative(&self) -> AppResult<()> {
        for (name, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_entry(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Caller-supplied meal entry payload, before an identity is assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntryInput {
    pub meal_text: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    /// Optional reference to an uploaded meal photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional source barcode when the entry came from a product scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl MealEntryInput {
    /// Build an input from free text and an estimated macro breakdown
    #[must_use]
    pub fn from_estimate(meal_text: impl Into<String>, estimate: MacroTotals) -> Self {
        Self {
            meal_text: meal_text.into(),
            calories: estimate.calories,
            protein: estimate.protein,
            carbs: estimate.carbs,
            fats: estimate.fats,
            image: None,
            barcode: None,
        }
    }

    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` when the meal text is blank or any nutritional
    /// value is negative or non-finite
    pub fn validate(&self) -> AppResult<()> {
        if self.meal_text.trim().is_empty() {
            return Err(AppError::invalid_entry("Meal text is required"));
        }
        self.contribution().validate_non_negative()
    }

    /// The totals contribution this payload represents
    #[must_use]
    pub const fn contribution(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

/// One logged meal's estimated nutritional contribution
///
/// Owned exclusively by the ledger that contains it. The `id` is a stable
/// opaque identity assigned at insertion; display order is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: Uuid,
    pub meal_text: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl MealEntry {
    /// Create a new entry from a validated input, assigning a fresh identity
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` when the input fails validation
    pub fn from_input(input: MealEntryInput) -> AppResult<Self> {
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            meal_text: input.meal_text,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fats: input.fats,
            image: input.image,
            barcode: input.barcode,
        })
    }

    /// The totals contribution of this entry
    #[must_use]
    pub const fn contribution(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

/// Key identifying one user's ledger for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedgerKey {
    pub user_id: Uuid,
    pub date: NaiveDate,
}

impl LedgerKey {
    #[must_use]
    pub const fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self { user_id, date }
    }
}

/// Per-user, per-day aggregate of meal entries and running totals
///
/// Exactly one ledger exists per (user, date); created lazily on first
/// write and retained as history thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLedger {
    pub user_id: Uuid,
    /// Calendar date in the user's logical day (YYYY-MM-DD on the wire)
    pub date: NaiveDate,
    pub entries: Vec<MealEntry>,
    pub totals: MacroTotals,
    /// Last reported cumulative step count for the day
    pub step_count: u64,
    /// Cumulative step-derived calorie-burn adjustment for the day
    pub burned_calories: f64,
}

impl DailyLedger {
    /// The empty default ledger view for a day with no writes yet
    #[must_use]
    pub const fn empty(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            entries: Vec::new(),
            totals: MacroTotals::zero(),
            step_count: 0,
            burned_calories: 0.0,
        }
    }

    #[must_use]
    pub const fn key(&self) -> LedgerKey {
        LedgerKey::new(self.user_id, self.date)
    }
}

/// Derived daily targets computed from a biometric profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalTargets {
    pub target_calories: i32,
    /// Grams of protein per day
    pub protein_goal: i32,
    /// Grams of fat per day
    pub fat_goal: i32,
    /// Grams of carbohydrate per day; may be negative for extreme inputs
    /// and is deliberately not clamped (callers treat it as a data-quality
    /// warning)
    pub carb_goal: i32,
}

/// A user's calorie/macro goal: the biometric snapshot plus derived targets
///
/// One per user, independent of date. Replaced wholesale on resubmission,
/// never partially updated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieGoal {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub profile: BiometricProfile,
    #[serde(flatten)]
    pub targets: GoalTargets,
}

impl CalorieGoal {
    #[must_use]
    pub const fn new(user_id: Uuid, profile: BiometricProfile, targets: GoalTargets) -> Self {
        Self {
            user_id,
            profile,
            targets,
        }
    }
}

/// Percent-to-goal figures, each clamped to [0, 100]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyProgress {
    pub calories: u8,
    pub protein: u8,
    pub carbs: u8,
    pub fats: u8,
}

/// Read-side view of the current day for the mobile client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayLog {
    pub entries: Vec<MealEntry>,
    pub totals: MacroTotals,
    pub calorie_goal: Option<CalorieGoal>,
    pub step_count: u64,
    pub burned_calories: f64,
}

/// One day of totals in a history range response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub totals: MacroTotals,
}

/// Progress response: percentages alongside the raw totals and goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub progress: DailyProgress,
    pub totals: MacroTotals,
    pub goal: CalorieGoal,
}

/// Result of adding a meal: the created entry plus the updated day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAdded {
    pub entry: MealEntry,
    pub ledger: DailyLedger,
    pub goal: Option<CalorieGoal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActivityLevel::VeryActive).unwrap(),
            "\"very active\""
        );
        assert_eq!(
            serde_json::from_str::<ActivityLevel>("\"sedentary\"").unwrap(),
            ActivityLevel::Sedentary
        );
        assert!(serde_json::from_str::<ActivityLevel>("\"extreme\"").is_err());
    }

    #[test]
    fn test_meal_entry_input_rejects_negative_macros() {
        let input = MealEntryInput {
            meal_text: "two eggs".into(),
            calories: 150.0,
            protein: -12.0,
            carbs: 1.0,
            fats: 10.0,
            image: None,
            barcode: None,
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidEntry);
    }

    #[test]
    fn test_meal_entry_input_rejects_blank_text() {
        let input = MealEntryInput::from_estimate("   ", MacroTotals::zero());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_ledger_date_wire_format() {
        let ledger = DailyLedger::empty(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        );
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["date"], "2025-03-09");
        assert_eq!(json["stepCount"], 0);
        assert_eq!(json["burnedCalories"], 0.0);
    }

    #[test]
    fn test_calorie_goal_flattens_profile_and_targets() {
        let goal = CalorieGoal::new(
            Uuid::new_v4(),
            BiometricProfile {
                gender: Gender::Male,
                age: 21,
                height_cm: 170.0,
                weight_kg: 65.0,
                activity_level: ActivityLevel::Moderate,
                goal_type: GoalType::Maintain,
            },
            GoalTargets {
                target_calories: 2499,
                protein_goal: 130,
                fat_goal: 69,
                carb_goal: 340,
            },
        );
        let json = serde_json::to_value(goal).unwrap();
        assert_eq!(json["targetCalories"], 2499);
        assert_eq!(json["activityLevel"], "moderate");
        assert_eq!(json["height"], 170.0);
    }
}
