// ABOUTME: Deterministic calorie/macro goal computation from biometric inputs
// ABOUTME: Mifflin-St Jeor BMR, fixed activity multiplier table, fixed goal adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Goal Calculator
//!
//! Pure functions deriving a daily calorie target and macro gram goals from
//! a biometric snapshot. No side effects, fully deterministic: stored goals
//! must be reproducible from their snapshots, so reimplementations have to
//! match these formulas exactly, not approximately.
//!
//! # Reference
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting
//! energy expenditure. *American Journal of Clinical Nutrition*, 51(2).

use crate::constants::{energy, goal};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, BiometricProfile, Gender, GoalTargets, GoalType};
use tracing::warn;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula: BMR = 10·weight + 6.25·height − 5·age + 5 (male) / −161 (female)
///
/// # Errors
///
/// Returns `InvalidGoalInput` when height or weight is non-finite or not
/// strictly positive
pub fn calculate_bmr(profile: &BiometricProfile) -> AppResult<f64> {
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(AppError::invalid_goal_input(
            "Weight must be a positive number of kilograms",
        ));
    }
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(AppError::invalid_goal_input(
            "Height must be a positive number of centimeters",
        ));
    }

    let gender_constant = match profile.gender {
        Gender::Male => goal::MSJ_MALE_CONSTANT,
        Gender::Female => goal::MSJ_FEMALE_CONSTANT,
    };

    Ok(goal::MSJ_WEIGHT_COEF * profile.weight_kg + goal::MSJ_HEIGHT_COEF * profile.height_cm
        - goal::MSJ_AGE_COEF * f64::from(profile.age)
        + gender_constant)
}

/// Activity multiplier applied to BMR to obtain TDEE
#[must_use]
pub const fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => goal::activity::SEDENTARY,
        ActivityLevel::Light => goal::activity::LIGHT,
        ActivityLevel::Moderate => goal::activity::MODERATE,
        ActivityLevel::Active => goal::activity::ACTIVE,
        ActivityLevel::VeryActive => goal::activity::VERY_ACTIVE,
    }
}

/// Compute the daily calorie target and macro gram goals
///
/// TDEE = BMR × activity multiplier, shifted ±300 kcal for gain/loss goals.
/// Protein is 2 g per kg of body weight, fat takes 25% of target calories
/// at 9 kcal/g, and carbohydrates absorb the remaining calories at 4 kcal/g.
///
/// The carbohydrate goal can come out negative for high-protein/high-fat
/// combinations with a low calorie target. That value is preserved as-is
/// and logged as a data-quality warning rather than silently clamped.
///
/// # Errors
///
/// Returns `InvalidGoalInput` when the biometric inputs fail validation
pub fn calculate_goal(profile: &BiometricProfile) -> AppResult<GoalTargets> {
    let bmr = calculate_bmr(profile)?;

    let mut tdee = bmr * activity_multiplier(profile.activity_level);
    match profile.goal_type {
        GoalType::Gain => tdee += goal::GOAL_ADJUSTMENT_KCAL,
        GoalType::Loss => tdee -= goal::GOAL_ADJUSTMENT_KCAL,
        GoalType::Maintain => {}
    }

    let target_calories = tdee.round() as i32;
    let protein_goal = (profile.weight_kg * goal::PROTEIN_G_PER_KG).round() as i32;
    let fat_goal = (goal::FAT_CALORIE_SHARE * f64::from(target_calories)
        / energy::KCAL_PER_GRAM_FAT)
        .round() as i32;
    let carb_goal = ((f64::from(target_calories)
        - f64::from(protein_goal) * energy::KCAL_PER_GRAM_PROTEIN
        - f64::from(fat_goal) * energy::KCAL_PER_GRAM_FAT)
        / energy::KCAL_PER_GRAM_CARBS)
        .round() as i32;

    if carb_goal < 0 {
        warn!(
            carb_goal,
            target_calories, "Computed carbohydrate goal is negative for this biometric profile"
        );
    }

    Ok(GoalTargets {
        target_calories,
        protein_goal,
        fat_goal,
        carb_goal,
    })
}
