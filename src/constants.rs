// ABOUTME: Application constants for nutrition formulas and runtime defaults
// ABOUTME: Single source of truth for conversion factors and configuration fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Application-wide constants
//!
//! Formula coefficients live here rather than in configuration: the goal
//! computation must be bit-for-bit stable across deployments so previously
//! stored goals remain reproducible from their biometric snapshots.

/// Energy content of macronutrients
pub mod energy {
    /// Calories per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Calories per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Calories per gram of fat
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Mifflin-St Jeor BMR formula coefficients and goal derivation factors
pub mod goal {
    /// Weight coefficient (kcal per kg)
    pub const MSJ_WEIGHT_COEF: f64 = 10.0;
    /// Height coefficient (kcal per cm)
    pub const MSJ_HEIGHT_COEF: f64 = 6.25;
    /// Age coefficient (kcal per year, subtracted)
    pub const MSJ_AGE_COEF: f64 = 5.0;
    /// Additive constant for males
    pub const MSJ_MALE_CONSTANT: f64 = 5.0;
    /// Additive constant for females
    pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

    /// TDEE adjustment for gain and loss goal types, in kcal
    pub const GOAL_ADJUSTMENT_KCAL: f64 = 300.0;

    /// Daily protein target in grams per kg of body weight
    pub const PROTEIN_G_PER_KG: f64 = 2.0;
    /// Share of target calories allocated to fat
    pub const FAT_CALORIE_SHARE: f64 = 0.25;

    /// Activity multipliers applied to BMR to obtain TDEE
    pub mod activity {
        pub const SEDENTARY: f64 = 1.2;
        pub const LIGHT: f64 = 1.375;
        pub const MODERATE: f64 = 1.55;
        pub const ACTIVE: f64 = 1.725;
        pub const VERY_ACTIVE: f64 = 1.9;
    }
}

/// Step-to-calorie conversion
pub mod steps {
    /// Calories burned per step
    pub const KCAL_PER_STEP: f64 = 0.04;
}

/// Default values for environment-driven configuration
pub mod defaults {
    /// Default meal-estimator endpoint (OpenRouter chat completions)
    pub const ESTIMATOR_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
    /// Default estimator model
    pub const ESTIMATOR_MODEL: &str = "openai/gpt-4o-mini";
    /// Default estimator request timeout in seconds
    pub const ESTIMATOR_TIMEOUT_SECS: u64 = 30;
    /// Default maximum entries held by the meal-estimate cache
    pub const ESTIMATE_CACHE_MAX_ENTRIES: usize = 1000;
    /// Default meal-estimate cache TTL in seconds (24 hours)
    pub const ESTIMATE_CACHE_TTL_SECS: u64 = 86_400;
    /// Default history window in days, including today
    pub const HISTORY_DAYS: u32 = 7;
}

/// Environment variable names recognized by `ServerConfig::from_env`
pub mod env_names {
    pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
    pub const ESTIMATOR_BASE_URL: &str = "MEAL_ESTIMATOR_URL";
    pub const ESTIMATOR_MODEL: &str = "MEAL_ESTIMATOR_MODEL";
    pub const ESTIMATOR_TIMEOUT_SECS: &str = "MEAL_ESTIMATOR_TIMEOUT_SECS";
    pub const ESTIMATE_CACHE_MAX_ENTRIES: &str = "MEAL_CACHE_MAX_ENTRIES";
    pub const ESTIMATE_CACHE_TTL_SECS: &str = "MEAL_CACHE_TTL_SECS";
    pub const HISTORY_DAYS: &str = "HISTORY_DAYS";
}

/// Service identification for structured logging
pub mod service_names {
    pub const MEALTRACK_SERVER: &str = "mealtrack-server";
}
