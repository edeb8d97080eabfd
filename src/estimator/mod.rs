// ABOUTME: Meal estimation abstraction: free text in, macro breakdown out
// ABOUTME: Defines the estimator trait, prompt construction, and response parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Meal estimator
//!
//! The core treats text-to-nutrition estimation as an opaque collaborator:
//! given a meal description, it returns an estimated `{calories, protein,
//! carbs, fats}`. The [`openrouter`] module implements the trait against the
//! OpenRouter chat-completions API; [`cache`] wraps any estimator with a
//! bounded memoization layer so identical descriptions never trigger a
//! second external call within the retention window.

/// Bounded LRU+TTL caching wrapper
pub mod cache;
/// OpenRouter chat-completions client
pub mod openrouter;

pub use cache::CachedEstimator;
pub use openrouter::OpenRouterEstimator;

use crate::errors::{AppError, AppResult};
use crate::models::MacroTotals;
use serde::Deserialize;

/// Text-to-nutrition estimation collaborator
#[async_trait::async_trait]
pub trait MealEstimator: Send + Sync {
    /// Estimate the macro breakdown for a free-text meal description
    ///
    /// # Errors
    ///
    /// Returns `EstimationFailed` when the external service is unreachable,
    /// times out, or returns content that cannot be parsed into the four
    /// numeric fields
    async fn estimate(&self, meal_text: &str) -> AppResult<MacroTotals>;
}

/// Canonical cache/prompt form of a meal description: trimmed and lowercased
#[must_use]
pub fn normalize_meal_text(meal_text: &str) -> String {
    meal_text.trim().to_lowercase()
}

/// Build the estimation prompt for a normalized meal description
#[must_use]
pub fn estimation_prompt(meal_text: &str) -> String {
    format!(
        "Estimate total calories, protein, carbs, and fats for the following meal.\n\
         Return ONLY in JSON format like:\n\
         {{\n\
           \"calories\": number,\n\
           \"protein\": number,\n\
           \"carbs\": number,\n\
           \"fats\": number\n\
         }}\n\
         \n\
         Meal: {meal_text}"
    )
}

#[derive(Debug, Deserialize)]
struct RawEstimate {
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
}

/// Parse model output into a macro estimate
///
/// Models occasionally wrap the JSON object in prose or code fences, so the
/// parse window is the first `{` through the last `}`. All four fields must
/// be present, numeric, finite and non-negative.
///
/// # Errors
///
/// Returns `EstimationFailed` for anything that does not yield four valid
/// numeric fields
pub fn parse_estimate(content: &str) -> AppResult<MacroTotals> {
    let start = content
        .find('{')
        .ok_or_else(|| AppError::estimation_failed("Estimator response contains no JSON object"))?;
    let end = content
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| AppError::estimation_failed("Estimator response contains no JSON object"))?;

    let raw: RawEstimate = serde_json::from_str(&content[start..=end]).map_err(|e| {
        AppError::estimation_failed(format!("Estimator response is not valid JSON: {e}"))
    })?;

    let estimate = MacroTotals {
        calories: raw.calories,
        protein: raw.protein,
        carbs: raw.carbs,
        fats: raw.fats,
    };
    estimate.validate_non_negative().map_err(|e| {
        AppError::estimation_failed(format!("Estimator returned invalid values: {e}"))
    })?;
    Ok(estimate)
}
