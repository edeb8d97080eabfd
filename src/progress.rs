// ABOUTME: Read-only progress reporter composing daily totals with the user's goal
// ABOUTME: Percent-to-goal per axis, clamped to [0, 100], with zero-goal guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Progress reporter
//!
//! Pure read-side computation; the goal is passed in explicitly rather than
//! reached from ambient storage, so the reporter has no shared state and is
//! computed fresh per call.

use crate::models::{CalorieGoal, DailyProgress, MacroTotals};

/// Percent-to-goal figures for one day's totals against the user's goal
///
/// Each axis is `clamp(round(100 · total / goal), 0, 100)`. A zero or
/// negative goal axis cannot be divided through: it reads as 100% when
/// anything has been consumed on that axis and 0% otherwise.
#[must_use]
pub fn daily_progress(totals: &MacroTotals, goal: &CalorieGoal) -> DailyProgress {
    DailyProgress {
        calories: percent_of(totals.calories, f64::from(goal.targets.target_calories)),
        protein: percent_of(totals.protein, f64::from(goal.targets.protein_goal)),
        carbs: percent_of(totals.carbs, f64::from(goal.targets.carb_goal)),
        fats: percent_of(totals.fats, f64::from(goal.targets.fat_goal)),
    }
}

fn percent_of(total: f64, goal: f64) -> u8 {
    if !goal.is_finite() || goal <= 0.0 {
        // Division-by-zero guard; a negative carb goal also lands here
        return u8::from(total > 0.0) * 100;
    }
    let percent = (100.0 * total / goal).round();
    percent.clamp(0.0, 100.0) as u8
}
