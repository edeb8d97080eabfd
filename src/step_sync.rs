// ABOUTME: Step-sync adjuster converting cumulative step reports into calorie-burn deltas
// ABOUTME: Delta-based application prevents double-counting across repeated device syncs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Step-sync adjuster
//!
//! The device reports a *cumulative* daily step count repeatedly (every N
//! steps). Burn is therefore applied as the delta against the previously
//! stored count, never recomputed from the full count, otherwise every
//! repeated sync would re-subtract calories already subtracted.
//!
//! The previous count must be read from the current day's ledger inside the
//! same critical section that commits the adjustment; the storage layer
//! guarantees this. A device step-counter reset at local midnight lands in
//! a fresh ledger (keyed by calendar date) whose previous count is zero.

use crate::constants::steps::KCAL_PER_STEP;
use crate::models::DailyLedger;
use tracing::debug;

/// Result of applying one cumulative step report to a ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSyncOutcome {
    /// Whether the report changed the ledger
    pub applied: bool,
    /// Steps added since the previous report
    pub delta: u64,
    /// Calorie burn applied for this delta, rounded to 2 decimal places
    pub calories_burned: f64,
}

impl StepSyncOutcome {
    const fn ignored() -> Self {
        Self {
            applied: false,
            delta: 0,
            calories_burned: 0.0,
        }
    }
}

/// Apply a cumulative step report to the day's ledger
///
/// A report at or below the previously stored count is silently ignored:
/// out-of-order and duplicate reports are expected from the device, and a
/// lower count is not treated as a reset. Otherwise the positive delta is
/// converted at 0.04 kcal/step (rounded to 2 decimal places), the stored
/// count advances to the reported value, and the burn is folded into the
/// day's net calories. Macro totals are untouched.
///
/// `burned_calories` only ever increases across any sequence of reports.
pub fn apply_step_sync(ledger: &mut DailyLedger, reported: u64) -> StepSyncOutcome {
    let previous = ledger.step_count;
    if reported <= previous {
        debug!(
            user_id = %ledger.user_id,
            date = %ledger.date,
            reported,
            previous,
            "Step report at or below stored count, ignoring"
        );
        return StepSyncOutcome::ignored();
    }

    let delta = reported - previous;
    let calories_burned = round_to_cents(delta as f64 * KCAL_PER_STEP);

    ledger.step_count = reported;
    ledger.burned_calories += calories_burned;
    ledger.recompute_totals();

    debug!(
        user_id = %ledger.user_id,
        date = %ledger.date,
        reported,
        delta,
        calories_burned,
        total_burned = ledger.burned_calories,
        "Step-derived calorie burn applied"
    );

    StepSyncOutcome {
        applied: true,
        delta,
        calories_burned,
    }
}

/// Round to 2 decimal places, matching the wire precision for burn values
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day() -> DailyLedger {
        DailyLedger::empty(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_first_sync_applies_full_count() {
        let mut ledger = day();
        let outcome = apply_step_sync(&mut ledger, 5000);

        assert!(outcome.applied);
        assert_eq!(outcome.delta, 5000);
        assert_eq!(outcome.calories_burned, 200.0);
        assert_eq!(ledger.step_count, 5000);
        assert_eq!(ledger.burned_calories, 200.0);
        assert_eq!(ledger.totals.calories, -200.0);
    }

    #[test]
    fn test_repeat_sync_is_noop() {
        let mut ledger = day();
        apply_step_sync(&mut ledger, 5000);
        let outcome = apply_step_sync(&mut ledger, 5000);

        assert!(!outcome.applied);
        assert_eq!(ledger.burned_calories, 200.0);
        assert_eq!(ledger.step_count, 5000);
    }

    #[test]
    fn test_lower_report_is_ignored_not_a_reset() {
        let mut ledger = day();
        apply_step_sync(&mut ledger, 5000);
        let outcome = apply_step_sync(&mut ledger, 3000);

        assert!(!outcome.applied);
        assert_eq!(ledger.step_count, 5000);
        assert_eq!(ledger.burned_calories, 200.0);
    }

    #[test]
    fn test_delta_rounding_two_decimal_places() {
        let mut ledger = day();
        apply_step_sync(&mut ledger, 13);
        // 13 * 0.04 = 0.52
        assert_eq!(ledger.burned_calories, 0.52);

        let outcome = apply_step_sync(&mut ledger, 20);
        // delta 7 * 0.04 = 0.28
        assert_eq!(outcome.calories_burned, 0.28);
        assert_eq!(ledger.burned_calories, 0.8);
    }

    #[test]
    fn test_burned_calories_monotone_across_reports() {
        let mut ledger = day();
        let mut last_burn = 0.0;
        for reported in [100_u64, 90, 250, 250, 251, 10, 400] {
            apply_step_sync(&mut ledger, reported);
            assert!(ledger.burned_calories >= last_burn);
            last_burn = ledger.burned_calories;
        }
        assert_eq!(ledger.step_count, 400);
        assert_eq!(ledger.burned_calories, 16.0);
    }
}
