// ABOUTME: Nutrition service orchestrating estimator, ledger store, and goal computation
// ABOUTME: Implements the boundary operations the surrounding transport layer carries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use crate::errors::{AppError, AppResult};
use crate::estimator::MealEstimator;
use crate::goal_calculator::calculate_goal;
use crate::models::{
    BiometricProfile, CalorieGoal, DailyLedger, HistoryDay, MealAdded, MealEntryInput,
    ProgressReport, TodayLog,
};
use crate::progress::daily_progress;
use crate::storage::NutritionStore;
use chrono::{Days, NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Protocol-agnostic nutrition operations
///
/// Dateless methods operate on the current UTC calendar day, matching the
/// logical-day behavior of the mobile client; every operation also has a
/// date-explicit `*_on` form for deterministic callers and tests.
pub struct NutritionService {
    store: Arc<dyn NutritionStore>,
    estimator: Arc<dyn MealEstimator>,
    history_days: u32,
}

impl NutritionService {
    #[must_use]
    pub fn new(
        store: Arc<dyn NutritionStore>,
        estimator: Arc<dyn MealEstimator>,
        history_days: u32,
    ) -> Self {
        Self {
            store,
            estimator,
            history_days: history_days.max(1),
        }
    }

    /// The current UTC calendar day
    #[must_use]
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Estimate a described meal and append it to today's ledger
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` for blank text, `EstimationFailed` when the
    /// external estimator fails (in which case nothing is added)
    pub async fn add_meal_entry(&self, user_id: Uuid, meal_text: &str) -> AppResult<MealAdded> {
        self.add_meal_entry_on(user_id, Self::today(), meal_text)
            .await
    }

    /// Date-explicit form of [`Self::add_meal_entry`]
    ///
    /// # Errors
    ///
    /// See [`Self::add_meal_entry`]
    pub async fn add_meal_entry_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        meal_text: &str,
    ) -> AppResult<MealAdded> {
        if meal_text.trim().is_empty() {
            return Err(AppError::invalid_entry("Meal text is required"));
        }

        // Estimation happens before any ledger write: a failed estimate
        // must not leave a partial entry behind
        let estimate = self.estimator.estimate(meal_text).await?;
        let input = MealEntryInput::from_estimate(meal_text, estimate);

        let (entry, ledger) = self.store.add_entry(user_id, date, input).await?;
        let goal = self.store.goal(user_id).await?;

        info!(
            user_id = %user_id,
            date = %date,
            entry_id = %entry.id,
            calories = entry.calories,
            "Meal logged"
        );
        Ok(MealAdded {
            entry,
            ledger,
            goal,
        })
    }

    /// Replace the meal entry at a display index
    ///
    /// Callers referencing entries by index must refetch after every
    /// mutation; the index is resolved against the current entry order.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an out-of-range index, `InvalidEntry`
    /// for a malformed payload
    pub async fn edit_meal_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
        input: MealEntryInput,
    ) -> AppResult<DailyLedger> {
        self.store.edit_entry(user_id, date, index, input).await
    }

    /// Remove the meal entry at a display index
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an out-of-range index
    pub async fn delete_meal_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        index: usize,
    ) -> AppResult<DailyLedger> {
        self.store.delete_entry(user_id, date, index).await
    }

    /// Apply a device-reported cumulative step count to today's ledger
    ///
    /// # Errors
    ///
    /// Returns `InvalidStepCount` for a negative report
    pub async fn log_steps(&self, user_id: Uuid, steps: i64) -> AppResult<DailyLedger> {
        self.log_steps_on(user_id, Self::today(), steps).await
    }

    /// Date-explicit form of [`Self::log_steps`]
    ///
    /// # Errors
    ///
    /// See [`Self::log_steps`]
    pub async fn log_steps_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        steps: i64,
    ) -> AppResult<DailyLedger> {
        if steps < 0 {
            return Err(AppError::invalid_step_count(
                "Valid step count is required",
            ));
        }
        self.store.sync_steps(user_id, date, steps as u64).await
    }

    /// Compute and store the user's calorie goal from a biometric profile
    ///
    /// Replace-on-write: resubmitting biometrics overwrites the previous
    /// goal wholesale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGoalInput` when the profile fails validation
    pub async fn set_goal(
        &self,
        user_id: Uuid,
        profile: BiometricProfile,
    ) -> AppResult<CalorieGoal> {
        let targets = calculate_goal(&profile)?;
        let goal = self
            .store
            .upsert_goal(CalorieGoal::new(user_id, profile, targets))
            .await?;

        info!(
            user_id = %user_id,
            target_calories = targets.target_calories,
            "Calorie goal updated"
        );
        Ok(goal)
    }

    /// The user's current goal
    ///
    /// # Errors
    ///
    /// Returns `GoalNotSet` when no goal exists
    pub async fn goal(&self, user_id: Uuid) -> AppResult<CalorieGoal> {
        self.store
            .goal(user_id)
            .await?
            .ok_or_else(|| AppError::goal_not_set(user_id))
    }

    /// Today's entries, totals, goal, and step state
    ///
    /// A day with no ledger yet reads as all-zero totals, never an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    pub async fn today_log(&self, user_id: Uuid) -> AppResult<TodayLog> {
        self.today_log_on(user_id, Self::today()).await
    }

    /// Date-explicit form of [`Self::today_log`]
    ///
    /// # Errors
    ///
    /// See [`Self::today_log`]
    pub async fn today_log_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<TodayLog> {
        let ledger = self.store.ledger(user_id, date).await?;
        let calorie_goal = self.store.goal(user_id).await?;

        Ok(TodayLog {
            entries: ledger.entries,
            totals: ledger.totals,
            calorie_goal,
            step_count: ledger.step_count,
            burned_calories: ledger.burned_calories,
        })
    }

    /// Daily totals for the trailing history window, ascending by date
    ///
    /// `range_days` of `None` uses the configured default window. Only days
    /// with a ledger appear.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    pub async fn history(
        &self,
        user_id: Uuid,
        range_days: Option<u32>,
    ) -> AppResult<Vec<HistoryDay>> {
        self.history_ending(user_id, Self::today(), range_days).await
    }

    /// Date-explicit form of [`Self::history`]: the window ends at `end`
    /// inclusive
    ///
    /// # Errors
    ///
    /// See [`Self::history`]
    pub async fn history_ending(
        &self,
        user_id: Uuid,
        end: NaiveDate,
        range_days: Option<u32>,
    ) -> AppResult<Vec<HistoryDay>> {
        let days = range_days.unwrap_or(self.history_days).max(1);
        let from = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);

        let ledgers = self.store.history(user_id, from, end).await?;
        Ok(ledgers
            .into_iter()
            .map(|ledger| HistoryDay {
                date: ledger.date,
                totals: ledger.totals,
            })
            .collect())
    }

    /// Percent-to-goal for today's totals
    ///
    /// # Errors
    ///
    /// Returns `GoalNotSet` when the user has no goal
    pub async fn daily_progress(&self, user_id: Uuid) -> AppResult<ProgressReport> {
        self.daily_progress_on(user_id, Self::today()).await
    }

    /// Date-explicit form of [`Self::daily_progress`]
    ///
    /// # Errors
    ///
    /// See [`Self::daily_progress`]
    pub async fn daily_progress_on(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<ProgressReport> {
        let goal = self.goal(user_id).await?;
        let ledger = self.store.ledger(user_id, date).await?;

        Ok(ProgressReport {
            progress: daily_progress(&ledger.totals, &goal),
            totals: ledger.totals,
            goal,
        })
    }
}
