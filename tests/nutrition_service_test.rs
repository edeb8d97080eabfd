// ABOUTME: End-to-end tests for the nutrition service boundary operations
// ABOUTME: Meal logging, goals, progress, history windows, and concurrent writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![allow(clippy::unwrap_used)]

mod common;

use chrono::NaiveDate;
use common::{macros, service_with, FailingEstimator, ScriptedEstimator};
use mealtrack_server::errors::ErrorCode;
use mealtrack_server::models::{
    ActivityLevel, BiometricProfile, Gender, GoalType, MealEntryInput,
};
use mealtrack_server::services::NutritionService;
use mealtrack_server::storage::InMemoryStore;
use std::sync::Arc;
use uuid::Uuid;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn moderate_male_profile() -> BiometricProfile {
    BiometricProfile {
        gender: Gender::Male,
        age: 21,
        height_cm: 170.0,
        weight_kg: 65.0,
        activity_level: ActivityLevel::Moderate,
        goal_type: GoalType::Maintain,
    }
}

// =============================================================================
// Meal logging
// =============================================================================

#[tokio::test]
async fn test_add_meal_estimates_and_returns_updated_day() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "chicken and rice",
        macros(500.0, 30.0, 40.0, 10.0),
    )]));
    let service = service_with(estimator.clone());
    let user = Uuid::new_v4();

    let added = service
        .add_meal_entry_on(user, day(), "Chicken and Rice")
        .await
        .unwrap();

    // The entry keeps the user's original text; normalization is an
    // estimator-side concern
    assert_eq!(added.entry.meal_text, "Chicken and Rice");
    assert_eq!(added.entry.calories, 500.0);
    assert_eq!(added.ledger.totals.protein, 30.0);
    assert!(added.goal.is_none());
    assert_eq!(estimator.call_count(), 1);
}

#[tokio::test]
async fn test_blank_meal_text_rejected_without_estimator_call() {
    let estimator = Arc::new(ScriptedEstimator::new([]));
    let service = service_with(estimator.clone());
    let user = Uuid::new_v4();

    let err = service
        .add_meal_entry_on(user, day(), "   ")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidEntry);
    assert_eq!(estimator.call_count(), 0);
}

#[tokio::test]
async fn test_estimation_failure_leaves_ledger_untouched() {
    let service = service_with(Arc::new(FailingEstimator));
    let user = Uuid::new_v4();

    let err = service
        .add_meal_entry_on(user, day(), "mystery casserole")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EstimationFailed);

    let log = service.today_log_on(user, day()).await.unwrap();
    assert!(log.entries.is_empty());
    assert_eq!(log.totals.calories, 0.0);
}

#[tokio::test]
async fn test_edit_and_delete_through_service() {
    let estimator = Arc::new(ScriptedEstimator::new([
        ("oatmeal", macros(350.0, 12.0, 60.0, 7.0)),
        ("coffee", macros(5.0, 0.0, 1.0, 0.0)),
    ]));
    let service = service_with(estimator);
    let user = Uuid::new_v4();

    service.add_meal_entry_on(user, day(), "oatmeal").await.unwrap();
    service.add_meal_entry_on(user, day(), "coffee").await.unwrap();

    let ledger = service
        .edit_meal_entry(
            user,
            day(),
            0,
            MealEntryInput::from_estimate("oatmeal with honey", macros(420.0, 12.0, 78.0, 7.0)),
        )
        .await
        .unwrap();
    assert_eq!(ledger.totals.calories, 425.0);

    let ledger = service.delete_meal_entry(user, day(), 1).await.unwrap();
    assert_eq!(ledger.entries.len(), 1);
    assert_eq!(ledger.entries[0].meal_text, "oatmeal with honey");
    assert_eq!(ledger.totals.calories, 420.0);
}

// =============================================================================
// Goals and progress
// =============================================================================

#[tokio::test]
async fn test_set_goal_then_read_back() {
    let service = service_with(Arc::new(ScriptedEstimator::new([])));
    let user = Uuid::new_v4();

    let goal = service.set_goal(user, moderate_male_profile()).await.unwrap();
    assert_eq!(goal.targets.target_calories, 2499);
    assert_eq!(goal.targets.protein_goal, 130);

    let read_back = service.goal(user).await.unwrap();
    assert_eq!(read_back, goal);
}

#[tokio::test]
async fn test_goal_unset_errors() {
    let service = service_with(Arc::new(ScriptedEstimator::new([])));
    let user = Uuid::new_v4();

    let err = service.goal(user).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GoalNotSet);

    let err = service.daily_progress_on(user, day()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GoalNotSet);
}

#[tokio::test]
async fn test_daily_progress_at_half_of_goal() {
    // Targets for this profile: 2499 kcal / 130 p / 340 c / 69 f
    let estimator = Arc::new(ScriptedEstimator::new([(
        "big lunch",
        macros(1249.5, 65.0, 170.0, 34.5),
    )]));
    let service = service_with(estimator);
    let user = Uuid::new_v4();

    service.set_goal(user, moderate_male_profile()).await.unwrap();
    service.add_meal_entry_on(user, day(), "big lunch").await.unwrap();

    let report = service.daily_progress_on(user, day()).await.unwrap();
    assert_eq!(report.progress.calories, 50);
    assert_eq!(report.progress.protein, 50);
    assert_eq!(report.progress.carbs, 50);
    assert_eq!(report.progress.fats, 50);
    assert_eq!(report.goal.targets.target_calories, 2499);
}

#[tokio::test]
async fn test_progress_clamps_at_100_percent() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "feast",
        macros(6000.0, 300.0, 700.0, 200.0),
    )]));
    let service = service_with(estimator);
    let user = Uuid::new_v4();

    service.set_goal(user, moderate_male_profile()).await.unwrap();
    service.add_meal_entry_on(user, day(), "feast").await.unwrap();

    let report = service.daily_progress_on(user, day()).await.unwrap();
    assert_eq!(report.progress.calories, 100);
    assert_eq!(report.progress.protein, 100);
    assert_eq!(report.progress.carbs, 100);
    assert_eq!(report.progress.fats, 100);
}

// =============================================================================
// Day views and history
// =============================================================================

#[tokio::test]
async fn test_today_log_for_fresh_day_is_all_zero() {
    let service = service_with(Arc::new(ScriptedEstimator::new([])));
    let user = Uuid::new_v4();

    let log = service.today_log_on(user, day()).await.unwrap();
    assert!(log.entries.is_empty());
    assert_eq!(log.totals.calories, 0.0);
    assert!(log.calorie_goal.is_none());
    assert_eq!(log.step_count, 0);
    assert_eq!(log.burned_calories, 0.0);
}

#[tokio::test]
async fn test_history_window_is_inclusive_ascending_and_sparse() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "meal",
        macros(400.0, 20.0, 40.0, 12.0),
    )]));
    let service = service_with(estimator);
    let user = Uuid::new_v4();

    // Days 1 and 3 fall outside a 7-day window ending on day 10
    for d in [1, 3, 4, 8, 10] {
        service.add_meal_entry_on(user, date(d), "meal").await.unwrap();
    }

    let history = service.history_ending(user, date(10), None).await.unwrap();
    let dates: Vec<NaiveDate> = history.iter().map(|day| day.date).collect();
    assert_eq!(dates, vec![date(4), date(8), date(10)]);
    assert_eq!(history[0].totals.calories, 400.0);
}

#[tokio::test]
async fn test_history_range_override() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "meal",
        macros(400.0, 20.0, 40.0, 12.0),
    )]));
    let service = service_with(estimator);
    let user = Uuid::new_v4();

    for d in [8, 9, 10] {
        service.add_meal_entry_on(user, date(d), "meal").await.unwrap();
    }

    let history = service
        .history_ending(user, date(10), Some(2))
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, date(9));
    assert_eq!(history[1].date, date(10));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_to_one_day_all_land() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "protein shake",
        macros(220.0, 30.0, 10.0, 4.0),
    )]));
    let service = Arc::new(NutritionService::new(
        Arc::new(InMemoryStore::new()),
        estimator,
        7,
    ));
    let user = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.add_meal_entry_on(user, day(), "protein shake").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let log = service.today_log_on(user, day()).await.unwrap();
    assert_eq!(log.entries.len(), 8);
    assert_eq!(log.totals.calories, 8.0 * 220.0);
    assert_eq!(log.totals.protein, 8.0 * 30.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_steps_and_meals_keep_invariants() {
    let estimator = Arc::new(ScriptedEstimator::new([(
        "snack",
        macros(180.0, 6.0, 20.0, 8.0),
    )]));
    let service = Arc::new(NutritionService::new(
        Arc::new(InMemoryStore::new()),
        estimator,
        7,
    ));
    let user = Uuid::new_v4();

    let meals = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            for _ in 0..5 {
                service.add_meal_entry_on(user, day(), "snack").await.unwrap();
            }
        })
    };
    let steps = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            for reported in [1000_i64, 2000, 3000] {
                service.log_steps_on(user, day(), reported).await.unwrap();
            }
        })
    };
    meals.await.unwrap();
    steps.await.unwrap();

    let log = service.today_log_on(user, day()).await.unwrap();
    assert_eq!(log.entries.len(), 5);
    assert_eq!(log.step_count, 3000);
    assert_eq!(log.burned_calories, 120.0);
    assert_eq!(log.totals.calories, 5.0 * 180.0 - 120.0);
}
