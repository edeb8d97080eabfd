// ABOUTME: Shared test support: scripted meal estimators and service wiring
// ABOUTME: Used by the integration test suites in this directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![allow(dead_code)]

use mealtrack_server::errors::{AppError, AppResult};
use mealtrack_server::estimator::{normalize_meal_text, MealEstimator};
use mealtrack_server::models::MacroTotals;
use mealtrack_server::services::NutritionService;
use mealtrack_server::storage::InMemoryStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Builds a macro breakdown literal
pub fn macros(calories: f64, protein: f64, carbs: f64, fats: f64) -> MacroTotals {
    MacroTotals {
        calories,
        protein,
        carbs,
        fats,
    }
}

/// Estimator returning scripted breakdowns per normalized meal text,
/// counting external calls
pub struct ScriptedEstimator {
    responses: HashMap<String, MacroTotals>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedEstimator {
    pub fn new(responses: impl IntoIterator<Item = (&'static str, MacroTotals)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(text, estimate)| (normalize_meal_text(text), estimate))
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Counter handle that stays observable after the estimator is moved
    /// into a cache wrapper
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl MealEstimator for ScriptedEstimator {
    async fn estimate(&self, meal_text: &str) -> AppResult<MacroTotals> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(&normalize_meal_text(meal_text))
            .copied()
            .ok_or_else(|| AppError::estimation_failed("no scripted response for this meal"))
    }
}

/// Estimator that always fails, for upstream-outage scenarios
pub struct FailingEstimator;

#[async_trait::async_trait]
impl MealEstimator for FailingEstimator {
    async fn estimate(&self, _meal_text: &str) -> AppResult<MacroTotals> {
        Err(AppError::estimation_failed("estimator unavailable"))
    }
}

/// Service over a fresh in-memory store and the given estimator
pub fn service_with(estimator: Arc<dyn MealEstimator>) -> NutritionService {
    NutritionService::new(Arc::new(InMemoryStore::new()), estimator, 7)
}
