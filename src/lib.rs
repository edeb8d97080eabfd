// ABOUTME: Main library entry point for the Mealtrack nutrition API core
// ABOUTME: Daily meal ledger, AI macro estimation, and calorie goal computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![deny(unsafe_code)]

//! # Mealtrack Server Core
//!
//! The nutrition-tracking engine behind the Mealtrack mobile app: users
//! describe meals, receive AI-estimated macronutrient breakdowns, and track
//! progress against a computed daily calorie/macro goal.
//!
//! ## Architecture
//!
//! - **Models**: strict structured records for entries, ledgers, and goals
//! - **Ledger**: per-user, per-day aggregate maintenance with invariant
//!   `totals == sum(entries) − burned calories` across every mutation
//! - **Goal calculator**: deterministic Mifflin-St Jeor target derivation
//! - **Step sync**: delta-based calorie-burn application, idempotent under
//!   replayed cumulative reports
//! - **Estimator**: text-to-nutrition collaborator with a bounded
//!   memoization layer
//! - **Storage**: pluggable persistence seam; mutations serialize per
//!   (user, day)
//! - **Services**: protocol-agnostic facade the hosting transport calls
//!
//! Authentication, HTTP routing, image storage, and barcode lookup are the
//! hosting application's concern; this crate carries the data model,
//! invariants, and algorithms they compose.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealtrack_server::config::ServerConfig;
//! use mealtrack_server::estimator::{CachedEstimator, OpenRouterEstimator};
//! use mealtrack_server::services::NutritionService;
//! use mealtrack_server::storage::InMemoryStore;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), mealtrack_server::errors::AppError> {
//! let config = ServerConfig::from_env();
//! let estimator = CachedEstimator::new(
//!     OpenRouterEstimator::new(&config.estimator)?,
//!     &config.estimate_cache,
//! );
//! let service = NutritionService::new(
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(estimator),
//!     config.history_days,
//! );
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

/// Configuration management and environment parsing
pub mod config;

/// Application constants and formula coefficients
pub mod constants;

/// Unified error handling system with standard error codes and HTTP statuses
pub mod errors;

/// Meal estimation: external collaborator trait, client, and cache
pub mod estimator;

/// Calorie/macro goal computation from biometric inputs
pub mod goal_calculator;

/// Daily ledger aggregate-maintenance engine
pub mod ledger;

/// Production logging and structured output
pub mod logging;

/// Common data models for entries, ledgers, goals, and progress
pub mod models;

/// Read-only percent-to-goal progress reporting
pub mod progress;

/// Domain service layer for protocol-agnostic business logic
pub mod services;

/// Delta-based step-to-calorie-burn adjustment
pub mod step_sync;

/// Persistence seam for ledgers and goals
pub mod storage;
