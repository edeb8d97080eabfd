// ABOUTME: Domain service layer exposing the nutrition boundary operations
// ABOUTME: Protocol-agnostic facade reusable from any transport hosting the core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Domain service layer
//!
//! Business logic lives here rather than in transport handlers, so the same
//! operations back whatever REST layer (or test harness) hosts the crate.

/// Meal logging, step sync, goals, progress, and history
pub mod nutrition;

pub use nutrition::NutritionService;
