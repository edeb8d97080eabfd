// ABOUTME: Configuration management for the Mealtrack core
// ABOUTME: Environment-variable driven, typed config structs with constant-backed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Configuration management
//!
//! Environment-only configuration: every knob has a default from
//! [`crate::constants::defaults`] and can be overridden by the variables
//! named in [`crate::constants::env_names`]. Invalid numeric values fall
//! back to their defaults with a warning rather than aborting startup.

/// Environment-based configuration parsing
pub mod environment;

pub use environment::{Environment, EstimateCacheConfig, EstimatorConfig, ServerConfig};
