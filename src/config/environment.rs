// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed config with constant-backed fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use crate::constants::{defaults, env_names};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Environment type for runtime behavior selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// External meal-estimator endpoint configuration
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Chat-completions endpoint URL
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token for the estimation API; absent means estimation is
    /// unavailable and the estimator constructor fails with `ConfigMissing`
    pub api_key: Option<String>,
    /// Upper bound on a single estimation request
    pub timeout: Duration,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::ESTIMATOR_BASE_URL.to_owned(),
            model: defaults::ESTIMATOR_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(defaults::ESTIMATOR_TIMEOUT_SECS),
        }
    }
}

/// Meal-estimate cache sizing
#[derive(Debug, Clone)]
pub struct EstimateCacheConfig {
    /// Maximum cached estimates before LRU eviction
    pub max_entries: usize,
    /// Retention window for a cached estimate
    pub ttl: Duration,
}

impl Default for EstimateCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::ESTIMATE_CACHE_MAX_ENTRIES,
            ttl: Duration::from_secs(defaults::ESTIMATE_CACHE_TTL_SECS),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    pub estimator: EstimatorConfig,
    pub estimate_cache: EstimateCacheConfig,
    /// History window in days, including today
    pub history_days: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            estimator: EstimatorConfig::default(),
            estimate_cache: EstimateCacheConfig::default(),
            history_days: defaults::HISTORY_DAYS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        let estimator = EstimatorConfig {
            base_url: env::var(env_names::ESTIMATOR_BASE_URL)
                .unwrap_or_else(|_| defaults::ESTIMATOR_BASE_URL.to_owned()),
            model: env::var(env_names::ESTIMATOR_MODEL)
                .unwrap_or_else(|_| defaults::ESTIMATOR_MODEL.to_owned()),
            api_key: env::var(env_names::OPENROUTER_API_KEY).ok(),
            timeout: Duration::from_secs(env_parse_or(
                env_names::ESTIMATOR_TIMEOUT_SECS,
                defaults::ESTIMATOR_TIMEOUT_SECS,
            )),
        };

        let estimate_cache = EstimateCacheConfig {
            max_entries: env_parse_or(
                env_names::ESTIMATE_CACHE_MAX_ENTRIES,
                defaults::ESTIMATE_CACHE_MAX_ENTRIES,
            ),
            ttl: Duration::from_secs(env_parse_or(
                env_names::ESTIMATE_CACHE_TTL_SECS,
                defaults::ESTIMATE_CACHE_TTL_SECS,
            )),
        };

        Self {
            environment,
            estimator,
            estimate_cache,
            history_days: env_parse_or(env_names::HISTORY_DAYS, defaults::HISTORY_DAYS),
        }
    }
}

/// Parse an environment variable, falling back to a default with a warning
/// when the value is present but malformed
fn env_parse_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "Invalid value for environment variable, using default");
            default
        }),
        Err(_) => default,
    }
}
