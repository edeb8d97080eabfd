// ABOUTME: Structured logging setup on tracing-subscriber for the Mealtrack core
// ABOUTME: Env-driven level and format selection with production hardening defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Logging initialization
//!
//! The hosting application calls [`init_from_env`] once at startup. Level
//! comes from `RUST_LOG`, output shape from `LOG_FORMAT`; production
//! environments get source locations and span lifecycle events whether or
//! not they asked for them.

use crate::config::Environment;
use crate::constants::service_names;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output shape for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Machine-readable JSON, one object per line
    Json,
    /// Human-readable multi-line output for development
    #[default]
    Pretty,
    /// Single-line output for space-constrained environments
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

/// Resolved logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive string, e.g. `info` or `mealtrack_server=debug`
    pub level: String,
    pub format: LogFormat,
    /// Emit source file and line on each event
    pub include_location: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            environment: Environment::default(),
        }
    }
}

impl LoggingConfig {
    /// Build settings from `RUST_LOG`, `LOG_FORMAT`, and `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();
        let hardened = environment.is_production();

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            include_location: hardened || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: hardened || env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment,
        }
    }

    fn filter(&self) -> Result<EnvFilter> {
        // HTTP client internals stay at warn regardless of the base level
        let directives = format!("{},hyper=warn,reqwest=warn", self.level);
        EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid log filter {directives:?}"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Fails when the level string is not a valid filter directive or when a
    /// subscriber has already been installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.filter()?);
        let base = tracing_subscriber::fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Json => registry.with(base.json()).try_init()?,
            LogFormat::Pretty => registry.with(base).try_init()?,
            LogFormat::Compact => registry.with(base.compact().with_target(false)).try_init()?,
        }

        info!(
            service = service_names::MEALTRACK_SERVER,
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            level = %self.level,
            format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Install logging from environment variables
///
/// # Errors
///
/// See [`LoggingConfig::init`]
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("verbose".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_filter_rejects_garbage_directives() {
        let config = LoggingConfig {
            level: "not a [valid] directive!!".into(),
            ..LoggingConfig::default()
        };
        assert!(config.filter().is_err());
    }
}
