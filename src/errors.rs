// ABOUTME: Unified error handling with standard error codes and HTTP response formatting
// ABOUTME: Defines the validation, resource, external-service, and internal error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Error taxonomy
//!
//! Every fallible operation in the core returns [`AppError`], which carries
//! a stable [`ErrorCode`] so the hosting transport maps failures to HTTP
//! statuses without string matching. Codes are grouped by numeric range;
//! the wire names are SCREAMING_SNAKE via serde renames.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stable error codes grouped by numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // 3000-3999: input validation
    #[serde(rename = "INVALID_GOAL_INPUT")]
    InvalidGoalInput = 3000,
    #[serde(rename = "INVALID_ENTRY")]
    InvalidEntry = 3001,
    #[serde(rename = "INVALID_STEP_COUNT")]
    InvalidStepCount = 3002,

    // 4000-4999: missing resources
    #[serde(rename = "ENTRY_NOT_FOUND")]
    EntryNotFound = 4000,
    #[serde(rename = "GOAL_NOT_SET")]
    GoalNotSet = 4001,

    // 5000-5999: external collaborators
    #[serde(rename = "ESTIMATION_FAILED")]
    EstimationFailed = 5000,

    // 6000-6999: configuration
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6000,

    // 9000-9999: internal faults
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// HTTP status this code maps to at the transport boundary
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidGoalInput | Self::InvalidEntry | Self::InvalidStepCount => 400,
            Self::EntryNotFound | Self::GoalNotSet => 404,
            Self::EstimationFailed => 502,
            Self::ConfigMissing | Self::InternalError => 500,
        }
    }

    /// Short human-readable summary, independent of the specific failure
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::InvalidGoalInput => "Invalid biometric input for goal computation",
            Self::InvalidEntry => "Invalid meal entry",
            Self::InvalidStepCount => "Invalid step count",
            Self::EntryNotFound => "Meal entry not found",
            Self::GoalNotSet => "No calorie goal set for this user",
            Self::EstimationFailed => "Meal estimation failed",
            Self::ConfigMissing => "Missing required configuration",
            Self::InternalError => "Internal error",
        }
    }
}

/// Application error: a stable code, a message, and optional trace context
#[derive(Debug, Error)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Request correlation id, when the transport provided one
    pub request_id: Option<String>,
    /// User the failing operation acted for
    pub user_id: Option<Uuid>,
    /// Structured payload with failure specifics
    pub details: Option<serde_json::Value>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
            user_id: None,
            details: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.summary(), self.message)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape the transport serializes for a failed request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<AppError> for ErrorBody {
    fn from(error: AppError) -> Self {
        Self {
            code: error.code,
            status: error.code.http_status(),
            message: error.message,
            request_id: error.request_id,
            details: error.details,
        }
    }
}

/// Constructors for the domain taxonomy
impl AppError {
    /// Malformed or out-of-range biometric input
    pub fn invalid_goal_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidGoalInput, message)
    }

    /// Malformed meal entry (blank text, negative or non-finite values)
    pub fn invalid_entry(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidEntry, message)
    }

    /// Malformed step count report
    pub fn invalid_step_count(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidStepCount, message)
    }

    /// Meal entry index out of range for the day's ledger
    pub fn entry_not_found(index: usize) -> Self {
        Self::new(
            ErrorCode::EntryNotFound,
            format!("Meal entry not found at index {index}"),
        )
    }

    /// Meal entry id no longer present in the day's ledger
    pub fn entry_not_found_by_id(id: Uuid) -> Self {
        Self::new(ErrorCode::EntryNotFound, format!("Meal entry {id} not found"))
    }

    /// Goal-dependent operation requested before any goal exists
    pub fn goal_not_set(user_id: Uuid) -> Self {
        Self::new(ErrorCode::GoalNotSet, "Goal not set").with_user_id(user_id)
    }

    /// External estimator unreachable, timed out, or returned garbage
    pub fn estimation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EstimationFailed, message)
    }

    /// Required configuration absent (e.g. no estimator API key)
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Unexpected internal fault
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::InvalidEntry.http_status(), 400);
        assert_eq!(ErrorCode::InvalidStepCount.http_status(), 400);
        assert_eq!(ErrorCode::EntryNotFound.http_status(), 404);
        assert_eq!(ErrorCode::GoalNotSet.http_status(), 404);
        assert_eq!(ErrorCode::EstimationFailed.http_status(), 502);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_builder_context() {
        let error = AppError::goal_not_set(Uuid::new_v4()).with_request_id("req-123");

        assert_eq!(error.code, ErrorCode::GoalNotSet);
        assert_eq!(error.request_id.as_deref(), Some("req-123"));
        assert!(error.user_id.is_some());
    }

    #[test]
    fn test_error_body_wire_shape() {
        let body = ErrorBody::from(AppError::entry_not_found(5));

        assert_eq!(body.status, 404);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("ENTRY_NOT_FOUND"));
        assert!(json.contains("index 5"));
        assert!(!json.contains("requestId"));
    }
}
