//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the platform, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an error for a missing required field
    pub fn required_field(field: impl Into<String>) -> Self {
        let f = field.into();
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", f))
            .with_detail("field", f)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a reservation not found error
    pub fn reservation_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::ReservationNotFound, format!("Reservation {} not found", id))
            .with_detail("reservation_id", id)
    }

    /// Create a dining table not found error
    pub fn table_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::TableNotFound, format!("Dining table {} not found", id))
            .with_detail("table_id", id)
    }

    /// Create an area not found error
    pub fn area_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::AreaNotFound, format!("Area {} not found", id))
            .with_detail("area_id", id)
    }

    /// Create a slot conflict error (double-booking attempt)
    pub fn slot_occupied(table_id: i64, date: impl Into<String>, time: impl Into<String>) -> Self {
        let (date, time) = (date.into(), time.into());
        Self::with_message(
            ErrorCode::SlotOccupied,
            format!("Table {} is already reserved on {} at {}", table_id, date, time),
        )
        .with_detail("table_id", table_id)
        .with_detail("date", date)
        .with_detail("time", time)
    }

    /// Create an illegal status transition error
    pub fn invalid_transition(from: &str, to: &str) -> Self {
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot change reservation status from '{}' to '{}'", from, to),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    /// Create a past date error
    pub fn past_date(date: impl Into<String>) -> Self {
        let d = date.into();
        Self::with_message(ErrorCode::PastDate, format!("Cannot book a past date: {}", d))
            .with_detail("date", d)
    }

    /// Create a past time error
    pub fn past_time(time: impl Into<String>) -> Self {
        let t = time.into();
        Self::with_message(ErrorCode::PastTime, format!("Cannot book a past time today: {}", t))
            .with_detail("time", t)
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::AlreadyExists, format!("{} already exists", r))
            .with_detail("resource", r)
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Unified API response envelope
///
/// Serialized for the surrounding HTTP layer; `code` is 0 on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 = success)
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response
    pub fn ok(data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            message: ErrorCode::Success.message().to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create an error response from an [`AppError`]
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}
