//! Unified error codes for the Mesa reservation platform
//!
//! Error codes are shared between the edge server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 4xxx: Reservation errors
//! - 7xxx: Table / area errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not selected
    TenantNotSelected = 3001,
    /// Tenant not found
    TenantNotFound = 3002,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation date is in the past
    PastDate = 4002,
    /// Reservation time is in the past
    PastTime = 4003,
    /// Another active reservation occupies the slot
    SlotOccupied = 4004,
    /// Illegal reservation status transition
    InvalidStatusTransition = 4005,
    /// Reservations can only be created as pending or confirmed
    InvalidCreationStatus = 4006,

    // ==================== 7xxx: Table / Area ====================
    /// Dining table not found
    TableNotFound = 7001,
    /// Area not found
    AreaNotFound = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",
            Self::NotAuthenticated => "Not authenticated",
            Self::PermissionDenied => "Permission denied",
            Self::TenantNotSelected => "Tenant not selected",
            Self::TenantNotFound => "Tenant not found",
            Self::ReservationNotFound => "Reservation not found",
            Self::PastDate => "Reservation date is in the past",
            Self::PastTime => "Reservation time is in the past",
            Self::SlotOccupied => "Table is already reserved for this slot",
            Self::InvalidStatusTransition => "Illegal reservation status transition",
            Self::InvalidCreationStatus => {
                "Reservations can only be created as pending or confirmed"
            }
            Self::TableNotFound => "Dining table not found",
            Self::AreaNotFound => "Area not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }

    /// Get the category of this error code
    pub fn category(&self) -> super::ErrorCategory {
        super::ErrorCategory::from_code(self.value())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.value())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,
            1001 => Self::NotAuthenticated,
            2001 => Self::PermissionDenied,
            3001 => Self::TenantNotSelected,
            3002 => Self::TenantNotFound,
            4001 => Self::ReservationNotFound,
            4002 => Self::PastDate,
            4003 => Self::PastTime,
            4004 => Self::SlotOccupied,
            4005 => Self::InvalidStatusTransition,
            4006 => Self::InvalidCreationStatus,
            7001 => Self::TableNotFound,
            7002 => Self::AreaNotFound,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
