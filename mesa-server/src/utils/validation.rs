//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are applied
//! at the service boundary.

use super::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer and entity names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers and similar
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Notes and special requests
pub const MAX_NOTE_LEN: usize = 500;

/// Largest party a single reservation may seat
pub const MAX_PARTY_SIZE: i32 = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate the party size of a booking request.
pub fn validate_party_size(size: i32) -> Result<(), AppError> {
    if !(1..=MAX_PARTY_SIZE).contains(&size) {
        return Err(AppError::with_message(
            shared::ErrorCode::ValueOutOfRange,
            format!("party_size must be between 1 and {MAX_PARTY_SIZE}, got {size}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("Ana", "customer_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "customer_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "customer_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_absent() {
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(501)), "note", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn party_size_bounds() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(101).is_err());
    }
}
