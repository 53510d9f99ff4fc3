//! Shared types for the Mesa reservation platform
//!
//! Common types used across crates: data models, the unified error
//! system, response envelopes, and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::{Pagination, PaginatedResponse};
