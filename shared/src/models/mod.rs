//! Data models
//!
//! Shared between the edge server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod area;
pub mod dining_table;
pub mod reservation;

// Re-exports
pub use area::*;
pub use dining_table::*;
pub use reservation::*;
