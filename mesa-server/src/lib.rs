//! Mesa edge server — restaurant reservation core
//!
//! Library surface consumed by the HTTP transport layer:
//! [`Config`] + [`DbService`] bootstrap the SQLite store, and
//! [`ReservationService`] exposes the booking operations.

pub mod config;
pub mod db;
pub mod services;
pub mod utils;

pub use config::Config;
pub use db::DbService;
pub use services::ReservationService;
