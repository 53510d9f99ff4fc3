//! Service layer
//!
//! - [`ReservationService`] - booking rules and reservation queries

pub mod reservation;

pub use reservation::ReservationService;
