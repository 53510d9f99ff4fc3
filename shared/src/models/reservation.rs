//! Reservation Model
//!
//! The reservation status lifecycle lives here, next to its entity:
//! `pending` and `confirmed` reservations occupy a slot; `cancelled`,
//! `completed` and `no_show` are terminal and free it.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Reservation status
///
/// Stored as snake_case TEXT in SQLite and on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ReservationStatus {
    /// Active reservations occupy their (table, date, time) slot.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::NoShow)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Same-state transitions are not allowed; terminal states have no
    /// outgoing edges.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Pending, NoShow)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, NoShow)
        )
    }

    /// The snake_case wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,

    /// Owning tenant; resolved by the auth layer, scopes every operation
    pub restaurant_id: String,

    /// Assigned dining table (absent for unseated reservations)
    pub table_id: Option<i64>,

    /// Area preference / placement
    pub area_id: Option<i64>,

    /// Restaurant-local calendar date
    pub reservation_date: NaiveDate,

    /// Wall-clock start time on that date
    pub start_time: NaiveTime,

    #[serde(default)]
    pub status: ReservationStatus,

    // Customer contact details (opaque to the booking rules)
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,

    #[serde(default = "default_party_size")]
    pub party_size: i32,

    pub note: Option<String>,

    /// Unix timestamp millis
    pub created_at: i64,
    /// Unix timestamp millis, refreshed on every mutation
    pub updated_at: i64,
}

fn default_party_size() -> i32 {
    2
}

/// Reservation with resolved table / area names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub reservation: Reservation,
    pub table_name: Option<String>,
    pub area_name: Option<String>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub table_id: Option<i64>,
    pub area_id: Option<i64>,
    pub reservation_date: NaiveDate,
    pub start_time: NaiveTime,
    /// Defaults to `pending`; only `pending` / `confirmed` are accepted
    pub status: Option<ReservationStatus>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub party_size: Option<i32>,
    pub note: Option<String>,
}

/// Update reservation payload (partial merge; absent fields are untouched)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub table_id: Option<i64>,
    pub area_id: Option<i64>,
    pub reservation_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub status: Option<ReservationStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub party_size: Option<i32>,
    pub note: Option<String>,
}

/// Status-only update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: Option<ReservationStatus>,
}

/// Optional narrowing filters for reservation listings
///
/// Absent filters are not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub area_id: Option<i64>,
    pub table_id: Option<i64>,
}

/// Paginated listing request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,
    /// Page size, defaults to 20
    pub limit: Option<u32>,
    #[serde(flatten)]
    pub filter: ReservationFilter,
}
