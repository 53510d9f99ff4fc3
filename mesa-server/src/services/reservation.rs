//! Reservation Service
//!
//! Orchestrates the booking rules over the repository layer: time-window
//! validation, slot-conflict checks, and the status lifecycle. Holds no
//! state beyond the injected pool and business timezone; every operation is
//! a self-contained call scoped by the caller's `restaurant_id`.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::repository::{area, dining_table, reservation, RepoError};
use crate::utils::validation::{
    self, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::{time, AppError, AppResult};
use shared::models::{
    ReservationCreate, ReservationDetail, ReservationListQuery, ReservationStatus,
    ReservationStatusUpdate, ReservationUpdate,
};
use shared::response::PaginatedResponse;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Reservation booking and query service
#[derive(Clone)]
pub struct ReservationService {
    pool: SqlitePool,
    timezone: Tz,
    upcoming_days: u32,
}

impl ReservationService {
    pub fn new(pool: SqlitePool, timezone: Tz) -> Self {
        Self {
            pool,
            timezone,
            upcoming_days: 7,
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            timezone: config.timezone,
            upcoming_days: config.default_upcoming_days,
        }
    }

    /// Current instant in the restaurant's business timezone.
    fn local_now(&self) -> DateTime<Tz> {
        chrono::Utc::now().with_timezone(&self.timezone)
    }

    /// Book a reservation.
    ///
    /// Status defaults to `pending`; the slot must be in the future and, for
    /// seated bookings, free of other active reservations.
    pub async fn create(
        &self,
        restaurant_id: &str,
        mut data: ReservationCreate,
    ) -> AppResult<ReservationDetail> {
        validation::validate_required_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validation::validate_optional_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        validation::validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        validation::validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
        if let Some(size) = data.party_size {
            validation::validate_party_size(size)?;
        }

        let status = data.status.unwrap_or_default();
        if status.is_terminal() {
            return Err(AppError::with_message(
                shared::ErrorCode::InvalidCreationStatus,
                format!("Reservations cannot be created as '{}'", status.as_str()),
            ));
        }

        time::validate_future_slot(data.reservation_date, Some(data.start_time), self.local_now())?;

        if let Some(table_id) = data.table_id {
            let table = dining_table::find_by_id(&self.pool, restaurant_id, table_id)
                .await?
                .ok_or_else(|| AppError::table_not_found(table_id))?;
            // Seated bookings inherit the table's area unless one was given.
            if data.area_id.is_none() {
                data.area_id = table.area_id;
            }
        }
        if let Some(area_id) = data.area_id {
            area::find_by_id(&self.pool, restaurant_id, area_id)
                .await?
                .ok_or_else(|| AppError::area_not_found(area_id))?;
        }

        let (table_id, date, start_time) = (data.table_id, data.reservation_date, data.start_time);
        if let Some(table_id) = table_id {
            self.ensure_slot_free(restaurant_id, table_id, date, start_time, None)
                .await?;
        }

        match reservation::create(&self.pool, restaurant_id, data).await {
            Ok(created) => {
                tracing::info!(
                    "Reservation {} created for {} on {} at {}",
                    created.reservation.id,
                    created.table_name.as_deref().unwrap_or("unseated"),
                    date,
                    start_time.format("%H:%M"),
                );
                Ok(created)
            }
            // A concurrent booking won the slot between the check and the
            // insert; the unique index reports it.
            Err(RepoError::Duplicate(_)) => {
                Err(slot_occupied(table_id, date, start_time))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Partially update a reservation.
    ///
    /// Status changes go through the lifecycle; moving the slot re-runs the
    /// time-window and conflict checks, excluding the reservation itself.
    pub async fn update(
        &self,
        restaurant_id: &str,
        id: i64,
        data: ReservationUpdate,
    ) -> AppResult<ReservationDetail> {
        if let Some(name) = &data.customer_name {
            validation::validate_required_text(name, "customer_name", MAX_NAME_LEN)?;
        }
        validation::validate_optional_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        validation::validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        validation::validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
        if let Some(size) = data.party_size {
            validation::validate_party_size(size)?;
        }

        let current = reservation::find_by_id(&self.pool, restaurant_id, id)
            .await?
            .ok_or_else(|| AppError::reservation_not_found(id))?
            .reservation;

        if let Some(next) = data.status
            && next != current.status
            && !current.status.can_transition_to(next)
        {
            return Err(AppError::invalid_transition(
                current.status.as_str(),
                next.as_str(),
            ));
        }

        if let Some(table_id) = data.table_id {
            dining_table::find_by_id(&self.pool, restaurant_id, table_id)
                .await?
                .ok_or_else(|| AppError::table_not_found(table_id))?;
        }
        if let Some(area_id) = data.area_id {
            area::find_by_id(&self.pool, restaurant_id, area_id)
                .await?
                .ok_or_else(|| AppError::area_not_found(area_id))?;
        }

        // Merged slot after the partial update.
        let table_id = data.table_id.or(current.table_id);
        let date = data.reservation_date.unwrap_or(current.reservation_date);
        let start_time = data.start_time.unwrap_or(current.start_time);
        let slot_changed =
            data.table_id.is_some() || data.reservation_date.is_some() || data.start_time.is_some();

        if slot_changed {
            if data.reservation_date.is_some() || data.start_time.is_some() {
                time::validate_future_slot(date, Some(start_time), self.local_now())?;
            }
            if let Some(table_id) = table_id {
                self.ensure_slot_free(restaurant_id, table_id, date, start_time, Some(id))
                    .await?;
            }
        }

        match reservation::update(&self.pool, restaurant_id, id, &data).await {
            Ok(updated) => {
                if let Some(next) = data.status
                    && next != current.status
                {
                    tracing::info!(
                        "Reservation {} status {} -> {}",
                        id,
                        current.status.as_str(),
                        next.as_str()
                    );
                }
                Ok(updated)
            }
            Err(RepoError::Duplicate(_)) => Err(slot_occupied(table_id, date, start_time)),
            Err(RepoError::NotFound(_)) => Err(AppError::reservation_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Status-only update, subject to the same lifecycle check.
    pub async fn update_status(
        &self,
        restaurant_id: &str,
        id: i64,
        data: ReservationStatusUpdate,
    ) -> AppResult<ReservationDetail> {
        let Some(status) = data.status else {
            return Err(AppError::required_field("status"));
        };
        self.update(
            restaurant_id,
            id,
            ReservationUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    /// Administrative hard removal; no lifecycle precondition.
    pub async fn delete(&self, restaurant_id: &str, id: i64) -> AppResult<()> {
        match reservation::delete(&self.pool, restaurant_id, id).await {
            Ok(()) => {
                tracing::info!("Reservation {} deleted", id);
                Ok(())
            }
            Err(RepoError::NotFound(_)) => Err(AppError::reservation_not_found(id)),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_by_id(&self, restaurant_id: &str, id: i64) -> AppResult<ReservationDetail> {
        reservation::find_by_id(&self.pool, restaurant_id, id)
            .await?
            .ok_or_else(|| AppError::reservation_not_found(id))
    }

    /// Paginated, filtered listing ordered by `(reservation_date, start_time)`.
    ///
    /// `page`/`limit` default to 1/20; a page past the end returns an empty
    /// item list with the exact total.
    pub async fn list(
        &self,
        restaurant_id: &str,
        query: ReservationListQuery,
    ) -> AppResult<PaginatedResponse<ReservationDetail>> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let offset = (page as u64 - 1) * limit as u64;

        let total = reservation::count(&self.pool, restaurant_id, &query.filter).await?;
        let items =
            reservation::list(&self.pool, restaurant_id, &query.filter, limit, offset).await?;
        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    /// Every reservation on the restaurant-local current date.
    pub async fn list_today(&self, restaurant_id: &str) -> AppResult<Vec<ReservationDetail>> {
        let today = self.local_now().date_naive();
        Ok(reservation::find_by_date(&self.pool, restaurant_id, today).await?)
    }

    /// Active reservations from today through `days` ahead (inclusive);
    /// `days` defaults to the configured window.
    pub async fn list_upcoming(
        &self,
        restaurant_id: &str,
        days: Option<u32>,
    ) -> AppResult<Vec<ReservationDetail>> {
        let days = days.unwrap_or(self.upcoming_days);
        let (from, to) = time::upcoming_window(self.local_now(), days);
        Ok(reservation::find_active_in_window(&self.pool, restaurant_id, from, to).await?)
    }

    async fn ensure_slot_free(
        &self,
        restaurant_id: &str,
        table_id: i64,
        date: NaiveDate,
        start_time: NaiveTime,
        exclude: Option<i64>,
    ) -> AppResult<()> {
        if reservation::find_conflicting(&self.pool, restaurant_id, table_id, date, start_time, exclude)
            .await?
        {
            tracing::debug!(
                "Slot conflict: table {} on {} at {}",
                table_id,
                date,
                start_time.format("%H:%M")
            );
            return Err(slot_occupied(Some(table_id), date, start_time));
        }
        Ok(())
    }
}

fn slot_occupied(table_id: Option<i64>, date: NaiveDate, time: NaiveTime) -> AppError {
    AppError::slot_occupied(
        table_id.unwrap_or_default(),
        date.to_string(),
        time.format("%H:%M").to_string(),
    )
}
