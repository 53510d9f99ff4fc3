//! Reservation Repository
//!
//! Slot-conflict detection and the paginated query engine live here, next
//! to the writes they guard. The service layer's conflict pre-check is
//! advisory; the `idx_reservation_active_slot` partial unique index is what
//! makes concurrent double-bookings impossible, surfacing the losing write
//! as [`RepoError::Duplicate`].

use super::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveTime};
use shared::models::{ReservationCreate, ReservationDetail, ReservationFilter, ReservationUpdate};
use sqlx::SqlitePool;

/// Detail projection: reservation row plus resolved table / area names.
const SELECT_DETAIL: &str = "SELECT r.id, r.restaurant_id, r.table_id, r.area_id, r.reservation_date, r.start_time, r.status, r.customer_name, r.customer_phone, r.customer_email, r.party_size, r.note, r.created_at, r.updated_at, t.name AS table_name, a.name AS area_name FROM reservation r LEFT JOIN dining_table t ON t.id = r.table_id LEFT JOIN area a ON a.id = r.area_id";

pub async fn find_by_id(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
) -> RepoResult<Option<ReservationDetail>> {
    let sql = format!("{SELECT_DETAIL} WHERE r.id = ? AND r.restaurant_id = ?");
    let reservation = sqlx::query_as::<_, ReservationDetail>(&sql)
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

/// Page of reservations matching the filters, ordered by
/// `(reservation_date, start_time)` ascending regardless of insertion order.
pub async fn list(
    pool: &SqlitePool,
    restaurant_id: &str,
    filter: &ReservationFilter,
    limit: u32,
    offset: u64,
) -> RepoResult<Vec<ReservationDetail>> {
    let sql = format!(
        "{SELECT_DETAIL} WHERE r.restaurant_id = ?1 AND (?2 IS NULL OR r.reservation_date = ?2) AND (?3 IS NULL OR r.status = ?3) AND (?4 IS NULL OR r.area_id = ?4) AND (?5 IS NULL OR r.table_id = ?5) ORDER BY r.reservation_date ASC, r.start_time ASC LIMIT ?6 OFFSET ?7"
    );
    let reservations = sqlx::query_as::<_, ReservationDetail>(&sql)
        .bind(restaurant_id)
        .bind(filter.date)
        .bind(filter.status)
        .bind(filter.area_id)
        .bind(filter.table_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

/// Exact count of all rows matching the filters (not just one page).
pub async fn count(
    pool: &SqlitePool,
    restaurant_id: &str,
    filter: &ReservationFilter,
) -> RepoResult<u64> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation r WHERE r.restaurant_id = ?1 AND (?2 IS NULL OR r.reservation_date = ?2) AND (?3 IS NULL OR r.status = ?3) AND (?4 IS NULL OR r.area_id = ?4) AND (?5 IS NULL OR r.table_id = ?5)",
    )
    .bind(restaurant_id)
    .bind(filter.date)
    .bind(filter.status)
    .bind(filter.area_id)
    .bind(filter.table_id)
    .fetch_one(pool)
    .await?;
    Ok(total as u64)
}

/// All reservations on one date, every status.
pub async fn find_by_date(
    pool: &SqlitePool,
    restaurant_id: &str,
    date: NaiveDate,
) -> RepoResult<Vec<ReservationDetail>> {
    let sql = format!(
        "{SELECT_DETAIL} WHERE r.restaurant_id = ? AND r.reservation_date = ? ORDER BY r.reservation_date ASC, r.start_time ASC"
    );
    let reservations = sqlx::query_as::<_, ReservationDetail>(&sql)
        .bind(restaurant_id)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

/// Active reservations inside a closed date window.
pub async fn find_active_in_window(
    pool: &SqlitePool,
    restaurant_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<ReservationDetail>> {
    let sql = format!(
        "{SELECT_DETAIL} WHERE r.restaurant_id = ? AND r.reservation_date >= ? AND r.reservation_date <= ? AND r.status IN ('pending', 'confirmed') ORDER BY r.reservation_date ASC, r.start_time ASC"
    );
    let reservations = sqlx::query_as::<_, ReservationDetail>(&sql)
        .bind(restaurant_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

/// Whether another active reservation already occupies the slot.
///
/// Matches on exact start-time equality (fixed seating slots), not interval
/// overlap. `exclude` skips a reservation's own row so updates that keep
/// the current slot do not self-conflict.
pub async fn find_conflicting(
    pool: &SqlitePool,
    restaurant_id: &str,
    table_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    exclude: Option<i64>,
) -> RepoResult<bool> {
    let occupied: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE restaurant_id = ?1 AND table_id = ?2 AND reservation_date = ?3 AND start_time = ?4 AND status IN ('pending', 'confirmed') AND (?5 IS NULL OR id != ?5)",
    )
    .bind(restaurant_id)
    .bind(table_id)
    .bind(date)
    .bind(time)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    Ok(occupied > 0)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: &str,
    data: ReservationCreate,
) -> RepoResult<ReservationDetail> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let status = data.status.unwrap_or_default();
    let party_size = data.party_size.unwrap_or(2);

    sqlx::query(
        "INSERT INTO reservation (id, restaurant_id, table_id, area_id, reservation_date, start_time, status, customer_name, customer_phone, customer_email, party_size, note, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.table_id)
    .bind(data.area_id)
    .bind(data.reservation_date)
    .bind(data.start_time)
    .bind(status)
    .bind(data.customer_name)
    .bind(data.customer_phone)
    .bind(data.customer_email)
    .bind(party_size)
    .bind(data.note)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Partial-merge update; absent fields keep their stored value and
/// `updated_at` is always refreshed.
pub async fn update(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
    data: &ReservationUpdate,
) -> RepoResult<ReservationDetail> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET table_id = COALESCE(?1, table_id), area_id = COALESCE(?2, area_id), reservation_date = COALESCE(?3, reservation_date), start_time = COALESCE(?4, start_time), status = COALESCE(?5, status), customer_name = COALESCE(?6, customer_name), customer_phone = COALESCE(?7, customer_phone), customer_email = COALESCE(?8, customer_email), party_size = COALESCE(?9, party_size), note = COALESCE(?10, note), updated_at = ?11 WHERE id = ?12 AND restaurant_id = ?13",
    )
    .bind(data.table_id)
    .bind(data.area_id)
    .bind(data.reservation_date)
    .bind(data.start_time)
    .bind(data.status)
    .bind(data.customer_name.as_deref())
    .bind(data.customer_phone.as_deref())
    .bind(data.customer_email.as_deref())
    .bind(data.party_size)
    .bind(data.note.as_deref())
    .bind(now)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Hard delete (administrative removal, not a lifecycle transition).
pub async fn delete(pool: &SqlitePool, restaurant_id: &str, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AreaCreate, DiningTableCreate, ReservationStatus};
    use sqlx::sqlite::SqlitePoolOptions;

    const RESTAURANT: &str = "casa_pepe";

    /// In-memory SQLite pool with the production schema applied.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::raw_sql(include_str!("../../../migrations/0001_init.sql"))
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn seed_table(pool: &SqlitePool) -> (i64, i64) {
        let area = super::super::area::create(
            pool,
            RESTAURANT,
            AreaCreate {
                name: "Terraza".into(),
                description: None,
            },
        )
        .await
        .unwrap();
        let table = super::super::dining_table::create(
            pool,
            RESTAURANT,
            DiningTableCreate {
                name: "T1".into(),
                area_id: Some(area.id),
                capacity: Some(4),
            },
        )
        .await
        .unwrap();
        (table.id, area.id)
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn booking(table_id: Option<i64>, date: &str, time: &str, name: &str) -> ReservationCreate {
        ReservationCreate {
            table_id,
            area_id: None,
            reservation_date: d(date),
            start_time: t(time),
            status: None,
            customer_name: name.into(),
            customer_phone: None,
            customer_email: None,
            party_size: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn create_resolves_table_and_area_names() {
        let pool = test_pool().await;
        let (table_id, area_id) = seed_table(&pool).await;

        let mut data = booking(Some(table_id), "2030-05-01", "20:30", "Ana");
        data.area_id = Some(area_id);
        let created = create(&pool, RESTAURANT, data).await.unwrap();

        assert_eq!(created.reservation.status, ReservationStatus::Pending);
        assert_eq!(created.reservation.party_size, 2);
        assert_eq!(created.table_name.as_deref(), Some("T1"));
        assert_eq!(created.area_name.as_deref(), Some("Terraza"));
        assert!(created.reservation.created_at > 0);
        assert_eq!(created.reservation.created_at, created.reservation.updated_at);
    }

    #[tokio::test]
    async fn active_slot_index_rejects_duplicate() {
        let pool = test_pool().await;
        let (table_id, _) = seed_table(&pool).await;

        create(&pool, RESTAURANT, booking(Some(table_id), "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();
        let err = create(&pool, RESTAURANT, booking(Some(table_id), "2030-05-01", "20:30", "Luis"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn terminal_status_frees_the_slot() {
        let pool = test_pool().await;
        let (table_id, _) = seed_table(&pool).await;

        let first = create(&pool, RESTAURANT, booking(Some(table_id), "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();
        update(
            &pool,
            RESTAURANT,
            first.reservation.id,
            &ReservationUpdate {
                status: Some(ReservationStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // The cancelled row no longer occupies the slot...
        assert!(
            !find_conflicting(&pool, RESTAURANT, table_id, d("2030-05-01"), t("20:30"), None)
                .await
                .unwrap()
        );
        // ...so the same slot can be booked again.
        create(&pool, RESTAURANT, booking(Some(table_id), "2030-05-01", "20:30", "Luis"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unseated_reservations_never_conflict() {
        let pool = test_pool().await;
        create(&pool, RESTAURANT, booking(None, "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();
        create(&pool, RESTAURANT, booking(None, "2030-05-01", "20:30", "Luis"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_conflicting_excludes_own_row() {
        let pool = test_pool().await;
        let (table_id, _) = seed_table(&pool).await;
        let created = create(&pool, RESTAURANT, booking(Some(table_id), "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();

        let (date, time) = (d("2030-05-01"), t("20:30"));
        assert!(find_conflicting(&pool, RESTAURANT, table_id, date, time, None).await.unwrap());
        assert!(
            !find_conflicting(&pool, RESTAURANT, table_id, date, time, Some(created.reservation.id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn list_orders_by_date_then_time() {
        let pool = test_pool().await;
        // Insert out of chronological order.
        for (date, time, name) in [
            ("2030-05-02", "13:00", "c"),
            ("2030-05-01", "21:00", "b"),
            ("2030-05-01", "13:00", "a"),
            ("2030-05-03", "12:00", "d"),
        ] {
            create(&pool, RESTAURANT, booking(None, date, time, name)).await.unwrap();
        }

        let rows = list(&pool, RESTAURANT, &ReservationFilter::default(), 20, 0)
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.reservation.customer_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn list_applies_filters_and_count_matches() {
        let pool = test_pool().await;
        let (table_id, area_id) = seed_table(&pool).await;

        let mut seated = booking(Some(table_id), "2030-05-01", "20:00", "Ana");
        seated.area_id = Some(area_id);
        create(&pool, RESTAURANT, seated).await.unwrap();
        create(&pool, RESTAURANT, booking(None, "2030-05-01", "21:00", "Luis"))
            .await
            .unwrap();
        create(&pool, RESTAURANT, booking(None, "2030-05-02", "20:00", "Marta"))
            .await
            .unwrap();

        let by_date = ReservationFilter {
            date: Some("2030-05-01".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(list(&pool, RESTAURANT, &by_date, 20, 0).await.unwrap().len(), 2);
        assert_eq!(count(&pool, RESTAURANT, &by_date).await.unwrap(), 2);

        let by_table = ReservationFilter {
            table_id: Some(table_id),
            ..Default::default()
        };
        let rows = list(&pool, RESTAURANT, &by_table, 20, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reservation.customer_name, "Ana");

        let by_area = ReservationFilter {
            area_id: Some(area_id),
            ..Default::default()
        };
        assert_eq!(count(&pool, RESTAURANT, &by_area).await.unwrap(), 1);

        let by_status = ReservationFilter {
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        };
        assert_eq!(count(&pool, RESTAURANT, &by_status).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn list_paginates_with_exact_count() {
        let pool = test_pool().await;
        for hour in 12..17 {
            create(&pool, RESTAURANT, booking(None, "2030-05-01", &format!("{hour}:00"), "x"))
                .await
                .unwrap();
        }
        let filter = ReservationFilter::default();
        assert_eq!(list(&pool, RESTAURANT, &filter, 2, 0).await.unwrap().len(), 2);
        assert_eq!(list(&pool, RESTAURANT, &filter, 2, 4).await.unwrap().len(), 1);
        // Offset past the end is an empty page, not an error.
        assert!(list(&pool, RESTAURANT, &filter, 2, 6).await.unwrap().is_empty());
        assert_eq!(count(&pool, RESTAURANT, &filter).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn update_merges_partially_and_refreshes_updated_at() {
        let pool = test_pool().await;
        let created = create(&pool, RESTAURANT, booking(None, "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = update(
            &pool,
            RESTAURANT,
            created.reservation.id,
            &ReservationUpdate {
                party_size: Some(6),
                note: Some("window seat".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.reservation.party_size, 6);
        assert_eq!(updated.reservation.note.as_deref(), Some("window seat"));
        // Untouched fields survive the merge.
        assert_eq!(updated.reservation.customer_name, "Ana");
        assert_eq!(updated.reservation.start_time, created.reservation.start_time);
        assert!(updated.reservation.updated_at > created.reservation.updated_at);
    }

    #[tokio::test]
    async fn missing_rows_and_foreign_tenants_read_as_not_found() {
        let pool = test_pool().await;
        let created = create(&pool, RESTAURANT, booking(None, "2030-05-01", "20:30", "Ana"))
            .await
            .unwrap();

        // Same id under another tenant is invisible.
        assert!(
            find_by_id(&pool, "other_restaurant", created.reservation.id)
                .await
                .unwrap()
                .is_none()
        );
        let err = delete(&pool, "other_restaurant", created.reservation.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        delete(&pool, RESTAURANT, created.reservation.id).await.unwrap();
        let err = delete(&pool, RESTAURANT, created.reservation.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
