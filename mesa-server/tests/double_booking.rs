//! End-to-end booking tests against a real database file
//!
//! Runs the full stack (migrations included) the way the embedding server
//! does, with several writers sharing the pool. The partial unique index on
//! active slots is what keeps concurrent double-bookings out; these tests
//! exercise that property through the public service API.

use chrono::NaiveTime;
use chrono_tz::Tz;
use mesa_server::{DbService, ReservationService};
use shared::models::{
    AreaCreate, DiningTableCreate, ReservationCreate, ReservationListQuery, ReservationStatus,
    ReservationStatusUpdate,
};
use shared::ErrorCode;

const RESTAURANT: &str = "casa_pepe";
const TZ: Tz = chrono_tz::Europe::Madrid;

async fn setup() -> (tempfile::TempDir, ReservationService, i64) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mesa.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();

    let area = mesa_server::db::repository::area::create(
        &db.pool,
        RESTAURANT,
        AreaCreate {
            name: "Comedor".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    let table = mesa_server::db::repository::dining_table::create(
        &db.pool,
        RESTAURANT,
        DiningTableCreate {
            name: "T1".into(),
            area_id: Some(area.id),
            capacity: Some(4),
        },
    )
    .await
    .unwrap();

    let service = ReservationService::new(db.pool.clone(), TZ);
    (dir, service, table.id)
}

fn tomorrow() -> chrono::NaiveDate {
    chrono::Utc::now().with_timezone(&TZ).date_naive() + chrono::Duration::days(1)
}

fn booking(table_id: Option<i64>, time: NaiveTime, name: &str) -> ReservationCreate {
    ReservationCreate {
        table_id,
        area_id: None,
        reservation_date: tomorrow(),
        start_time: time,
        status: None,
        customer_name: name.into(),
        customer_phone: None,
        customer_email: None,
        party_size: Some(2),
        note: None,
    }
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_have_a_single_winner() {
    let (_dir, service, table_id) = setup().await;
    let time = NaiveTime::from_hms_opt(20, 30, 0).unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let service = service.clone();
        tasks.spawn(async move {
            service
                .create(RESTAURANT, booking(Some(table_id), time, &format!("Guest {i}")))
                .await
        });
    }

    let mut won = 0;
    let mut lost = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => won += 1,
            Err(err) => {
                assert_eq!(err.code, ErrorCode::SlotOccupied);
                lost += 1;
            }
        }
    }
    assert_eq!(won, 1);
    assert_eq!(lost, 7);

    // The survivor is the only active reservation on the slot.
    let listed = service
        .list(RESTAURANT, ReservationListQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.total, 1);
}

#[tokio::test]
async fn full_booking_lifecycle_round_trip() {
    let (_dir, service, table_id) = setup().await;
    let time = NaiveTime::from_hms_opt(21, 0, 0).unwrap();

    let created = service
        .create(RESTAURANT, booking(Some(table_id), time, "Marta"))
        .await
        .unwrap();
    assert_eq!(created.reservation.status, ReservationStatus::Pending);
    assert_eq!(created.table_name.as_deref(), Some("T1"));

    let confirmed = service
        .update_status(
            RESTAURANT,
            created.reservation.id,
            ReservationStatusUpdate {
                status: Some(ReservationStatus::Confirmed),
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.reservation.status, ReservationStatus::Confirmed);

    // Confirmed still holds the slot.
    let err = service
        .create(RESTAURANT, booking(Some(table_id), time, "Luis"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SlotOccupied);

    let upcoming = service.list_upcoming(RESTAURANT, None).await.unwrap();
    assert_eq!(upcoming.len(), 1);

    let completed = service
        .update_status(
            RESTAURANT,
            created.reservation.id,
            ReservationStatusUpdate {
                status: Some(ReservationStatus::Completed),
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.reservation.status, ReservationStatus::Completed);

    // Completed frees the slot and leaves the upcoming window.
    service
        .create(RESTAURANT, booking(Some(table_id), time, "Luis"))
        .await
        .unwrap();
    service.delete(RESTAURANT, created.reservation.id).await.unwrap();
    let err = service
        .get_by_id(RESTAURANT, created.reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ReservationNotFound);
}

#[tokio::test]
async fn pagination_sweep_over_a_full_evening() {
    let (_dir, service, _) = setup().await;
    for hour in 12..21u32 {
        for minute in [0, 15, 30, 45] {
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            service
                .create(RESTAURANT, booking(None, time, "Walk-in"))
                .await
                .unwrap();
        }
    }

    // 36 bookings, 3 pages of 15.
    let mut seen = Vec::new();
    for page in 1..=3u32 {
        let resp = service
            .list(
                RESTAURANT,
                ReservationListQuery {
                    page: Some(page),
                    limit: Some(15),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.total, 36);
        assert_eq!(resp.total_pages, 3);
        seen.extend(resp.items.into_iter().map(|r| r.reservation.start_time));
    }
    assert_eq!(seen.len(), 36);
    let mut sorted = seen.clone();
    sorted.sort();
    // Pages concatenate into the globally ordered sequence.
    assert_eq!(seen, sorted);
}
