//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate};
use sqlx::SqlitePool;

pub async fn find_by_id(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, restaurant_id, area_id, name, capacity, is_active FROM dining_table WHERE id = ? AND restaurant_id = ?",
    )
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: &str,
    data: DiningTableCreate,
) -> RepoResult<DiningTable> {
    let id = shared::util::snowflake_id();
    let capacity = data.capacity.unwrap_or(4);
    sqlx::query(
        "INSERT INTO dining_table (id, restaurant_id, area_id, name, capacity) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.area_id)
    .bind(data.name)
    .bind(capacity)
    .execute(pool)
    .await?;

    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}
