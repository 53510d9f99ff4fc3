//! Area Repository

use super::{RepoError, RepoResult};
use shared::models::{Area, AreaCreate};
use sqlx::SqlitePool;

pub async fn find_by_id(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
) -> RepoResult<Option<Area>> {
    let area = sqlx::query_as::<_, Area>(
        "SELECT id, restaurant_id, name, description, is_active FROM area WHERE id = ? AND restaurant_id = ?",
    )
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(area)
}

pub async fn create(pool: &SqlitePool, restaurant_id: &str, data: AreaCreate) -> RepoResult<Area> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO area (id, restaurant_id, name, description) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(restaurant_id)
        .bind(data.name)
        .bind(data.description)
        .execute(pool)
        .await?;

    find_by_id(pool, restaurant_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create area".into()))
}
