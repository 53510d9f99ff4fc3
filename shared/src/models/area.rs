//! Area Model

use serde::{Deserialize, Serialize};

/// Area entity (dining room, terrace, private room, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Area {
    pub id: i64,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    pub description: Option<String>,
}
