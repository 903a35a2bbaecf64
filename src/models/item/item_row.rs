//! Demo item row.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
}
