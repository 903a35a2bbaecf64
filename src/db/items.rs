//! Demo item queries.

use crate::{error::AppError, models::item::item_row::Item};
use sqlx::SqlitePool;

pub async fn list_items(pool: &SqlitePool) -> Result<Vec<Item>, AppError> {
    let mut tx = pool.begin().await?;
    let items = sqlx::query_as::<_, Item>("SELECT id, name FROM items ORDER BY id")
        .fetch_all(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(items)
}

pub async fn get_item(pool: &SqlitePool, id: i64) -> Result<Item, AppError> {
    let mut tx = pool.begin().await?;
    let item = sqlx::query_as::<_, Item>("SELECT id, name FROM items WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(AppError::item_not_found)?;
    tx.commit().await?;
    Ok(item)
}
