//! Demo items API.

use crate::{
  app::AppState,
  db::items,
  error::AppError,
  models::{item::item_row::Item, response::item_list::ItemList},
};
use axum::{
  Json,
  extract::{Path as AxumPath, State},
};

pub async fn list_items(State(state): State<AppState>) -> Result<Json<ItemList>, AppError> {
  let items = items::list_items(&state.db).await?;
  Ok(Json(ItemList { items }))
}

pub async fn get_item(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> Result<Json<Item>, AppError> {
  Ok(Json(items::get_item(&state.db, id).await?))
}
