//! Email JSON API.

use crate::{
  app::AppState,
  db::emails,
  error::AppError,
  models::{
    email::{Tab, api_email::ApiEmail, email_update::EmailUpdate, new_email::NewEmail},
    response::email_list::EmailList,
  },
};
use axum::{
  Json,
  extract::{Path as AxumPath, Query, State},
  http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub tab: Option<String>,
}

pub async fn list_emails(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Result<Json<EmailList>, AppError> {
  let tab = Tab::from_param(params.tab.as_deref());
  let emails = emails::list_emails(&state.db, tab).await?;
  Ok(Json(EmailList { emails }))
}

pub async fn get_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> Result<Json<ApiEmail>, AppError> {
  Ok(Json(emails::get_email(&state.db, id).await?))
}

pub async fn create_email(
  State(state): State<AppState>,
  Json(req): Json<NewEmail>,
) -> Result<(StatusCode, Json<ApiEmail>), AppError> {
  let email = emails::create_email(&state.db, req).await?;
  Ok((StatusCode::CREATED, Json(email)))
}

pub async fn update_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
  Json(update): Json<EmailUpdate>,
) -> Result<Json<ApiEmail>, AppError> {
  Ok(Json(emails::update_email(&state.db, id, update).await?))
}

pub async fn delete_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> Result<StatusCode, AppError> {
  emails::delete_email(&state.db, id).await?;
  Ok(StatusCode::NO_CONTENT)
}
