//! HTTP router and handlers.

use crate::app::AppState;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

pub mod emails;
pub mod health;
pub mod items;

/// Assemble the HTTP router with all routes. Any origin may call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/items", get(items::list_items))
        .route("/items/:id", get(items::get_item))
        .route(
            "/emails",
            get(emails::list_emails).post(emails::create_email),
        )
        .route(
            "/emails/:id",
            get(emails::get_email)
                .put(emails::update_email)
                .delete(emails::delete_email),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
