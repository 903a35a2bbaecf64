//! mailroom library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, shared state
//! - `http`: Axum router and handlers
//! - `db`: connection setup, migrations and SQLite queries
//! - `error`: error type rendered by the HTTP layer
//! - `models`: typed records used across layers
//! - `util`: tracing setup

pub mod app;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod util;
