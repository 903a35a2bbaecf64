//! Application setup and runtime.

use crate::{db, http};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tracing::info;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub db: SqlitePool,
}

/// Environment-provided settings.
#[derive(Debug, Clone)]
pub struct Settings {
  /// SQLite file location, or `:memory:`.
  pub database_path: String,
  pub addr: SocketAddr,
}

impl Settings {
  pub const DEFAULT_DATABASE_PATH: &'static str = "app.db";
  pub const DEFAULT_ADDR: &'static str = "0.0.0.0:8000";

  /// Read `DATABASE_PATH` and `MAILROOM_ADDR`, falling back to defaults.
  pub fn from_env() -> Result<Self, BoxError> {
    Self::from_vars(
      std::env::var("DATABASE_PATH").ok(),
      std::env::var("MAILROOM_ADDR").ok(),
    )
  }

  fn from_vars(database_path: Option<String>, addr: Option<String>) -> Result<Self, BoxError> {
    let database_path = database_path
      .filter(|p| !p.is_empty())
      .unwrap_or_else(|| Self::DEFAULT_DATABASE_PATH.to_string());
    let addr = addr
      .as_deref()
      .unwrap_or(Self::DEFAULT_ADDR)
      .parse::<SocketAddr>()
      .map_err(|e| format!("invalid MAILROOM_ADDR: {e}"))?;
    Ok(Settings {
      database_path,
      addr,
    })
  }

  pub async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
    db::connect(&self.database_path, 5).await
  }
}

/// Apply pending migrations, then serve the HTTP API.
pub async fn run(settings: Settings) -> Result<(), BoxError> {
  let pool = settings.connect().await?;
  for (name, outcome) in db::migrations::run_migrations(&pool).await? {
    info!("migration {name}: {outcome}");
  }

  let state = AppState { db: pool };
  let app = http::build_router(state);

  info!("database:        {}", settings.database_path);
  info!("email API:       http://{}/emails", settings.addr);
  info!("health check:    http://{}/health", settings.addr);

  let listener = tokio::net::TcpListener::bind(settings.addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
