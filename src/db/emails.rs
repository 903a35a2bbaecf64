//! Email store operations.
//!
//! Every operation runs in its own transaction: it is committed on success
//! and rolled back when dropped on any error path.

use crate::{
    error::AppError,
    models::email::{
        Tab, api_email::ApiEmail, db_email::DbEmail, derive_preview, email_update::EmailUpdate,
        new_email::NewEmail,
    },
};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

const COLUMNS: &str = "id, sender_name, sender_email, recipient_name, recipient_email, subject, body, preview, is_read, is_archived, created_at, attachment_name, attachment_size";

async fn fetch_email(conn: &mut SqliteConnection, id: i64) -> Result<Option<DbEmail>, sqlx::Error> {
    sqlx::query_as::<_, DbEmail>(&format!("SELECT {COLUMNS} FROM emails WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Emails visible under `tab`, newest first.
pub async fn list_emails(pool: &SqlitePool, tab: Tab) -> Result<Vec<ApiEmail>, AppError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM emails WHERE {} ORDER BY created_at DESC, id DESC",
        tab.where_clause()
    );
    let mut tx = pool.begin().await?;
    let rows = sqlx::query_as::<_, DbEmail>(&sql)
        .fetch_all(&mut *tx)
        .await?;
    tx.commit().await?;
    debug!(?tab, count = rows.len(), "listed emails");
    Ok(rows.into_iter().map(ApiEmail::from).collect())
}

pub async fn get_email(pool: &SqlitePool, id: i64) -> Result<ApiEmail, AppError> {
    let mut tx = pool.begin().await?;
    let row = fetch_email(&mut tx, id)
        .await?
        .ok_or_else(AppError::email_not_found)?;
    tx.commit().await?;
    Ok(row.into())
}

/// Store a new email. It starts out read and not archived.
pub async fn create_email(pool: &SqlitePool, new: NewEmail) -> Result<ApiEmail, AppError> {
    let preview = derive_preview(&new.body);
    let mut tx = pool.begin().await?;
    let id = sqlx::query(
        "INSERT INTO emails (sender_name, sender_email, recipient_name, recipient_email, subject, body, preview, is_read, is_archived, created_at, attachment_name, attachment_size) VALUES (?, ?, ?, ?, ?, ?, ?, 1, 0, ?, ?, ?)",
    )
    .bind(new.sender_name)
    .bind(new.sender_email)
    .bind(new.recipient_name)
    .bind(new.recipient_email)
    .bind(new.subject)
    .bind(new.body)
    .bind(preview)
    .bind(Utc::now())
    .bind(new.attachment_name)
    .bind(new.attachment_size)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    let row = sqlx::query_as::<_, DbEmail>(&format!("SELECT {COLUMNS} FROM emails WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    tx.commit().await?;
    info!(id, "created email");
    Ok(row.into())
}

/// Overwrite the supplied flags and return the email as stored afterwards.
pub async fn update_email(
    pool: &SqlitePool,
    id: i64,
    update: EmailUpdate,
) -> Result<ApiEmail, AppError> {
    let mut tx = pool.begin().await?;
    if !update.is_empty() {
        let is_read: Option<bool> = update.is_read.into();
        let is_archived: Option<bool> = update.is_archived.into();
        let done = sqlx::query(
            "UPDATE emails SET is_read = COALESCE(?, is_read), is_archived = COALESCE(?, is_archived) WHERE id = ?",
        )
        .bind(is_read)
        .bind(is_archived)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::email_not_found());
        }
    }
    let row = fetch_email(&mut tx, id)
        .await?
        .ok_or_else(AppError::email_not_found)?;
    tx.commit().await?;
    info!(id, ?update, "updated email");
    Ok(row.into())
}

pub async fn delete_email(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    let done = sqlx::query("DELETE FROM emails WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::email_not_found());
    }
    tx.commit().await?;
    info!(id, "deleted email");
    Ok(())
}
