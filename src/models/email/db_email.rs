//! Database row for an email.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DbEmail {
    pub id: i64,
    pub sender_name: String,
    pub sender_email: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
    pub preview: Option<String>,
    pub is_read: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub attachment_name: Option<String>,
    pub attachment_size: Option<String>,
}
