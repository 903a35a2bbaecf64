//! API representation of an email.

use super::{db_email::DbEmail, derive_preview};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEmail {
  pub id: i64,
  pub sender_name: String,
  pub sender_email: String,
  pub recipient_name: String,
  pub recipient_email: String,
  pub subject: String,
  pub body: String,
  pub preview: String,
  pub is_read: bool,
  pub is_archived: bool,
  pub created_at: DateTime<Utc>,
  pub attachment_name: Option<String>,
  pub attachment_size: Option<String>,
}

impl From<DbEmail> for ApiEmail {
  fn from(d: DbEmail) -> Self {
    // Rows written before previews were stored fall back to the body.
    let preview = d
      .preview
      .filter(|p| !p.is_empty())
      .unwrap_or_else(|| derive_preview(&d.body));
    ApiEmail {
      id: d.id,
      sender_name: d.sender_name,
      sender_email: d.sender_email,
      recipient_name: d.recipient_name,
      recipient_email: d.recipient_email,
      subject: d.subject,
      body: d.body,
      preview,
      is_read: d.is_read,
      is_archived: d.is_archived,
      created_at: d.created_at,
      attachment_name: d.attachment_name,
      attachment_size: d.attachment_size,
    }
  }
}
