//! Client payload for creating an email.

use serde::Deserialize;

/// Everything except the server-assigned fields. Strings are taken as-is,
/// empty values included.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmail {
  pub sender_name: String,
  pub sender_email: String,
  pub recipient_name: String,
  pub recipient_email: String,
  pub subject: String,
  pub body: String,
  #[serde(default)]
  pub attachment_name: Option<String>,
  #[serde(default)]
  pub attachment_size: Option<String>,
}
