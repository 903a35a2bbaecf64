//! Email records: storage row, API shape, request payloads and the
//! listing tabs.

pub mod api_email;
pub mod db_email;
pub mod email_update;
pub mod new_email;

/// Characters of body kept in a derived preview.
pub const PREVIEW_CHARS: usize = 100;

/// Short excerpt of `body` for list views.
///
/// Bodies longer than [`PREVIEW_CHARS`] characters are cut there and get a
/// trailing `...`; shorter bodies are returned verbatim.
pub fn derive_preview(body: &str) -> String {
  match body.char_indices().nth(PREVIEW_CHARS) {
    Some((cut, _)) => format!("{}...", &body[..cut]),
    None => body.to_string(),
  }
}

/// Named filter over the email list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
  /// Every non-archived email.
  #[default]
  Inbox,
  /// Non-archived emails not yet read.
  Unread,
  /// Archived emails only.
  Archive,
}

impl Tab {
  /// Unrecognized or absent selectors fall back to the inbox.
  pub fn from_param(tab: Option<&str>) -> Self {
    match tab {
      Some("unread") => Tab::Unread,
      Some("archive") => Tab::Archive,
      _ => Tab::Inbox,
    }
  }

  pub(crate) fn where_clause(self) -> &'static str {
    match self {
      Tab::Inbox => "is_archived = 0",
      Tab::Unread => "is_archived = 0 AND is_read = 0",
      Tab::Archive => "is_archived = 1",
    }
  }
}
