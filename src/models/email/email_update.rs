//! Partial update payload for an email.

use serde::{Deserialize, Deserializer};

/// A field that an update either leaves alone or overwrites.
///
/// Omitted fields and explicit JSON `null` both deserialize to `Keep`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
  Keep,
  Set(T),
}

impl<T> Default for Patch<T> {
  fn default() -> Self {
    Patch::Keep
  }
}

impl<T> Patch<T> {
  pub fn is_set(&self) -> bool {
    matches!(self, Patch::Set(_))
  }
}

impl<T> From<Option<T>> for Patch<T> {
  fn from(v: Option<T>) -> Self {
    v.map_or(Patch::Keep, Patch::Set)
  }
}

impl<T> From<Patch<T>> for Option<T> {
  fn from(v: Patch<T>) -> Self {
    match v {
      Patch::Keep => None,
      Patch::Set(v) => Some(v),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Patch::from)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EmailUpdate {
  #[serde(default)]
  pub is_read: Patch<bool>,
  #[serde(default)]
  pub is_archived: Patch<bool>,
}

impl EmailUpdate {
  pub fn is_empty(&self) -> bool {
    !self.is_read.is_set() && !self.is_archived.is_set()
  }
}
