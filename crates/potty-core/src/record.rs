//! The potty record, the only entity in the store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::sanitize::strip_markup;

/// A persisted restroom entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PottyRecord {
  /// Assigned by the store on insert; never changes.
  pub id:       Uuid,
  /// Establishment name.
  pub name:     Option<String>,
  /// URL of a representative image.
  pub image:    Option<String>,
  pub comments: Option<String>,
  /// Server-assigned creation timestamp; never changes after insert.
  pub posted:   DateTime<Utc>,
}

impl PottyRecord {
  /// Field-level update: every field present in `fields` overwrites the
  /// stored value, absent fields are left alone.
  pub fn apply(&mut self, fields: PottyFields) {
    if let Some(name) = fields.name {
      self.name = Some(name);
    }
    if let Some(image) = fields.image {
      self.image = Some(image);
    }
    if let Some(comments) = fields.comments {
      self.comments = Some(comments);
    }
  }
}

/// The writable part of a record, used for both create and update.
///
/// `id` and `posted` are owned by the store and cannot be supplied here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PottyFields {
  pub name:     Option<String>,
  pub image:    Option<String>,
  pub comments: Option<String>,
}

impl PottyFields {
  /// Strip executable markup from the free-text `comments` field.
  pub fn sanitized(self) -> Self {
    Self {
      comments: self.comments.as_deref().map(strip_markup),
      ..self
    }
  }
}
