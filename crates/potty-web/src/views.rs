//! askama view models.
//!
//! Templates live in `templates/` and are HTML-escaped on output, so stored
//! text is always rendered as text.

use askama::Template;
use potty_core::PottyRecord;

/// A record flattened to display strings. Absent fields render empty.
#[derive(Debug, Clone)]
pub struct PottyView {
  pub id:       String,
  pub name:     String,
  pub image:    String,
  pub comments: String,
  pub posted:   String,
}

impl From<&PottyRecord> for PottyView {
  fn from(r: &PottyRecord) -> Self {
    Self {
      id:       r.id.to_string(),
      name:     r.name.clone().unwrap_or_default(),
      image:    r.image.clone().unwrap_or_default(),
      comments: r.comments.clone().unwrap_or_default(),
      posted:   r.posted.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
  }
}

/// `GET /potties`
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
  pub potties: Vec<PottyView>,
}

/// `GET /potties/new`
#[derive(Template)]
#[template(path = "new.html")]
pub struct NewView;

/// `GET /potties/{id}`
#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowView {
  pub potty: PottyView,
}

/// `GET /potties/{id}/edit`
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditView {
  pub potty: PottyView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
  pub status:  u16,
  pub reason:  &'static str,
  pub message: String,
}
