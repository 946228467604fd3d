//! Encoding and decoding helpers between [`PottyRecord`] and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use potty_core::PottyRecord;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column values as read from the `potties` table, before decoding.
pub struct RawPotty {
  pub id:       String,
  pub name:     Option<String>,
  pub image:    Option<String>,
  pub comments: Option<String>,
  pub posted:   String,
}

/// Column list matching [`RawPotty::from_row`].
pub const POTTY_COLUMNS: &str = "id, name, image, comments, posted";

impl RawPotty {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      name:     row.get(1)?,
      image:    row.get(2)?,
      comments: row.get(3)?,
      posted:   row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<PottyRecord> {
    Ok(PottyRecord {
      id:       decode_uuid(&self.id)?,
      name:     self.name,
      image:    self.image,
      comments: self.comments,
      posted:   decode_dt(&self.posted)?,
    })
  }
}
