//! [`SqliteStore`], the SQLite implementation of [`PottyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use potty_core::{PottyFields, PottyRecord, store::PottyStore};

use crate::{
  Result,
  encode::{POTTY_COLUMNS, RawPotty, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A potty store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PottyStore impl ─────────────────────────────────────────────────────────

impl PottyStore for SqliteStore {
  type Error = crate::Error;

  async fn list(&self) -> Result<Vec<PottyRecord>> {
    let raws: Vec<RawPotty> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {POTTY_COLUMNS} FROM potties ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawPotty::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPotty::into_record).collect()
  }

  async fn insert(&self, fields: PottyFields) -> Result<PottyRecord> {
    let record = PottyRecord {
      id:       Uuid::new_v4(),
      name:     fields.name,
      image:    fields.image,
      comments: fields.comments,
      posted:   Utc::now(),
    };

    let id_str     = encode_uuid(record.id);
    let posted_str = encode_dt(record.posted);
    let name       = record.name.clone();
    let image      = record.image.clone();
    let comments   = record.comments.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO potties (id, name, image, comments, posted)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, image, comments, posted_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn get(&self, id: Uuid) -> Result<Option<PottyRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPotty> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {POTTY_COLUMNS} FROM potties WHERE id = ?1"),
            rusqlite::params![id_str],
            RawPotty::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPotty::into_record).transpose()
  }

  async fn update(
    &self,
    id:     Uuid,
    fields: PottyFields,
  ) -> Result<Option<PottyRecord>> {
    let id_str = encode_uuid(id);

    // COALESCE keeps the stored value for every field the caller left out.
    // `posted` never appears in the SET list.
    let raw: Option<RawPotty> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE potties SET
             name     = COALESCE(?2, name),
             image    = COALESCE(?3, image),
             comments = COALESCE(?4, comments)
           WHERE id = ?1",
          rusqlite::params![id_str, fields.name, fields.image, fields.comments],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!("SELECT {POTTY_COLUMNS} FROM potties WHERE id = ?1"),
          rusqlite::params![id_str],
          RawPotty::from_row,
        )?))
      })
      .await?;

    raw.map(RawPotty::into_record).transpose()
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM potties WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if removed == 0 {
      tracing::debug!(%id, "delete matched no rows");
    }
    Ok(removed > 0)
  }
}
