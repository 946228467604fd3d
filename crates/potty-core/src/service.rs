//! [`PottyService`]: the operations behind every route.
//!
//! Built once at startup and handed to request handlers. Holds no state of its
//! own beyond the store handle, so cloning is cheap.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  record::{PottyFields, PottyRecord},
  store::PottyStore,
};

pub struct PottyService<S> {
  store: Arc<S>,
}

impl<S> Clone for PottyService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

impl<S: PottyStore> PottyService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn list(&self) -> Result<Vec<PottyRecord>> {
    self.store.list().await.map_err(store_err)
  }

  /// Sanitize and persist a new record.
  pub async fn create(&self, fields: PottyFields) -> Result<PottyRecord> {
    let record = self
      .store
      .insert(fields.sanitized())
      .await
      .map_err(store_err)?;
    tracing::info!(id = %record.id, name = ?record.name, "added new potty");
    Ok(record)
  }

  pub async fn show(&self, id: Uuid) -> Result<PottyRecord> {
    self
      .store
      .get(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::NotFound(id))
  }

  /// Sanitize and apply a field-level update. `posted` is never touched.
  pub async fn update(
    &self,
    id: Uuid,
    fields: PottyFields,
  ) -> Result<PottyRecord> {
    let record = self
      .store
      .update(id, fields.sanitized())
      .await
      .map_err(store_err)?
      .ok_or(Error::NotFound(id))?;
    tracing::info!(%id, "updated potty");
    Ok(record)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    if !self.store.delete(id).await.map_err(store_err)? {
      return Err(Error::NotFound(id));
    }
    tracing::info!(%id, "deleted potty");
    Ok(())
  }
}
