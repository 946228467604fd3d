//! The `PottyStore` trait.
//!
//! Implemented by storage backends (e.g. `potty-store-sqlite`). The service
//! and web layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::record::{PottyFields, PottyRecord};

/// Abstraction over a potty record backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PottyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All records, in insertion order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<PottyRecord>, Self::Error>> + Send + '_;

  /// Persist a new record. The store assigns `id` and `posted`.
  fn insert(
    &self,
    fields: PottyFields,
  ) -> impl Future<Output = Result<PottyRecord, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PottyRecord>, Self::Error>> + Send + '_;

  /// Apply a field-level update (see [`PottyRecord::apply`]) and return the
  /// stored result. Returns `None` if not found.
  fn update(
    &self,
    id: Uuid,
    fields: PottyFields,
  ) -> impl Future<Output = Result<Option<PottyRecord>, Self::Error>> + Send + '_;

  /// Remove a record. Returns `true` if a record was removed.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
