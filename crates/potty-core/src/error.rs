//! Error types for `potty-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("potty not found: {0}")]
  NotFound(Uuid),

  #[error("invalid potty id: {0:?}")]
  InvalidId(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse a record id taken from a URL path segment.
pub fn parse_id(raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw).map_err(|_| Error::InvalidId(raw.to_owned()))
}
