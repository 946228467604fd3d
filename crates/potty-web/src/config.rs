//! Runtime server configuration.
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `POTTY_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The stylesheet directory shipped with this crate, so a checkout serves
/// `/public` from any working directory without a config file.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file. A leading `~/` is expanded by the binary.
  pub store_path: PathBuf,
  /// Directory served under `/public`. Defaults to [`DEFAULT_STATIC_DIR`].
  pub static_dir: PathBuf,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3001)?
      .set_default("store_path", "pottyPooper.db")?
      .set_default("static_dir", DEFAULT_STATIC_DIR)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("POTTY"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
