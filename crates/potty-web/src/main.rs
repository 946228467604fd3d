//! potty-pooper server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the HTML app over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{ServiceExt, extract::Request};
use clap::Parser;
use potty_core::{PottyFields, PottyService};
use potty_store_sqlite::SqliteStore;
use potty_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Potty Pooper web server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Insert a sample potty before serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let service = PottyService::new(Arc::new(store));

  if cli.seed {
    let sample = service
      .create(PottyFields {
        name:     Some("resto2".into()),
        image:    Some(
          "https://media-cdn.tripadvisor.com/media/photo-s/11/0f/ac/e1/toilets-of-restaurant.jpg"
            .into(),
        ),
        comments: Some("Very Good".into()),
      })
      .await
      .context("failed to seed sample potty")?;
    tracing::info!(id = %sample.id, "seeded sample potty");
  }

  let address = server_cfg.address();
  let state = AppState {
    service,
    config: Arc::new(server_cfg),
  };
  let app = potty_web::app(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
    .await
    .context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
