//! `GET /potties`

use askama::Template;
use axum::{extract::State, response::Html};
use potty_core::store::PottyStore;

use crate::{
  AppState,
  error::Error,
  views::{IndexView, PottyView},
};

pub async fn handler<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: PottyStore + Clone + 'static,
{
  let potties = state.service.list().await?;
  tracing::debug!(count = potties.len(), "listing potties");

  let view = IndexView {
    potties: potties.iter().map(PottyView::from).collect(),
  };
  Ok(Html(view.render()?))
}
