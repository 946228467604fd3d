//! `GET /potties/{id}` and `GET /potties/{id}/edit`.

use askama::Template;
use axum::{
  extract::{Path, State},
  response::Html,
};
use potty_core::{parse_id, store::PottyStore};

use crate::{
  AppState,
  error::Error,
  views::{EditView, PottyView, ShowView},
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Html<String>, Error>
where
  S: PottyStore + Clone + 'static,
{
  let record = state.service.show(parse_id(&id)?).await?;
  let view = ShowView { potty: PottyView::from(&record) };
  Ok(Html(view.render()?))
}

pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Html<String>, Error>
where
  S: PottyStore + Clone + 'static,
{
  let record = state.service.show(parse_id(&id)?).await?;
  let view = EditView { potty: PottyView::from(&record) };
  Ok(Html(view.render()?))
}
