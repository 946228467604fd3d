//! `DELETE /potties/{id}`, usually reached via method override.

use axum::{
  extract::{Path, State},
  response::Response,
};
use potty_core::{parse_id, store::PottyStore};

use crate::{AppState, error::Error, handlers::found};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Response, Error>
where
  S: PottyStore + Clone + 'static,
{
  state.service.delete(parse_id(&id)?).await?;
  Ok(found("/potties"))
}
