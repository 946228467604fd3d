//! `PUT /potties/{id}` (also `PATCH`), usually reached via method override.

use axum::{
  Form,
  extract::{Path, State, rejection::FormRejection},
  response::Response,
};
use potty_core::{parse_id, store::PottyStore};

use crate::{
  AppState,
  error::Error,
  handlers::{PottyForm, form_fields, found},
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  form: Result<Form<PottyForm>, FormRejection>,
) -> Result<Response, Error>
where
  S: PottyStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let fields = form_fields(form)?;
  state.service.update(id, fields).await?;
  Ok(found(format!("/potties/{id}")))
}
