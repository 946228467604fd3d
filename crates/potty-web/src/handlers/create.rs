//! `GET /potties/new` and `POST /potties`.

use askama::Template;
use axum::{
  Form,
  extract::{State, rejection::FormRejection},
  response::{Html, Response},
};
use potty_core::store::PottyStore;

use crate::{
  AppState,
  error::Error,
  handlers::{PottyForm, form_fields, found},
  views::NewView,
};

/// Render the empty create form.
pub async fn form() -> Result<Html<String>, Error> { Ok(Html(NewView.render()?)) }

/// Persist a new record, then redirect to the list.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  form: Result<Form<PottyForm>, FormRejection>,
) -> Result<Response, Error>
where
  S: PottyStore + Clone + 'static,
{
  let fields = form_fields(form)?;
  state.service.create(fields).await?;
  Ok(found("/potties"))
}
