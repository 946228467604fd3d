pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

use axum::{
  Form,
  extract::rejection::FormRejection,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use potty_core::PottyFields;
use serde::Deserialize;

use crate::error::Error;

/// `302 Found` to `location`.
pub(crate) fn found(location: impl Into<String>) -> Response {
  (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

/// `GET /`
pub async fn root() -> Response { found("/potties") }

/// URL-encoded form body for create and update.
///
/// The HTML forms submit `potty[name]` style keys. Older clients post
/// `blog[name]` style keys, and bare `name` is accepted too. Any other key
/// (e.g. `_method`) is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PottyForm {
  #[serde(default, alias = "potty[name]", alias = "blog[name]")]
  pub name:     Option<String>,
  #[serde(default, alias = "potty[image]", alias = "blog[image]")]
  pub image:    Option<String>,
  #[serde(default, alias = "potty[comments]", alias = "blog[comments]")]
  pub comments: Option<String>,
}

impl From<PottyForm> for PottyFields {
  fn from(f: PottyForm) -> Self {
    PottyFields {
      name:     f.name,
      image:    f.image,
      comments: f.comments,
    }
  }
}

/// Unwrap a form extraction, turning axum's rejection into a 400 page.
pub(crate) fn form_fields(
  form: Result<Form<PottyForm>, FormRejection>,
) -> Result<PottyFields, Error> {
  let Form(body) = form.map_err(|e| Error::BadRequest(e.body_text()))?;
  Ok(body.into())
}
