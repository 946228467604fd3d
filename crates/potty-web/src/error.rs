//! Error types and axum `IntoResponse` implementation.
//!
//! Every failure becomes an HTML error page with an explicit status; nothing
//! here can bring the server down.

use askama::Template;
use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::ErrorView;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] potty_core::Error),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("template error: {0}")]
  Render(#[from] askama::Error),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::Core(potty_core::Error::NotFound(_)) => StatusCode::NOT_FOUND,
      Error::Core(potty_core::Error::InvalidId(_)) | Error::BadRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      Error::Core(potty_core::Error::Store(_)) | Error::Render(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
      "Something went wrong on our end.".to_string()
    } else {
      tracing::warn!(error = %self, "request rejected");
      self.to_string()
    };

    let page = ErrorView {
      status: status.as_u16(),
      reason: status.canonical_reason().unwrap_or("Error"),
      message,
    };
    match page.render() {
      Ok(html) => (status, Html(html)).into_response(),
      Err(e) => {
        tracing::error!(error = %e, "failed to render error page");
        (status, page.message).into_response()
      }
    }
  }
}
