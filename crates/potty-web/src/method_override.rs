//! HTML method override.
//!
//! Browsers only submit forms as GET or POST. A POST carrying a `_method`
//! query parameter (or an `X-HTTP-Method-Override` header) is rewritten to the
//! requested verb before the router sees it, so `PUT /potties/{id}` and
//! `DELETE /potties/{id}` are reachable from plain forms.
//!
//! The rewrite must wrap the [`Router`](axum::Router) itself; a layer added
//! with `Router::layer` runs after route matching and is too late.

use axum::{
  extract::{Query, Request},
  http::{HeaderMap, Method, Uri},
};
use serde::Deserialize;

pub const OVERRIDE_PARAM: &str = "_method";
pub const OVERRIDE_HEADER: &str = "x-http-method-override";

#[derive(Deserialize)]
struct OverrideParams {
  #[serde(rename = "_method")]
  method: Option<String>,
}

/// Decide the verb a request should be dispatched as.
///
/// Only `POST` can be overridden, and only to `PUT`, `PATCH` or `DELETE`. The
/// query parameter takes precedence over the header.
pub fn effective_method(method: &Method, uri: &Uri, headers: &HeaderMap) -> Method {
  if method != Method::POST {
    return method.clone();
  }

  let from_query = Query::<OverrideParams>::try_from_uri(uri)
    .ok()
    .and_then(|Query(p)| p.method);
  let from_header = || {
    headers
      .get(OVERRIDE_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned)
  };

  from_query
    .or_else(from_header)
    .and_then(|signal| override_target(&signal))
    .unwrap_or(Method::POST)
}

fn override_target(signal: &str) -> Option<Method> {
  match signal.trim().to_ascii_uppercase().as_str() {
    "PUT" => Some(Method::PUT),
    "PATCH" => Some(Method::PATCH),
    "DELETE" => Some(Method::DELETE),
    _ => None,
  }
}

/// Request preprocessor for [`tower::util::MapRequestLayer`].
pub fn rewrite(mut req: Request) -> Request {
  let method = effective_method(req.method(), req.uri(), req.headers());
  if method != *req.method() {
    tracing::debug!(from = %req.method(), to = %method, uri = %req.uri(), "method override");
    *req.method_mut() = method;
  }
  req
}
