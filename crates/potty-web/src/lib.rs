//! HTML front end for Potty Pooper.
//!
//! Exposes an axum [`Router`] rendering askama views over a
//! [`PottyService`], plus [`app`], which wraps the router with method
//! override so plain HTML forms can reach the `PUT` and `DELETE` routes.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `GET`    | `/` | 302 → `/potties` |
//! | `GET`    | `/potties` | list view |
//! | `GET`    | `/potties/new` | create form |
//! | `POST`   | `/potties` | 302 → `/potties` |
//! | `GET`    | `/potties/{id}` | detail view |
//! | `GET`    | `/potties/{id}/edit` | edit form |
//! | `PUT`    | `/potties/{id}` | 302 → `/potties/{id}` |
//! | `DELETE` | `/potties/{id}` | 302 → `/potties` |

pub mod config;
pub mod error;
pub mod handlers;
pub mod method_override;
pub mod views;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{Router, extract::Request, routing::get};
use potty_core::{PottyService, store::PottyStore};
use tower::{
  Layer as _,
  util::{MapRequest, MapRequestLayer},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{create, delete, list, show, update};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PottyStore> {
  pub service: PottyService<S>,
  pub config:  Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`]. Method override is *not* applied here; use
/// [`app`] for anything facing a browser.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PottyStore + Clone + 'static,
{
  let assets = ServeDir::new(&state.config.static_dir);

  Router::new()
    .route("/",                   get(handlers::root))
    .route("/potties",            get(list::handler::<S>).post(create::handler::<S>))
    .route("/potties/new",        get(create::form))
    .route(
      "/potties/{id}",
      get(show::handler::<S>)
        .put(update::handler::<S>)
        .patch(update::handler::<S>)
        .delete(delete::handler::<S>),
    )
    .route("/potties/{id}/edit",  get(show::edit_form::<S>))
    .nest_service("/public", assets)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// The servable application: [`router`] behind the method-override rewrite.
pub type App = MapRequest<Router, fn(Request) -> Request>;

pub fn app<S>(state: AppState<S>) -> App
where
  S: PottyStore + Clone + 'static,
{
  let rewrite: fn(Request) -> Request = method_override::rewrite;
  MapRequestLayer::new(rewrite).layer(router(state))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::Utc;
  use potty_core::{PottyFields, PottyRecord};
  use potty_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  const FORM: &str = "application/x-www-form-urlencoded";

  fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
      host:       "127.0.0.1".to_string(),
      port:       3001,
      store_path: PathBuf::from(":memory:"),
      static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
    })
  }

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      service: PottyService::new(Arc::new(store)),
      config:  test_config(),
    }
  }

  async fn send<S: PottyStore + Clone + 'static>(
    state:   AppState<S>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    app(state).oneshot(req).await.unwrap()
  }

  async fn get(state: AppState<SqliteStore>, uri: &str) -> Response {
    send(state, "GET", uri, vec![], "").await
  }

  async fn post_form(state: AppState<SqliteStore>, uri: &str, body: &str) -> Response {
    send(state, "POST", uri, vec![(header::CONTENT_TYPE, FORM)], body).await
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
  }

  async fn only_record(state: &AppState<SqliteStore>) -> PottyRecord {
    let mut all = state.service.list().await.unwrap();
    assert_eq!(all.len(), 1, "expected exactly one record");
    all.remove(0)
  }

  const CAFE_X: &str = "name=Cafe+X&image=http%3A%2F%2Fx%2Fy.jpg&comments=Clean";

  // ── Root / list / new ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_redirects_to_list() {
    let resp = get(make_state().await, "/").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/potties");
  }

  #[tokio::test]
  async fn empty_list_renders_html() {
    let resp = get(make_state().await, "/potties").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");
    assert!(body_text(resp).await.contains("No potties yet"));
  }

  #[tokio::test]
  async fn new_form_renders() {
    let resp = get(make_state().await, "/potties/new").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("action=\"/potties\""), "{html}");
    assert!(html.contains("potty[comments]"));
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_redirects_and_shows_in_list() {
    let state = make_state().await;
    let before = Utc::now();

    let resp = post_form(state.clone(), "/potties", CAFE_X).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/potties");

    let record = only_record(&state).await;
    assert!(!record.id.is_nil());
    assert!(record.posted >= before);
    assert_eq!(record.name.as_deref(), Some("Cafe X"));
    assert_eq!(record.image.as_deref(), Some("http://x/y.jpg"));
    assert_eq!(record.comments.as_deref(), Some("Clean"));

    let html = body_text(get(state, "/potties").await).await;
    assert!(html.contains("Cafe X"));
    assert!(html.contains(&format!("/potties/{}", record.id)));
  }

  #[tokio::test]
  async fn create_accepts_nested_form_keys() {
    let state = make_state().await;
    let resp = post_form(
      state.clone(),
      "/potties",
      "potty%5Bname%5D=resto2&potty%5Bimage%5D=&potty%5Bcomments%5D=Very+Good",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let record = only_record(&state).await;
    assert_eq!(record.name.as_deref(), Some("resto2"));
    assert_eq!(record.comments.as_deref(), Some("Very Good"));
  }

  #[tokio::test]
  async fn create_accepts_blog_form_keys() {
    let state = make_state().await;
    let resp = post_form(
      state.clone(),
      "/potties",
      "blog%5Bname%5D=resto2&blog%5Bimage%5D=http%3A%2F%2Fx%2Fy.jpg&blog%5Bcomments%5D=Very+Good",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let record = only_record(&state).await;
    assert_eq!(record.name.as_deref(), Some("resto2"));
    assert_eq!(record.image.as_deref(), Some("http://x/y.jpg"));
    assert_eq!(record.comments.as_deref(), Some("Very Good"));
  }

  #[tokio::test]
  async fn create_strips_script_from_comments() {
    let state = make_state().await;
    post_form(
      state.clone(),
      "/potties",
      "name=Evil&comments=Clean%3Cscript%3Ealert(1)%3C%2Fscript%3E",
    )
    .await;

    let record = only_record(&state).await;
    assert_eq!(record.comments.as_deref(), Some("Clean"));

    let html = body_text(get(state, &format!("/potties/{}", record.id)).await).await;
    assert!(!html.contains("alert(1)"), "{html}");
  }

  #[tokio::test]
  async fn create_without_form_content_type_is_400() {
    let state = make_state().await;
    let resp = send(
      state.clone(),
      "POST",
      "/potties",
      vec![(header::CONTENT_TYPE, "application/json")],
      r#"{"name":"nope"}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.service.list().await.unwrap().is_empty());
  }

  // ── Show / edit ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn show_renders_submitted_fields() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let record = only_record(&state).await;

    let resp = get(state, &format!("/potties/{}", record.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Cafe X"));
    assert!(html.contains("y.jpg"));
    assert!(html.contains("Clean"));
  }

  #[tokio::test]
  async fn show_unknown_id_is_404() {
    let resp = get(make_state().await, &format!("/potties/{}", Uuid::new_v4())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn show_malformed_id_is_400() {
    let resp = get(make_state().await, "/potties/5e8f1c2a0b").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn edit_form_is_prefilled() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let record = only_record(&state).await;

    let resp = get(state, &format!("/potties/{}/edit", record.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("value=\"Cafe X\""), "{html}");
    assert!(html.contains(&format!("/potties/{}?_method=PUT", record.id)));
  }

  #[tokio::test]
  async fn edit_unknown_id_is_404() {
    let resp = get(make_state().await, &format!("/potties/{}/edit", Uuid::new_v4())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_via_override_keeps_posted() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let before = only_record(&state).await;

    let resp = post_form(
      state.clone(),
      &format!("/potties/{}?_method=PUT", before.id),
      "name=Cafe+Y",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/potties/{}", before.id));

    let after = state.service.show(before.id).await.unwrap();
    assert_eq!(after.name.as_deref(), Some("Cafe Y"));
    assert_eq!(after.image, before.image);
    assert_eq!(after.comments, before.comments);
    assert_eq!(after.posted, before.posted);

    let html = body_text(get(state, &format!("/potties/{}", before.id)).await).await;
    assert!(html.contains("Cafe Y"));
  }

  #[tokio::test]
  async fn update_with_real_put_and_header_override() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    let resp = send(
      state.clone(),
      "PUT",
      &format!("/potties/{id}"),
      vec![(header::CONTENT_TYPE, FORM)],
      "comments=Spotless",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let resp = send(
      state.clone(),
      "POST",
      &format!("/potties/{id}"),
      vec![
        (header::CONTENT_TYPE, FORM),
        (header::HeaderName::from_static("x-http-method-override"), "PUT"),
      ],
      "image=http%3A%2F%2Fx%2Fz.png",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let record = state.service.show(id).await.unwrap();
    assert_eq!(record.name.as_deref(), Some("Cafe X"));
    assert_eq!(record.comments.as_deref(), Some("Spotless"));
    assert_eq!(record.image.as_deref(), Some("http://x/z.png"));
  }

  #[tokio::test]
  async fn update_strips_script_from_comments() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    post_form(
      state.clone(),
      &format!("/potties/{id}?_method=PUT"),
      "comments=%3CSCRIPT%3Ex()%3C%2FSCRIPT%3EOk",
    )
    .await;

    let record = state.service.show(id).await.unwrap();
    assert_eq!(record.comments.as_deref(), Some("Ok"));
  }

  #[tokio::test]
  async fn update_unknown_id_is_404_and_creates_nothing() {
    let state = make_state().await;
    let resp = post_form(
      state.clone(),
      &format!("/potties/{}?_method=PUT", Uuid::new_v4()),
      "name=Ghost",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(state.service.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn post_to_record_without_override_is_405() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    let resp = post_form(state, &format!("/potties/{id}"), "name=Nope").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_via_override_then_show_is_404() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    let resp = post_form(state.clone(), &format!("/potties/{id}?_method=DELETE"), "").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/potties");

    let resp = get(state.clone(), &format!("/potties/{id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_text(resp).await.contains("Cafe X"));
  }

  #[tokio::test]
  async fn second_delete_is_404_and_service_keeps_running() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    let first = send(state.clone(), "DELETE", &format!("/potties/{id}"), vec![], "").await;
    assert_eq!(first.status(), StatusCode::FOUND);

    let second = send(state.clone(), "DELETE", &format!("/potties/{id}"), vec![], "").await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    assert!(state.service.list().await.unwrap().is_empty());
    assert_eq!(get(state, "/potties").await.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn get_with_override_param_is_not_rewritten() {
    let state = make_state().await;
    post_form(state.clone(), "/potties", CAFE_X).await;
    let id = only_record(&state).await.id;

    let resp = get(state.clone(), &format!("/potties/{id}?_method=DELETE")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(state.service.show(id).await.is_ok());
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[derive(Clone)]
  struct BrokenStore;

  #[derive(Debug, thiserror::Error)]
  #[error("disk quota exceeded on /var/lib/potty")]
  struct DiskFull;

  impl PottyStore for BrokenStore {
    type Error = DiskFull;

    async fn list(&self) -> Result<Vec<PottyRecord>, DiskFull> { Err(DiskFull) }

    async fn insert(&self, _: PottyFields) -> Result<PottyRecord, DiskFull> {
      Err(DiskFull)
    }

    async fn get(&self, _: Uuid) -> Result<Option<PottyRecord>, DiskFull> {
      Err(DiskFull)
    }

    async fn update(
      &self,
      _: Uuid,
      _: PottyFields,
    ) -> Result<Option<PottyRecord>, DiskFull> {
      Err(DiskFull)
    }

    async fn delete(&self, _: Uuid) -> Result<bool, DiskFull> { Err(DiskFull) }
  }

  fn broken_state() -> AppState<BrokenStore> {
    AppState {
      service: PottyService::new(Arc::new(BrokenStore)),
      config:  test_config(),
    }
  }

  #[tokio::test]
  async fn store_failure_is_500_without_details() {
    let state = broken_state();
    let id = Uuid::new_v4();
    let form = vec![(header::CONTENT_TYPE, FORM)];

    let responses = [
      send(state.clone(), "GET", "/potties", vec![], "").await,
      send(state.clone(), "POST", "/potties", form.clone(), CAFE_X).await,
      send(state.clone(), "GET", &format!("/potties/{id}"), vec![], "").await,
      send(state.clone(), "PUT", &format!("/potties/{id}"), form, "name=X").await,
      send(state.clone(), "DELETE", &format!("/potties/{id}"), vec![], "").await,
    ];

    for resp in responses {
      assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
      let html = body_text(resp).await;
      assert!(html.contains("Something went wrong"), "{html}");
      assert!(!html.contains("disk quota"), "{html}");
      assert!(!html.contains("/var/lib/potty"), "{html}");
    }
  }

  #[tokio::test]
  async fn store_failure_does_not_stop_later_requests() {
    let state = broken_state();
    let failed = send(state.clone(), "GET", "/potties", vec![], "").await;
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let form = send(state.clone(), "GET", "/potties/new", vec![], "").await;
    assert_eq!(form.status(), StatusCode::OK);

    let healthy = make_state().await;
    assert_eq!(get(healthy, "/potties").await.status(), StatusCode::OK);
  }

  // ── Static assets ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn stylesheet_is_served() {
    let resp = get(make_state().await, "/public/app.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
