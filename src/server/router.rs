//! HTTP Routes
//!
//! Thin glue between HTTP and the [`Gateway`]:
//!
//! ```text
//! GET  /                  welcome text
//! POST /air-copy          form:  value, ttl?  ──> key
//! GET  /air-copy          query: value, ttl?  ──> key
//! GET  /air-paste/{key}   ──> value | 404
//! ```
//!
//! `ttl` is a whole number of seconds. When it is missing or empty the
//! gateway's default TTL applies.
//!
//! Negative values are refused with 400 rather than read as "never expires":
//! an anonymous client must not be able to pin text in memory forever.
//! Perpetual entries stay available to in-process callers through
//! [`SetOptions::perpetual`].

use crate::gateway::Gateway;
use crate::keys::KeyGenerator;
use crate::storage::{Datastore, SetOptions};
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, error, warn};

/// Body returned for any server-side failure. The cause only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An error occurred while processing the request, please try again later";

/// Body returned when a key is absent or expired.
pub const NOT_FOUND_MESSAGE: &str = "Key not found";

const WELCOME: &str = r#"Welcome to AirPaste!

Stuck in an SSH session or a remote desktop where the clipboard does not work?
Copy text into AirPaste from one side and paste it out on the other.

Copy:
  POST /air-copy   with form field "value" (and optionally "ttl")
  GET  /air-copy   with query parameter "value" (and optionally "ttl")
  Either one answers with a short key.

  "ttl" is the number of seconds the text is kept. Without it, text is kept
  for two minutes.

Paste:
  GET /air-paste/{key}

Nothing is written to disk; a restart forgets everything.
"#;

/// Parameters accepted by both copy endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CopyParams {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub ttl: Option<String>,
}

/// A `ttl` parameter that is not a non-negative whole number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ttl {0:?}: expected a non-negative number of seconds")]
pub struct TtlError(pub String);

/// Builds the router for all airpaste endpoints.
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/air-copy", get(copy_from_query).post(copy_from_form))
        .route("/air-paste/{key}", get(paste))
        .with_state(gateway)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    gateway: Arc<Gateway>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Turns the raw `ttl` parameter into store options.
///
/// `None` (or blank) means "use the default TTL". Negative values are errors.
pub fn parse_ttl(raw: Option<&str>) -> Result<Option<SetOptions>, TtlError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(secs) => secs
            .parse::<u64>()
            .map(|secs| Some(SetOptions::with_ttl(Duration::from_secs(secs))))
            .map_err(|_| TtlError(secs.to_string())),
    }
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn copy_from_query(
    State(gateway): State<Arc<Gateway>>,
    Query(params): Query<CopyParams>,
) -> Response {
    copy(&gateway, params)
}

async fn copy_from_form(
    State(gateway): State<Arc<Gateway>>,
    Form(params): Form<CopyParams>,
) -> Response {
    copy(&gateway, params)
}

async fn paste(State(gateway): State<Arc<Gateway>>, Path(key): Path<String>) -> Response {
    match gateway.retrieve(&key) {
        Some(value) => (StatusCode::OK, value).into_response(),
        None => {
            debug!(key_len = key.len(), "Paste miss");
            (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
        }
    }
}

/// Shared body of both copy endpoints.
pub fn copy<S, G>(gateway: &Gateway<S, G>, params: CopyParams) -> Response
where
    S: Datastore,
    G: KeyGenerator,
{
    let options = match parse_ttl(params.ttl.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            warn!(error = %e, "Rejected copy request");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match gateway.issue_and_store(&params.value, options) {
        Ok(key) => {
            debug!(
                key_len = key.len(),
                value_len = params.value.len(),
                "Stored value"
            );
            (StatusCode::OK, key).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store value");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}
