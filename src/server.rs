//! HTTP adapter: converts axum requests into router requests and back.

use crate::{router, store::Store};

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

/// Build the axum application.
///
/// Every path except `/health` falls through to [`router::Router::dispatch`],
/// which owns the route table.
pub fn app<S: Store>(router: router::Router<S>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health_check))
        .fallback(handle::<S>)
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handle<S: Store>(
    State(router): State<router::Router<S>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let request = router::Request {
        method,
        path: uri.path().to_string(),
        body,
    };
    let reply = router.dispatch(request).await;
    (reply.status, Json(reply.body)).into_response()
}
