use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::store::FeedState;
use super::ApiState;

fn plain(status: StatusCode, text: &'static str) -> Response {
    Response::builder()
        .status(status)
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .body(Body::from(text))
        .expect("health response should be valid")
}

/// Liveness: the process is up.
pub async fn health() -> impl IntoResponse {
    plain(StatusCode::OK, "ok")
}

/// Readiness: the last poll produced a usable summary.
pub async fn ready(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.read().await.feed_state() {
        FeedState::Ready(_) => plain(StatusCode::OK, "ready"),
        FeedState::Pending | FeedState::Failed(_) => {
            plain(StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
    }
}
