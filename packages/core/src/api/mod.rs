//! HTTP API: summary, badge, history, on-demand analysis and metrics.

pub mod fees;
pub mod headers;
pub mod health;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::analytics::FeeAnalyticsEngine;
use crate::metrics::AppMetrics;
use crate::store::SnapshotStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<RwLock<SnapshotStore>>,
    pub engine: Arc<FeeAnalyticsEngine>,
    pub metrics: Arc<AppMetrics>,
}

/// Assemble the full router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(render_metrics))
        .route("/fees/summary", get(fees::current_summary))
        .route("/fees/badge", get(fees::badge))
        .route("/fees/history", get(fees::history))
        .route("/fees/analyze", post(fees::analyze_history))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn render_metrics(State(state): State<ApiState>) -> Response {
    match state.metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .expect("metrics response should be valid"),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("metrics error"))
                .expect("metrics error response should be valid")
        }
    }
}

async fn track_metrics(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    state
        .metrics
        .http_request_duration
        .observe(started.elapsed().as_secs_f64());
    state
        .metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), path.as_str(), response.status().as_str()])
        .inc();

    response
}
