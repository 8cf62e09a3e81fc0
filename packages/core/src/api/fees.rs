use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analytics::{Congestion, RawSampleSet, Summary, Trend};
use crate::display::Badge;
use crate::error::AppError;
use crate::store::{FeedState, DEFAULT_CAPACITY};
use super::headers::{conditional_json, CachePolicy};
use super::ApiState;

const SUMMARY_CACHE: CachePolicy = CachePolicy { max_age: 5, swr: 10 };
const HISTORY_CACHE: CachePolicy = CachePolicy { max_age: 30, swr: 60 };
const DEFAULT_HISTORY_LIMIT: usize = 120;

/// Body returned instead of numbers when there is no fresh summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnavailableResponse {
    pub error: String,
    pub badge: Badge,
}

fn unavailable(message: impl Into<String>) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(UnavailableResponse {
            error: message.into(),
            badge: Badge::placeholder(),
        }),
    )
        .into_response()
}

pub async fn current_summary(
    State(state): State<ApiState>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let feed = state.store.read().await.feed_state();
    match feed {
        FeedState::Ready(snapshot) => {
            let body =
                serde_json::to_vec(&snapshot).map_err(|err| AppError::Parse(err.to_string()))?;
            Ok(conditional_json(
                SUMMARY_CACHE,
                &request_headers,
                body,
                snapshot.fetched_at,
            ))
        }
        FeedState::Pending => Ok(unavailable("No fee data yet")),
        FeedState::Failed(failure) => Ok(unavailable(failure.message)),
    }
}

pub async fn badge(State(state): State<ApiState>) -> Json<Badge> {
    let feed = state.store.read().await.feed_state();
    match feed {
        FeedState::Ready(snapshot) => Json(Badge::for_base_fee(snapshot.summary.current_base_fee)),
        FeedState::Pending | FeedState::Failed(_) => Json(Badge::placeholder()),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Condensed view of one stored snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub fetched_at: DateTime<Utc>,
    pub current_base_fee: f64,
    pub trend: Trend,
    pub congestion: Congestion,
}

pub async fn history(
    State(state): State<ApiState>,
    Query(params): Query<HistoryQuery>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(DEFAULT_CAPACITY);

    let snapshots = state.store.read().await.get_last_n(limit);
    let modified_at = snapshots
        .last()
        .map(|snapshot| snapshot.fetched_at)
        .unwrap_or_else(Utc::now);
    let points: Vec<HistoryPoint> = snapshots
        .into_iter()
        .map(|snapshot| HistoryPoint {
            fetched_at: snapshot.fetched_at,
            current_base_fee: snapshot.summary.current_base_fee,
            trend: snapshot.summary.trend,
            congestion: snapshot.summary.congestion,
        })
        .collect();

    let body = serde_json::to_vec(&points).map_err(|err| AppError::Parse(err.to_string()))?;
    Ok(conditional_json(HISTORY_CACHE, &request_headers, body, modified_at))
}

/// Analyze a caller-supplied fee history without touching the store.
pub async fn analyze_history(
    State(state): State<ApiState>,
    Json(raw): Json<RawSampleSet>,
) -> Result<Json<Summary>, (StatusCode, Json<Value>)> {
    state.engine.summarize(&raw).map(Json).map_err(|err| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        )
    })
}
