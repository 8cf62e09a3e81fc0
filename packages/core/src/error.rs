use std::error::Error;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified application error.
///
/// This ensures all layers (config, network, parsing)
/// fail in a predictable and debuggable way.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Rpc(String),
    Parse(String),
    Unknown(String),
}

impl AppError {
    /// Transport failures that may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::Rpc(msg) => write!(f, "RPC error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AppError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Network(_) | AppError::Rpc(_) | AppError::Parse(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Config(_) | AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
