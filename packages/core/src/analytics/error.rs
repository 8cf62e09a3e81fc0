//! Error types for fee analytics operations

use thiserror::Error;

/// Errors raised while turning a raw fee-history sample set into samples.
///
/// The analysis step itself never fails; only the parser produces these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Malformed fee history: {message}")]
    MalformedInput { message: String },

    #[error("Invalid quantity in {field}[{index}]: {value}")]
    InvalidQuantity {
        field: &'static str,
        index: usize,
        value: String,
    },
}

/// Errors from fee history providers
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("RPC error: {message}")]
    RpcError { message: String },

    #[error("Data format error: {message}")]
    FormatError { message: String },

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl AnalyticsError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput { message: message.into() }
    }

    pub fn invalid_quantity(field: &'static str, index: usize, value: impl ToString) -> Self {
        Self::InvalidQuantity {
            field,
            index,
            value: value.to_string(),
        }
    }
}
