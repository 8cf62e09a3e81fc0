//! Minimal JSON-RPC 2.0 client for the fee history endpoint.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analytics::types::RawSampleSet;
use crate::error::AppError;

/// Retry settings for transport failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff with up to 50% random jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let backoff = base_ms.saturating_mul(1u64 << attempt.min(16));
        let jitter = rand::thread_rng().gen_range(0..=base_ms / 2);
        Duration::from_millis(backoff.saturating_add(jitter))
    }
}

#[derive(Clone)]
pub struct RpcClient {
    rpc_url: String,
    http: Client,
    timeout: Duration,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    message: Option<String>,
}

impl RpcClient {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {}", err)))?;

        Ok(Self {
            rpc_url,
            http,
            timeout,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Call `method`, retrying network failures and timeouts.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, AppError> {
        let mut attempt = 0;
        loop {
            match self.call_once(method, &params).await {
                Ok(result) => return Ok(result),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        "{} failed (attempt {}), retrying in {:?}: {}",
                        method,
                        attempt + 1,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn call_once<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &Value,
    ) -> Result<T, AppError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params: params.clone(),
        };

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "RPC HTTP {}",
                response.status().as_u16()
            )));
        }

        let body = response
            .json::<RpcResponse<T>>()
            .await
            .map_err(|err| self.transport_error(err))?;

        if let Some(error) = body.error {
            return Err(AppError::Rpc(
                error.message.unwrap_or_else(|| "RPC error".to_string()),
            ));
        }

        body.result
            .ok_or_else(|| AppError::Parse(format!("{} response has no result", method)))
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(format!("Request timed out ({} s)", self.timeout.as_secs()))
        } else if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl RpcClient {
    /// `eth_feeHistory` over the latest `block_count` blocks.
    pub async fn fee_history(
        &self,
        block_count: u64,
        percentiles: &[u8],
    ) -> Result<RawSampleSet, AppError> {
        let params = json!([format!("{:#x}", block_count), "latest", percentiles]);
        self.call("eth_feeHistory", params).await
    }
}
