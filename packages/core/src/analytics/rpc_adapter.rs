//! JSON-RPC Fee History Provider Adapter
//!
//! Adapts the RpcClient to implement the FeeHistoryProvider trait

use async_trait::async_trait;

use crate::analytics::{
    error::ProviderError,
    provider::{FeeHistoryProvider, ProviderResult},
    types::{RawSampleSet, PERCENTILES},
};
use crate::error::AppError;
use crate::services::rpc::RpcClient;

/// Default number of blocks sampled per request.
pub const DEFAULT_BLOCK_COUNT: u64 = 10;

/// Adapter that implements FeeHistoryProvider for RpcClient
pub struct RpcFeeHistoryProvider {
    client: RpcClient,
    block_count: u64,
}

impl RpcFeeHistoryProvider {
    pub fn new(client: RpcClient, block_count: u64) -> Self {
        Self {
            client,
            block_count,
        }
    }
}

impl From<AppError> for ProviderError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Timeout(message) => ProviderError::Timeout { message },
            AppError::Rpc(message) => ProviderError::RpcError { message },
            AppError::Parse(message) => ProviderError::FormatError { message },
            AppError::Network(message) | AppError::Config(message) | AppError::Unknown(message) => {
                ProviderError::NetworkError { message }
            }
        }
    }
}

#[async_trait]
impl FeeHistoryProvider for RpcFeeHistoryProvider {
    async fn fetch_fee_history(&self) -> ProviderResult<RawSampleSet> {
        let raw = self
            .client
            .fee_history(self.block_count, &PERCENTILES)
            .await?;
        Ok(raw)
    }

    fn provider_name(&self) -> &str {
        "JSON-RPC"
    }

    async fn health_check(&self) -> ProviderResult<()> {
        self.client
            .fee_history(1, &[])
            .await
            .map(|_| ())
            .map_err(|err| ProviderError::NetworkError {
                message: format!("RPC health check failed: {}", err),
            })
    }
}
