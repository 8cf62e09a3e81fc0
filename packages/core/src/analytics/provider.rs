//! Fee History Provider Interface
//!
//! Abstracts the data source that supplies raw `eth_feeHistory` results

use async_trait::async_trait;

use crate::analytics::{error::ProviderError, types::RawSampleSet};

/// Trait for fee history sources so the engine never depends on transport
#[async_trait]
pub trait FeeHistoryProvider {
    /// Fetch the latest fee history window
    async fn fetch_fee_history(&self) -> Result<RawSampleSet, ProviderError>;

    /// Get the name of this provider for logging/debugging
    fn provider_name(&self) -> &str;

    /// Check if the provider is currently available
    async fn health_check(&self) -> Result<(), ProviderError> {
        self.fetch_fee_history().await.map(|_| ())
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_rpc::MockRpcClient;

    #[tokio::test]
    async fn default_health_check_fetches_once() {
        let provider = MockRpcClient::new().with_history(RawSampleSet::default());
        assert!(provider.health_check().await.is_ok());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn default_health_check_surfaces_fetch_errors() {
        let provider = MockRpcClient::new();
        assert!(matches!(
            provider.health_check().await,
            Err(ProviderError::ServiceUnavailable)
        ));
    }
}
