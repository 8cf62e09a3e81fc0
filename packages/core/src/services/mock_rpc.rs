//! In-memory fee history provider for scheduler and API tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analytics::{
    error::ProviderError,
    provider::{FeeHistoryProvider, ProviderResult},
    types::RawSampleSet,
};

/// Returns a fixed sample set, or a queued error for the next call.
#[derive(Default)]
pub struct MockRpcClient {
    history: Option<RawSampleSet>,
    error: Mutex<Option<ProviderError>>,
    calls: AtomicUsize,
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, history: RawSampleSet) -> Self {
        self.history = Some(history);
        self
    }

    /// Fail the next fetch with `error`; later fetches succeed again.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.fail_next(error);
        self
    }

    pub fn fail_next(&self, error: ProviderError) {
        *self.error.lock().expect("mock rpc lock poisoned") = Some(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeeHistoryProvider for MockRpcClient {
    async fn fetch_fee_history(&self) -> ProviderResult<RawSampleSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.error.lock().expect("mock rpc lock poisoned").take() {
            return Err(error);
        }
        self.history.clone().ok_or(ProviderError::ServiceUnavailable)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
