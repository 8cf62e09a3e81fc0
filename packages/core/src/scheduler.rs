//! Fee polling scheduler.
//!
//! Drives the main polling loop: each tick fetches a fee history window
//! from the provider, runs it through the analytics engine and stores the
//! resulting snapshot, so the API layer always serves fresh numbers.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::signal;
use tokio::sync::RwLock;
use tokio::time;

use crate::analytics::{parse, FeeAnalyticsEngine, FeeHistoryProvider};
use crate::metrics::AppMetrics;
use crate::store::{Snapshot, SnapshotStore};

/// Shared fee history source.
pub type SharedProvider = Arc<dyn FeeHistoryProvider + Send + Sync>;

/// Run the fee polling loop until `Ctrl+C` (SIGINT) is received.
///
/// Errors are logged and recorded in the store; a single failed poll never
/// takes down the scheduler.
pub async fn run_fee_polling(
    provider: SharedProvider,
    store: Arc<RwLock<SnapshotStore>>,
    engine: Arc<FeeAnalyticsEngine>,
    metrics: Arc<AppMetrics>,
    poll_interval_seconds: u64,
) {
    let mut interval = time::interval(Duration::from_secs(poll_interval_seconds));

    tracing::info!(
        "Fee polling started via {} (interval: {}s)",
        provider.provider_name(),
        poll_interval_seconds
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                poll_once(&provider, &store, &engine, &metrics).await;
            }

            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received. Stopping polling.");
                break;
            }
        }
    }

    tracing::info!("Fee polling stopped cleanly");
}

/// Execute a single poll cycle: fetch, parse, analyze, store.
pub async fn poll_once(
    provider: &SharedProvider,
    store: &Arc<RwLock<SnapshotStore>>,
    engine: &FeeAnalyticsEngine,
    metrics: &AppMetrics,
) {
    metrics.polls_total.inc();

    let raw = match provider.fetch_fee_history().await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!("Fee polling error, skipping tick: {}", err);
            metrics.poll_errors_total.inc();
            store.write().await.record_failure(err.to_string());
            return;
        }
    };

    let samples = match parse(&raw) {
        Ok(samples) => samples,
        Err(err) => {
            tracing::error!("Unusable fee history: {}", err);
            metrics.poll_errors_total.inc();
            store.write().await.record_failure(err.to_string());
            return;
        }
    };

    let summary = engine.analyze(&samples);
    metrics.observe_summary(&summary, samples.rows_dropped);

    tracing::info!(
        "Base fee {:.3} gwei, {:?} ({:+.1}%), {:?}, fullness {:.1}%",
        summary.current_base_fee,
        summary.trend,
        summary.percent_change,
        summary.congestion,
        summary.fullness * 100.0,
    );

    store.write().await.push(Snapshot {
        fetched_at: Utc::now(),
        rows_dropped: samples.rows_dropped,
        summary,
    });
}
