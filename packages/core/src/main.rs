use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use gas_trax::analytics::rpc_adapter::RpcFeeHistoryProvider;
use gas_trax::analytics::{FeeAnalyticsEngine, FeeHistoryProvider};
use gas_trax::api::{self, ApiState};
use gas_trax::cli::Cli;
use gas_trax::config::Config;
use gas_trax::display::{format_fullness, format_gwei, Badge};
use gas_trax::error::AppError;
use gas_trax::logging::init_logging;
use gas_trax::metrics::AppMetrics;
use gas_trax::scheduler::{self, SharedProvider};
use gas_trax::services::rpc::{RetryPolicy, RpcClient};
use gas_trax::store::{SnapshotStore, DEFAULT_CAPACITY};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let once = cli.once;

    let config = Config::from_env()
        .and_then(|config| config.apply_cli(&cli))
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!("Service started with config: {:?}", config);

    let result = if once {
        run_once(config).await
    } else {
        run_service(config).await
    };

    if let Err(err) = result {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn build_provider(config: &Config) -> Result<RpcFeeHistoryProvider, AppError> {
    let client = RpcClient::new(config.rpc_url.clone(), config.request_timeout)?.with_retry(
        RetryPolicy {
            max_retries: config.rpc_max_retries,
            ..RetryPolicy::default()
        },
    );
    Ok(RpcFeeHistoryProvider::new(client, config.block_count))
}

/// Fetch a single window, print it, and exit.
async fn run_once(config: Config) -> Result<(), AppError> {
    let provider = build_provider(&config)?;
    let engine = FeeAnalyticsEngine::new(config.analytics.clone());

    let raw = provider
        .fetch_fee_history()
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;
    let summary = engine
        .summarize(&raw)
        .map_err(|err| AppError::Parse(err.to_string()))?;

    let pretty =
        serde_json::to_string_pretty(&summary).map_err(|err| AppError::Parse(err.to_string()))?;
    println!("{}", pretty);

    let badge = Badge::for_base_fee(summary.current_base_fee);
    println!(
        "badge {} {} | {:?} | fullness {} | next {} / mid {} / bargain {} gwei",
        badge.text,
        badge.color,
        summary.congestion,
        format_fullness(summary.fullness),
        format_gwei(summary.rows.next.max_fee),
        format_gwei(summary.rows.mid.max_fee),
        format_gwei(summary.rows.bargain.max_fee),
    );
    Ok(())
}

/// Poll in the background and serve the HTTP API until Ctrl+C.
async fn run_service(config: Config) -> Result<(), AppError> {
    let provider: SharedProvider = Arc::new(build_provider(&config)?);
    match provider.health_check().await {
        Ok(()) => tracing::info!("{} endpoint reachable", provider.provider_name()),
        Err(err) => tracing::warn!(
            "{} endpoint not reachable yet, polling anyway: {}",
            provider.provider_name(),
            err
        ),
    }
    let store = Arc::new(RwLock::new(SnapshotStore::new(DEFAULT_CAPACITY)));
    let engine = Arc::new(FeeAnalyticsEngine::new(config.analytics.clone()));
    let metrics = Arc::new(
        AppMetrics::new().map_err(|err| AppError::Config(format!("metrics: {}", err)))?,
    );

    let poller = tokio::spawn(scheduler::run_fee_polling(
        provider,
        store.clone(),
        engine.clone(),
        metrics.clone(),
        config.poll_interval_seconds,
    ));

    let app = api::create_router(ApiState {
        store,
        engine,
        metrics,
    });

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|err| AppError::Config(format!("Failed to bind {}: {}", addr, err)))?;
    tracing::info!("HTTP API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|err| AppError::Unknown(err.to_string()))?;

    if let Err(err) = poller.await {
        tracing::warn!("Polling task ended abnormally: {}", err);
    }
    Ok(())
}
