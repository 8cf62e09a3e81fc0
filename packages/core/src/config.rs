use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::analytics::rpc_adapter::DEFAULT_BLOCK_COUNT;
use crate::analytics::AnalyticsConfig;
use crate::cli::Cli;

pub const DEFAULT_RPC_URL: &str = "https://ethereum-rpc.publicnode.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub poll_interval_seconds: u64,
    pub block_count: u64,
    pub request_timeout: Duration,
    pub rpc_max_retries: u32,
    pub api_port: u16,
    pub analytics: AnalyticsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let rpc_url = match lookup("RPC_URL") {
            Some(url) if !url.trim().is_empty() => validate_rpc_url(&url)?,
            _ => DEFAULT_RPC_URL.to_string(),
        };

        let poll_interval_seconds = parse_var(&lookup, "POLL_INTERVAL_SECONDS", 30)?;
        let block_count = parse_var(&lookup, "BLOCK_COUNT", DEFAULT_BLOCK_COUNT)?;
        let request_timeout_seconds = parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 10)?;
        let rpc_max_retries = parse_var(&lookup, "RPC_MAX_RETRIES", 2)?;
        let api_port = parse_var(&lookup, "API_PORT", 8080)?;

        let mut analytics = AnalyticsConfig::default();
        analytics.congestion.dispersion_gwei = parse_var(
            &lookup,
            "CONGESTION_DISPERSION_GWEI",
            analytics.congestion.dispersion_gwei,
        )?;

        let config = Self {
            rpc_url,
            poll_interval_seconds,
            block_count,
            request_timeout: Duration::from_secs(request_timeout_seconds),
            rpc_max_retries,
            api_port,
            analytics,
        };
        config.validate()?;
        Ok(config)
    }

    /// Command-line flags take precedence over the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self, String> {
        if let Some(url) = &cli.rpc_url {
            self.rpc_url = validate_rpc_url(url)?;
        }
        if let Some(interval) = cli.poll_interval {
            self.poll_interval_seconds = interval;
        }
        if let Some(block_count) = cli.block_count {
            self.block_count = block_count;
        }
        if let Some(port) = cli.port {
            self.api_port = port;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), String> {
        if self.poll_interval_seconds == 0 {
            return Err("POLL_INTERVAL_SECONDS must be greater than zero".to_string());
        }
        if self.block_count == 0 {
            return Err("BLOCK_COUNT must be greater than zero".to_string());
        }
        if self.request_timeout.is_zero() {
            return Err("REQUEST_TIMEOUT_SECONDS must be greater than zero".to_string());
        }
        let dispersion = self.analytics.congestion.dispersion_gwei;
        if !dispersion.is_finite() || dispersion < 0.0 {
            return Err(
                "CONGESTION_DISPERSION_GWEI must be a finite, non-negative number".to_string(),
            );
        }
        Ok(())
    }
}

/// Accept only non-empty, well-formed `https://` endpoints.
pub fn validate_rpc_url(url: &str) -> Result<String, String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("RPC URL cannot be empty.".to_string());
    }
    if !url.starts_with("https://") {
        return Err("RPC URL must start with https://".to_string());
    }
    Url::parse(url).map_err(|_| "Invalid RPC URL format.".to_string())?;
    Ok(url.to_string())
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, String> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
