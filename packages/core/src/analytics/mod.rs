//! Fee Analytics Module
//!
//! Turns a window of per-block base fees, priority-fee percentiles and gas
//! utilization into a trend, a congestion level and three fee quotes.

pub mod engine;
pub mod parser;
pub mod units;
pub mod stats;
pub mod trend;
pub mod congestion;
pub mod tiers;
pub mod types;
pub mod error;
pub mod config;
pub mod provider;
pub mod rpc_adapter;

#[cfg(test)]
mod tests;

pub use engine::{analyze, FeeAnalyticsEngine};
pub use parser::parse;
pub use types::*;
pub use error::{AnalyticsError, ProviderError};
pub use config::AnalyticsConfig;
pub use provider::FeeHistoryProvider;
