//! Prometheus metrics registry for gas-trax.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the scheduler and HTTP middleware.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{
    Counter, CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry,
};

use crate::analytics::Summary;

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total number of fee history polling attempts (success + failure).
    pub polls_total: Counter,
    /// Total number of failed polling attempts.
    pub poll_errors_total: Counter,
    /// Reward rows rejected for carrying fewer than five percentiles.
    pub reward_rows_dropped_total: Counter,
    /// Latest base fee in gwei.
    pub current_base_fee: Gauge,
    /// Latest mean block fullness (0.0 - 1.0).
    pub network_fullness: Gauge,
    /// Latest congestion level: 0 favorable, 1 choppy, 2 congested.
    pub congestion_level: Gauge,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let polls_total = Counter::with_opts(Opts::new(
            "gas_trax_polls_total",
            "Total fee history polling attempts",
        ))?;

        let poll_errors_total = Counter::with_opts(Opts::new(
            "gas_trax_poll_errors_total",
            "Failed fee history polling attempts",
        ))?;

        let reward_rows_dropped_total = Counter::with_opts(Opts::new(
            "gas_trax_reward_rows_dropped_total",
            "Incomplete reward rows dropped by the parser",
        ))?;

        let current_base_fee = Gauge::with_opts(Opts::new(
            "gas_trax_current_base_fee_gwei",
            "Latest base fee in gwei",
        ))?;

        let network_fullness = Gauge::with_opts(Opts::new(
            "gas_trax_network_fullness",
            "Mean gas used ratio over the trailing window",
        ))?;

        let congestion_level = Gauge::with_opts(Opts::new(
            "gas_trax_congestion_level",
            "0 favorable, 1 choppy, 2 congested",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "gas_trax_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "gas_trax_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        registry.register(Box::new(polls_total.clone()))?;
        registry.register(Box::new(poll_errors_total.clone()))?;
        registry.register(Box::new(reward_rows_dropped_total.clone()))?;
        registry.register(Box::new(current_base_fee.clone()))?;
        registry.register(Box::new(network_fullness.clone()))?;
        registry.register(Box::new(congestion_level.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            polls_total,
            poll_errors_total,
            reward_rows_dropped_total,
            current_base_fee,
            network_fullness,
            congestion_level,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    /// Update the gauges from a freshly computed summary.
    pub fn observe_summary(&self, summary: &Summary, rows_dropped: usize) {
        self.current_base_fee.set(summary.current_base_fee);
        self.network_fullness.set(summary.fullness);
        self.congestion_level.set(summary.congestion.level() as f64);
        self.reward_rows_dropped_total.inc_by(rows_dropped as f64);
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{analyze, Congestion, NormalizedSamples};

    #[test]
    fn all_metrics_register_without_error() {
        let metrics = AppMetrics::new();
        assert!(metrics.is_ok(), "AppMetrics::new() failed: {:?}", metrics.err());
    }

    #[test]
    fn render_contains_poll_counter_after_increment() {
        let metrics = AppMetrics::new().unwrap();
        metrics.polls_total.inc_by(5.0);
        let output = metrics.render().unwrap();
        assert!(output.contains("gas_trax_polls_total 5"));
    }

    #[test]
    fn observe_summary_sets_gauges() {
        let metrics = AppMetrics::new().unwrap();
        let summary = analyze(&NormalizedSamples {
            base_fees: vec![12.5],
            utilization: vec![1.0],
            ..Default::default()
        });
        assert_eq!(summary.congestion, Congestion::Congested);

        metrics.observe_summary(&summary, 3);

        assert!((metrics.current_base_fee.get() - 12.5).abs() < f64::EPSILON);
        assert!((metrics.network_fullness.get() - 1.0).abs() < f64::EPSILON);
        assert!((metrics.congestion_level.get() - 2.0).abs() < f64::EPSILON);
        assert!((metrics.reward_rows_dropped_total.get() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn http_requests_counter_vec_labels_work() {
        let metrics = AppMetrics::new().unwrap();
        metrics
            .http_requests_total
            .with_label_values(&["GET", "/fees/summary", "200"])
            .inc();
        let val = metrics
            .http_requests_total
            .with_label_values(&["GET", "/fees/summary", "200"])
            .get();
        assert!((val - 1.0).abs() < f64::EPSILON);
    }
}
