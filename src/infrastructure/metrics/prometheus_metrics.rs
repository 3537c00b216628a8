//! Prometheus metrics implementation.
//!
//! Each instance owns its own `prometheus::Registry`, so independent
//! registries can coexist in one process (parallel tests, multiple routers)
//! instead of sharing a process-global recorder.

use crate::domain::Metrics;
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

/// Latency bucket upper bounds in seconds. The encoder appends `+Inf`.
const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Prometheus-backed metrics registry.
///
/// Maintains the three request instruments:
///
/// - `http_requests_total{method, endpoint, status}` - Counter
/// - `http_request_duration_seconds{method, endpoint}` - Histogram
/// - `http_requests_in_flight{method, endpoint}` - Gauge
pub struct PrometheusMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGaugeVec,
}

impl PrometheusMetrics {
    pub fn new() -> Result<Self> {
        // ---
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "endpoint", "status"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;

        let requests_in_flight = IntGaugeVec::new(
            Opts::new(
                "http_requests_in_flight",
                "Number of HTTP requests currently being served",
            ),
            &["method", "endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
        })
    }

    /// Current counter value for one (method, endpoint, status) tuple.
    pub fn request_count(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        self.requests_total
            .with_label_values(&[method, endpoint, &status.to_string()])
            .get()
    }

    /// Current in-flight gauge value for one (method, endpoint) pair.
    pub fn in_flight(&self, method: &str, endpoint: &str) -> i64 {
        self.requests_in_flight
            .with_label_values(&[method, endpoint])
            .get()
    }
}

impl Metrics for PrometheusMetrics {
    // ---
    fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(err) = encoder.encode(&self.registry.gather(), &mut buffer) {
            // Never let exposition problems turn into request failures.
            tracing::error!("failed to encode metrics: {err}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    fn inc_in_flight(&self, method: &str, endpoint: &str) {
        self.requests_in_flight
            .with_label_values(&[method, endpoint])
            .inc();
    }

    fn dec_in_flight(&self, method: &str, endpoint: &str) {
        self.requests_in_flight
            .with_label_values(&[method, endpoint])
            .dec();
    }

    fn record_request(&self, method: &str, endpoint: &str, status: u16, elapsed_secs: f64) {
        self.requests_total
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(elapsed_secs);
    }
}
