use std::sync::Arc;

/// Abstraction over the request-metrics registry.
///
/// One implementation backs it with a Prometheus registry, the other is a
/// no-op for runs where metrics are disabled. All three instruments are
/// keyed by the (method, endpoint) label pair; the counter additionally
/// carries the response status.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Mark a request as entered for (method, endpoint).
    fn inc_in_flight(&self, method: &str, endpoint: &str);

    /// Mark a request as exited for (method, endpoint).
    fn dec_in_flight(&self, method: &str, endpoint: &str);

    /// Record a completed request: outcome counter plus latency observation.
    fn record_request(&self, method: &str, endpoint: &str, status: u16, elapsed_secs: f64);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
