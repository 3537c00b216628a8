mod noop_metrics;
mod prometheus_metrics;

pub use noop_metrics::NoopMetrics;
pub use prometheus_metrics::PrometheusMetrics;

use crate::domain::MetricsPtr;
use std::sync::Arc;

/// Creates a new Prometheus metrics registry.
///
/// Each call builds an isolated registry instance; nothing is installed
/// globally, so multiple routers (or parallel tests) can each own one.
pub fn create_prom_metrics() -> anyhow::Result<MetricsPtr> {
    // ---
    tracing::info!("Initializing Prometheus metrics");
    Ok(Arc::new(PrometheusMetrics::new()?))
}

/// Creates a new no-op metrics implementation.
///
/// All metrics calls are ignored and `render()` is empty. Useful for
/// development or when metrics are disabled.
pub fn create_noop_metrics() -> anyhow::Result<MetricsPtr> {
    // ---
    Ok(Arc::new(NoopMetrics::new()))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn create_returns_valid_metrics() {
        assert!(create_prom_metrics().is_ok());
        assert!(create_noop_metrics().is_ok());
    }
}
