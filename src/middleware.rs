//! Request instrumentation middleware.
//!
//! Wraps every request/response cycle and records:
//!
//! - `http_requests_total{method, endpoint, status}` - Counter
//! - `http_request_duration_seconds{method, endpoint}` - Histogram
//! - `http_requests_in_flight{method, endpoint}` - Gauge
//!
//! The endpoint label is the matched route template, so dynamic path
//! segments never inflate label cardinality. `GET /metrics` itself is
//! exempt from instrumentation.

use crate::app_state::AppState;
use crate::domain::MetricsPtr;
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::time::Instant;

/// Exposition path, excluded from instrumentation.
pub const METRICS_PATH: &str = "/metrics";

/// Axum middleware entry point. Applied with
/// `middleware::from_fn_with_state`, after all routes so 404s are
/// captured too.
pub(crate) async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    if request.uri().path() == METRICS_PATH {
        return next.run(request).await;
    }

    let method = request.method().to_string();
    let endpoint = state.routes().resolve(request.method(), request.uri().path());

    let result: Result<Response, Infallible> = observe(
        state.metrics().clone(),
        &method,
        &endpoint,
        async move { Ok(next.run(request).await) },
    )
    .await;

    match result {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Instrument one downstream call.
///
/// Increments the in-flight gauge before awaiting `call`, then records the
/// outcome on whichever way the call exits:
///
/// - `Ok(response)`: counter under the response status, returned unchanged.
/// - `Err(err)`: counter under status 500, the error returned verbatim.
/// - Dropped mid-flight (task cancelled): the guard's `Drop` still
///   decrements the gauge and records a 500.
///
/// The gauge decrement and histogram observation fire exactly once per
/// entered request on every one of those paths.
pub async fn observe<F, E>(
    metrics: MetricsPtr,
    method: &str,
    endpoint: &str,
    call: F,
) -> Result<Response, E>
where
    F: Future<Output = Result<Response, E>>,
{
    // ---
    let guard = InflightGuard::new(metrics, method, endpoint);

    match call.await {
        Ok(response) => {
            guard.finish(response.status().as_u16());
            Ok(response)
        }
        Err(err) => {
            guard.finish(500);
            Err(err)
        }
    }
}

/// In-flight accounting for a single request.
///
/// Construction increments the gauge and starts the latency timer;
/// `finish` settles the books for a known status. If the guard is dropped
/// without `finish` - the wrapped future was cancelled - `Drop` performs
/// the same cleanup under status 500, so the gauge can never leak.
struct InflightGuard {
    metrics: MetricsPtr,
    method: String,
    endpoint: String,
    start: Instant,
    finished: bool,
}

impl InflightGuard {
    // ---
    fn new(metrics: MetricsPtr, method: &str, endpoint: &str) -> Self {
        metrics.inc_in_flight(method, endpoint);
        Self {
            metrics,
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            start: Instant::now(),
            finished: false,
        }
    }

    fn finish(mut self, status: u16) {
        self.finished = true;
        let elapsed = self.start.elapsed().as_secs_f64();
        self.metrics.dec_in_flight(&self.method, &self.endpoint);
        self.metrics
            .record_request(&self.method, &self.endpoint, status, elapsed);
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        if !self.finished {
            let elapsed = self.start.elapsed().as_secs_f64();
            self.metrics.dec_in_flight(&self.method, &self.endpoint);
            self.metrics
                .record_request(&self.method, &self.endpoint, 500, elapsed);
        }
    }
}
