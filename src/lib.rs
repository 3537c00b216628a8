// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{http::Method, middleware::from_fn_with_state, routing::get, Router};
use std::env;

use domain::{MetricsPtr, RepositoryPtr, RouteDescriptor, RouteTable};
use handlers::{
    create_item, delete_item, get_item, health_check, list_items, metrics_handler,
    readiness_check, status_handler,
};

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod middleware;

pub use config::*;

// Hoist up the generic instrumentation entry point and the exposition path
pub use middleware::{observe, METRICS_PATH};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_postgres_repository,
    create_prom_metrics,
    ensure_schema,
    init_database_with_retry,
    NoopMetrics,
    PrometheusMetrics,
};

/// Route descriptors for every route `create_router_with` registers.
///
/// This is the static list the metrics middleware resolves endpoint labels
/// against; keep it in lockstep with the `Router::route` calls below.
fn route_table() -> RouteTable {
    // ---
    RouteTable::new(vec![
        RouteDescriptor::new("/health", &[Method::GET]),
        RouteDescriptor::new("/ready", &[Method::GET]),
        RouteDescriptor::new("/status", &[Method::GET]),
        RouteDescriptor::new("/metrics", &[Method::GET]),
        RouteDescriptor::new("/items", &[Method::GET, Method::POST]),
        RouteDescriptor::new("/items/{item_id}", &[Method::GET, Method::DELETE]),
    ])
}

/// Build the HTTP router from explicitly injected dependencies.
///
/// Tests use this to pair a mock repository with an isolated metrics
/// registry; `create_router` wires in the production implementations.
pub fn create_router_with(
    repository: RepositoryPtr,
    metrics: MetricsPtr,
    environment: impl Into<String>,
) -> Router {
    // ---
    let app_state = AppState::new(repository, metrics, route_table(), environment.into());

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .route("/items", get(list_items).post(create_item))
        .route("/items/{item_id}", get(get_item).delete(delete_item))
        // Router-level layer, not route_layer, so unmatched (404) requests
        // are instrumented as well.
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::track_requests,
        ))
        .with_state(app_state)
}

/// Build the HTTP router with production dependencies determined by
/// environment variables. Connects to Postgres (with retry) and bootstraps
/// the schema before returning.
pub async fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;

    // Determine metrics implementation from environment
    let metrics_type = env::var("ITEMS_METRICS_TYPE").unwrap_or_else(|_| "prom".to_string());
    let metrics = if metrics_type == "noop" {
        create_noop_metrics()?
    } else {
        create_prom_metrics()?
    };

    let pool = init_database_with_retry(&config.database).await?;
    let repository = create_postgres_repository(pool);

    Ok(create_router_with(repository, metrics, config.environment))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn route_table_covers_registered_routes() {
        // ---
        let table = route_table();
        assert_eq!(table.resolve(&Method::GET, "/health"), "/health");
        assert_eq!(table.resolve(&Method::GET, "/ready"), "/ready");
        assert_eq!(table.resolve(&Method::GET, "/status"), "/status");
        assert_eq!(table.resolve(&Method::POST, "/items"), "/items");
        assert_eq!(
            table.resolve(&Method::DELETE, "/items/3"),
            "/items/{item_id}"
        );
    }
}
