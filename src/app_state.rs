//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` contains the
//! repository, the metrics registry, the route table used for endpoint
//! labeling, and the deployment environment string.
//!
//! The state is designed to be cheaply cloneable (using `Arc` internally
//! where needed) so it can be passed efficiently to each request handler
//! without expensive copying of resources.

use crate::domain::{MetricsPtr, RepositoryPtr, RouteTable};
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the
/// application. It is built once at startup, never mutated, and cloned
/// cheaply for each request via Axum's `State` extractor.
///
/// Handlers depend on the `ItemRepository` and `Metrics` abstractions, not
/// on the Postgres or Prometheus implementations, so tests can inject
/// in-memory fakes and isolated registries.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Persistence backend for items, also pinged by the readiness probe.
    repository: RepositoryPtr,

    /// Metrics registry updated by the instrumentation middleware.
    metrics: MetricsPtr,

    /// Route descriptors captured at startup, used to resolve the endpoint
    /// label for every request.
    routes: Arc<RouteTable>,

    /// Deployment environment reported by `/status`.
    environment: String,
}

impl AppState {
    // ---

    pub fn new(
        repository: RepositoryPtr,
        metrics: MetricsPtr,
        routes: RouteTable,
        environment: String,
    ) -> Self {
        // ---
        AppState {
            repository,
            metrics,
            routes: Arc::new(routes),
            environment,
        }
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the route table.
    pub(crate) fn routes(&self) -> &RouteTable {
        // ---
        &self.routes
    }

    /// Get the deployment environment name.
    pub(crate) fn environment(&self) -> &str {
        // ---
        &self.environment
    }
}
