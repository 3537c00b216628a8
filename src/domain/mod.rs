mod item;
mod metrics;
mod repository;
mod routes;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the persistence abstraction and item models
pub use item::{Item, NewItem};
pub use repository::{ItemRepository, RepositoryPtr};

// Publicly expose route-label resolution
pub use routes::{RouteDescriptor, RouteTable};
