// Test helpers are intentionally partially used
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use item_service::domain::{Item, ItemRepository, NewItem, RepositoryPtr};
use item_service::{create_router_with, PrometheusMetrics};
use reqwest::Client;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Mock repositories
// ============================================================================

/// In-memory item store so the integration suite runs without Postgres.
pub struct InMemoryRepository {
    items: Mutex<Vec<Item>>,
    next_id: AtomicI32,
}

impl InMemoryRepository {
    // ---
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ItemRepository for InMemoryRepository {
    // ---
    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        let item = Item {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: new_item.name,
            description: new_item.description,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get_item(&self, item_id: i32) -> Result<Option<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == item_id)
            .cloned())
    }

    async fn delete_item(&self, item_id: i32) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != item_id);
        Ok(items.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Repository whose every operation fails, for exercising error paths.
pub struct FailingRepository;

#[async_trait::async_trait]
impl ItemRepository for FailingRepository {
    // ---
    async fn create_item(&self, _new_item: NewItem) -> Result<Item> {
        Err(anyhow!("database is down"))
    }
    async fn list_items(&self) -> Result<Vec<Item>> {
        Err(anyhow!("database is down"))
    }
    async fn get_item(&self, _item_id: i32) -> Result<Option<Item>> {
        Err(anyhow!("database is down"))
    }
    async fn delete_item(&self, _item_id: i32) -> Result<bool> {
        Err(anyhow!("database is down"))
    }
    async fn ping(&self) -> Result<()> {
        Err(anyhow!("database is down"))
    }
}

// ============================================================================
// Test server
// ============================================================================

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub metrics: Arc<PrometheusMetrics>,
}

impl TestServer {
    // ---
    /// Spawn a server over the given repository with its own isolated
    /// metrics registry, so tests can assert on exact counter values.
    pub async fn with_repository(repository: RepositoryPtr) -> Self {
        // --

        let metrics = Arc::new(PrometheusMetrics::new().expect("metrics registry"));
        let app = create_router_with(repository, metrics.clone(), "test");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            metrics,
        }
    }

    pub async fn new() -> Self {
        // ---
        Self::with_repository(Arc::new(InMemoryRepository::new())).await
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
