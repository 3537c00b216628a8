use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::domain::{Item, ItemRepository, NewItem, RepositoryPtr};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i32,
    name: String,
    description: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Connect to Postgres with bounded retry, then ensure the schema exists.
///
/// Deployments often start the service before the database accepts
/// connections; each failed attempt logs a warning and waits a second.
pub async fn init_database_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let mut attempt = 1u32;
    let pool = loop {
        let connect = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await;

        match connect {
            Ok(pool) => break pool,
            Err(err) if attempt < config.retry_count => {
                tracing::warn!(
                    "database connect attempt {attempt}/{} failed: {err}",
                    config.retry_count
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(err) => return Err(err.into()),
        }
    };

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Idempotent schema bootstrap for the items table.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    // ---
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS items (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description VARCHAR(1000) NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub fn create_postgres_repository(pool: PgPool) -> RepositoryPtr {
    // ---
    Arc::new(PostgresRepository::new(pool))
}

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ItemRepository for PostgresRepository {
    // ---
    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        // ---
        let row = sqlx::query_as::<_, ItemRow>(
            "INSERT INTO items (name, description) VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(&new_item.name)
        .bind(&new_item.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        // ---
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn get_item(&self, item_id: i32) -> Result<Option<Item>> {
        // ---
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description FROM items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn delete_item(&self, item_id: i32) -> Result<bool> {
        // ---
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
