use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{error, info};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::ItemStore;
use crate::error::InventoryError;
use crate::models::{InventoryItem, ItemFields};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct PgItemStore {
    pool: PgPool,
    connected: Arc<AtomicBool>,
}

impl PgItemStore {
    /// Builds the pool without touching the network. Only a malformed URL fails here;
    /// an unreachable server is handled by `spawn_reconnect`.
    pub fn connect_lazy(database_url: &str) -> Result<Self, InventoryError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Probes the database until a connection succeeds, waiting `interval` between
    /// attempts. There is no attempt limit.
    pub fn spawn_reconnect(&self, interval: Duration) -> JoinHandle<()> {
        let pool = self.pool.clone();
        let connected = Arc::clone(&self.connected);
        tokio::spawn(async move {
            loop {
                match sqlx::query("SELECT 1").execute(&pool).await {
                    Ok(_) => {
                        connected.store(true, Ordering::Relaxed);
                        info!("Conectado a PostgreSQL correctamente");
                        break;
                    }
                    Err(e) => {
                        error!("Error de conexión con PostgreSQL: {}", e);
                        info!("Reintentando la conexión en {} segundos...", interval.as_secs());
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT * FROM inventory_items ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<InventoryItem, InventoryError> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound)
    }

    async fn create(&self, fields: ItemFields) -> Result<InventoryItem, InventoryError> {
        let now = Utc::now();
        let item = sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory_items \
             (id, name, description, quantity, price, category, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn update(&self, id: Uuid, fields: ItemFields) -> Result<InventoryItem, InventoryError> {
        sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory_items \
             SET name = $1, description = $2, quantity = $3, price = $4, category = $5, updated_at = $6 \
             WHERE id = $7 RETURNING *",
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<InventoryItem, InventoryError> {
        sqlx::query_as::<_, InventoryItem>("DELETE FROM inventory_items WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound)
    }

    fn describe(&self) -> String {
        if self.is_connected() {
            "PostgreSQL (connected)".to_string()
        } else {
            "PostgreSQL (connecting)".to_string()
        }
    }
}
