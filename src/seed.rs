//! One-time bootstrap of the PostgreSQL database: application role, table,
//! indexes and sample records.

use chrono::Utc;
use log::info;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InventoryError;
use crate::models::ItemFields;

pub const SCHEMA_SQL: &str = include_str!("../db/init.sql");

pub fn sample_items() -> Vec<ItemFields> {
    let sample = |name: &str, description: &str, quantity: i32, price: f64, category: &str| ItemFields {
        name: name.to_string(),
        description: description.to_string(),
        quantity,
        price,
        category: category.to_string(),
    };

    vec![
        sample(
            "Laptop Computer",
            "High-performance laptop for development work",
            15,
            999.99,
            "Electronics",
        ),
        sample(
            "Office Chair",
            "Ergonomic office chair with lumbar support",
            8,
            299.99,
            "Furniture",
        ),
        sample(
            "Wireless Mouse",
            "Bluetooth wireless mouse with precision tracking",
            25,
            49.99,
            "Electronics",
        ),
        sample(
            "Programming Book",
            "Complete guide to modern JavaScript development",
            12,
            39.99,
            "Books",
        ),
    ]
}

/// Applies the schema script and inserts the samples when the table is empty.
/// Returns how many samples were inserted.
pub async fn run(pool: &PgPool) -> Result<usize, InventoryError> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    info!("Esquema de inventario aplicado");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inventory_items")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        info!("La tabla ya contiene {} items, no se insertan datos de ejemplo", count);
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let samples = sample_items();
    for fields in &samples {
        sqlx::query(
            "INSERT INTO inventory_items \
             (id, name, description, quantity, price, category, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)",
        )
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.quantity)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Insertados {} items de ejemplo", samples.len());
    Ok(samples.len())
}
