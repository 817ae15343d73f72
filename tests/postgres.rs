//! Runs against a live database: `DATABASE_URL=... cargo test -- --ignored`.
//! The connecting role must be allowed to run the bootstrap script.

use std::env;

use inventory_tracker::error::InventoryError;
use inventory_tracker::models::ItemFields;
use inventory_tracker::seed;
use inventory_tracker::store::{ItemStore, PgItemStore};
use sqlx::PgPool;
use uuid::Uuid;

async fn store() -> PgItemStore {
    let url = env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    seed::run(&pool).await.expect("bootstrap");
    PgItemStore::from_pool(pool)
}

fn fields(name: &str) -> ItemFields {
    ItemFields {
        name: name.to_string(),
        description: "integration test item".to_string(),
        quantity: 3,
        price: 999.99,
        category: "Test".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn crud_round_trip() {
    let store = store().await;

    let created = store.create(fields("pg-roundtrip")).await.unwrap();
    assert_eq!(store.get(created.id).await.unwrap(), created);
    assert_eq!(created.price, 999.99);

    let updated = store
        .update(created.id, ItemFields { quantity: 20, ..fields("pg-roundtrip") })
        .await
        .unwrap();
    assert_eq!(updated.quantity, 20);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let removed = store.delete(created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert!(matches!(store.get(created.id).await, Err(InventoryError::NotFound)));
}

#[tokio::test]
#[ignore]
async fn missing_ids_are_not_found() {
    let store = store().await;
    let ghost = Uuid::new_v4();
    assert!(matches!(
        store.update(ghost, fields("ghost")).await,
        Err(InventoryError::NotFound)
    ));
    assert!(matches!(store.delete(ghost).await, Err(InventoryError::NotFound)));
}

#[tokio::test]
#[ignore]
async fn list_is_newest_first() {
    let store = store().await;
    let a = store.create(fields("pg-order-a")).await.unwrap();
    let b = store.create(fields("pg-order-b")).await.unwrap();

    let items = store.list().await.unwrap();
    assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    store.delete(a.id).await.unwrap();
    store.delete(b.id).await.unwrap();
}
