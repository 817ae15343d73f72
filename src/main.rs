use std::sync::Arc;

use actix_web::{App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use inventory_tracker::app_config;
use inventory_tracker::config::{Config, StorageMode, RECONNECT_INTERVAL};
use inventory_tracker::store::{InMemoryStore, ItemStore, PgItemStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Iniciando el servidor...");

    let config = Config::from_env().map_err(|e| {
        error!("Configuración inválida: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let (store, pg): (Arc<dyn ItemStore>, Option<Arc<PgItemStore>>) = match config.storage {
        StorageMode::Memory => {
            let store = InMemoryStore::with_samples();
            info!(
                "Usando almacenamiento en memoria ({} items de ejemplo); los datos se pierden al reiniciar",
                store.list().await.map(|items| items.len()).unwrap_or(0)
            );
            let store: Arc<dyn ItemStore> = Arc::new(store);
            (store, None)
        }
        StorageMode::Postgres => {
            let store = PgItemStore::connect_lazy(&config.database_url).map_err(|e| {
                error!("URL de base de datos inválida: {}", e);
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
            })?;
            store.spawn_reconnect(RECONNECT_INTERVAL);
            let pg = Arc::new(store);
            let store: Arc<dyn ItemStore> = pg.clone();
            (store, Some(pg))
        }
    };

    let config_fn = app_config(store);

    info!("Servidor escuchando en http://{}:{}", config.host, config.port);
    info!("Almacenamiento: {}", config.storage);

    HttpServer::new(move || App::new().configure(config_fn.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
        info!("Conexión con PostgreSQL cerrada");
    }
    info!("Servidor detenido");
    Ok(())
}
