use actix_web::error::InternalError;
use actix_web::http::header::ContentType;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::{SecondsFormat, Utc};
use log::{error, info};
use serde_json::json;
use uuid::Uuid;

use crate::error::InventoryError;
use crate::models::{DeletedItem, Health, ItemPayload};
use crate::store::ItemStore;
use crate::validation::validate;

const INDEX_HTML: &str = include_str!("../public/index.html");
const STYLE_CSS: &str = include_str!("../public/style.css");
const SCRIPT_JS: &str = include_str!("../public/script.js");

type Store = web::Data<dyn ItemStore>;

/// Registers every route on `cfg`. The store must already be in `app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health)
        .service(get_items)
        .service(get_item_by_id)
        .service(create_item)
        .service(update_item_by_id)
        .service(delete_item_by_id)
        .service(index)
        .service(stylesheet)
        .service(script);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        info!("Cuerpo JSON rechazado: {}", err);
        let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        InternalError::from_response(err, response).into()
    })
}

/// A string that is not a UUID cannot name a stored item.
fn parse_id(raw: &str) -> Result<Uuid, InventoryError> {
    Uuid::parse_str(raw).map_err(|_| InventoryError::NotFound)
}

fn log_failure(context: &str, err: &InventoryError) {
    match err {
        InventoryError::Storage(msg) => error!("Error {}: {}", context, msg),
        other => info!("Fallo {}: {}", context, other),
    }
}

#[get("/health")]
async fn health(db: Store) -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: db.describe(),
    })
}

#[get("/api/inventory")]
async fn get_items(db: Store) -> Result<HttpResponse, InventoryError> {
    info!("Recibida petición GET /api/inventory");
    let items = db
        .list()
        .await
        .inspect_err(|e| log_failure("obteniendo items", e))?;
    Ok(HttpResponse::Ok().json(items))
}

#[get("/api/inventory/{id}")]
async fn get_item_by_id(db: Store, id: web::Path<String>) -> Result<HttpResponse, InventoryError> {
    info!("Recibida petición GET /api/inventory/{}", id);
    let item = db
        .get(parse_id(&id)?)
        .await
        .inspect_err(|e| log_failure(&format!("obteniendo item {}", id), e))?;
    Ok(HttpResponse::Ok().json(item))
}

#[post("/api/inventory")]
async fn create_item(
    db: Store,
    new_item: web::Json<ItemPayload>,
) -> Result<HttpResponse, InventoryError> {
    info!("Recibida petición POST /api/inventory: {:?}", new_item);
    let fields = validate(new_item.into_inner())?;
    let item = db
        .create(fields)
        .await
        .inspect_err(|e| log_failure("creando item", e))?;
    info!("Item creado: {}", item.id);
    Ok(HttpResponse::Created().json(item))
}

#[put("/api/inventory/{id}")]
async fn update_item_by_id(
    db: Store,
    id: web::Path<String>,
    updated: web::Json<ItemPayload>,
) -> Result<HttpResponse, InventoryError> {
    info!("Recibida petición PUT /api/inventory/{}: {:?}", id, updated);
    let fields = validate(updated.into_inner())?;
    let item = db
        .update(parse_id(&id)?, fields)
        .await
        .inspect_err(|e| log_failure(&format!("actualizando item {}", id), e))?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/inventory/{id}")]
async fn delete_item_by_id(db: Store, id: web::Path<String>) -> Result<HttpResponse, InventoryError> {
    info!("Recibida petición DELETE /api/inventory/{}", id);
    let item = db
        .delete(parse_id(&id)?)
        .await
        .inspect_err(|e| log_failure(&format!("eliminando item {}", id), e))?;
    info!("Item eliminado: {}", item.id);
    Ok(HttpResponse::Ok().json(DeletedItem {
        message: "Item deleted successfully",
        item,
    }))
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(INDEX_HTML)
}

#[get("/style.css")]
async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok().content_type("text/css; charset=utf-8").body(STYLE_CSS)
}

#[get("/script.js")]
async fn script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SCRIPT_JS)
}
