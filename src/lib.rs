pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod store;
pub mod validation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web};

use store::ItemStore;

/// Full application: store, CORS, access log and every route. Used by the server
/// binary and by the integration tests.
pub fn app_config(
    store: Arc<dyn ItemStore>,
) -> impl FnOnce(&mut web::ServiceConfig) + Clone + 'static {
    let db_data: web::Data<dyn ItemStore> = web::Data::from(store);

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(db_data.clone()).service(
            web::scope("")
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .wrap(Logger::default())
                .configure(routes::configure),
        );
    }
}
