use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

pub const NOT_FOUND_MESSAGE: &str = "Item not found";

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Bad or missing input from the client.
    #[error("{0}")]
    Validation(String),
    #[error("Item not found")]
    NotFound,
    /// Anything the storage backend could not do.
    #[error("{0}")]
    Storage(String),
}

impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => InventoryError::NotFound,
            other => InventoryError::Storage(other.to_string()),
        }
    }
}

impl ResponseError for InventoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            InventoryError::NotFound => StatusCode::NOT_FOUND,
            InventoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
