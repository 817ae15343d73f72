use crate::error::InventoryError;
use crate::models::{ItemFields, ItemPayload};

pub const MISSING_FIELDS: &str = "All fields are required";
pub const NEGATIVE_VALUES: &str = "Quantity and price must be non-negative";

/// Checks a POST/PUT body before it reaches the store.
pub fn validate(payload: ItemPayload) -> Result<ItemFields, InventoryError> {
    let ItemPayload {
        name,
        description,
        quantity,
        price,
        category,
    } = payload;

    let (Some(name), Some(description), Some(quantity), Some(price), Some(category)) =
        (non_empty(name), non_empty(description), quantity, price, non_empty(category))
    else {
        return Err(InventoryError::Validation(MISSING_FIELDS.to_string()));
    };

    if quantity < 0 || !(price.is_finite() && price >= 0.0) {
        return Err(InventoryError::Validation(NEGATIVE_VALUES.to_string()));
    }

    Ok(ItemFields {
        name,
        description,
        quantity,
        price,
        category,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
