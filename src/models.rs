use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One stored inventory record.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST and PUT. Every field is optional at this stage so that a
/// missing field becomes a validation error instead of a deserialization error.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "integral_quantity")]
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Accepts `3` and `3.0` alike; fractional or out-of-range numbers are rejected.
fn integral_quantity<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let whole = match (number.as_i64(), number.as_f64()) {
        (Some(n), _) => Some(n),
        (None, Some(f)) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => Some(f as i64),
        _ => None,
    };
    whole
        .and_then(|n| i32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("quantity must be a whole number, got {}", number)))
}

/// The five business fields after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    pub category: String,
}

impl InventoryItem {
    pub fn new(id: Uuid, fields: ItemFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            quantity: fields.quantity,
            price: fields.price,
            category: fields.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every business field and refreshes `updated_at`; `id` and
    /// `created_at` are left alone.
    pub fn apply(&mut self, fields: ItemFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.quantity = fields.quantity;
        self.price = fields.price;
        self.category = fields.category;
        self.updated_at = now;
    }
}

#[derive(Serialize, Debug)]
pub struct DeletedItem {
    pub message: &'static str,
    pub item: InventoryItem,
}

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
    pub database: String,
}
