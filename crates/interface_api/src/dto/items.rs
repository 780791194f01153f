//! Catalog item DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_catalog::CatalogItem;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "sku must not be empty"))]
    pub sku: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub unit_price: Decimal,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub available_quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CatalogItem> for ItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            sku: item.sku,
            name: item.name,
            unit_price: item.unit_price.to_decimal(),
            available_quantity: item.available_quantity,
            created_at: item.created_at,
        }
    }
}
