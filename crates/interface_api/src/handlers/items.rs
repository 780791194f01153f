//! Catalog item handlers
//!
//! Catalog management proper is an external concern; these two routes
//! exist so deployments without the full catalog service can seed and
//! inspect items.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use core_kernel::{ItemId, Money};
use domain_catalog::{CatalogItem, CatalogPort};

use crate::dto::items::{CreateItemRequest, ItemResponse};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Registers a catalog item
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    request.validate()?;
    let unit_price = Money::from_decimal_positive(request.unit_price)?;

    let item = CatalogItem::new(request.sku, request.name, unit_price, request.quantity);
    state.catalog.insert_item(item.clone());

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Gets an item snapshot
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_id: ItemId = parse_id(&id, "item")?;
    let item = state
        .catalog
        .get_item(item_id)
        .await
        .map_err(|err| ApiError::NotFound(err.to_string()))?;
    Ok(Json(item.into()))
}
