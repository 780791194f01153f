//! In-memory catalog adapter

use async_trait::async_trait;
use dashmap::DashMap;

use core_kernel::{DomainPort, ItemId};
use domain_catalog::{CatalogError, CatalogItem, CatalogPort};

/// Catalog with atomic per-item stock adjustment
///
/// The availability check and the decrement happen while holding the
/// item's map entry, so concurrent sales of the same item can never
/// jointly oversell it.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: DashMap<ItemId, CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item; catalog management proper lives outside this core
    pub fn insert_item(&self, item: CatalogItem) {
        self.items.insert(item.id, item);
    }
}

impl DomainPort for InMemoryCatalog {}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn get_item(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        self.items
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }

    async fn decrement_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError> {
        if quantity <= 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }
        let mut item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))?;
        if item.available_quantity < quantity {
            return Err(CatalogError::InsufficientStock {
                item: item.name.clone(),
                requested: quantity,
                available: item.available_quantity,
            });
        }
        item.available_quantity -= quantity;
        Ok(())
    }

    async fn increment_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError> {
        if quantity <= 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }
        let mut item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))?;
        item.available_quantity += quantity;
        Ok(())
    }
}
