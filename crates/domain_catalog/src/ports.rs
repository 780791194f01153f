//! Catalog port consumed by the credit core

use async_trait::async_trait;
use core_kernel::{DomainPort, ItemId};

use crate::error::CatalogError;
use crate::item::CatalogItem;

/// Contract the invoicing path holds against the catalog system
///
/// `decrement_stock` must be atomic per item: the availability check and
/// the decrement happen as one step, so two concurrent sales can never
/// jointly oversell a unit. `increment_stock` exists for returns and for
/// rolling back a failed invoice creation.
#[async_trait]
pub trait CatalogPort: DomainPort {
    /// Fetches the current snapshot of an item
    async fn get_item(&self, id: ItemId) -> Result<CatalogItem, CatalogError>;

    /// Atomically checks and decrements stock for a sale
    async fn decrement_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError>;

    /// Restores stock after a return or rollback
    async fn increment_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError>;
}
