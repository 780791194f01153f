//! Catalog item snapshot

use chrono::{DateTime, Utc};
use core_kernel::{ItemId, Money};
use serde::{Deserialize, Serialize};

/// A sellable item as seen by the credit core
///
/// This is the snapshot the invoicing path reads: current unit price and
/// available stock. The catalog system owns everything else about the
/// product (descriptions, barcodes, suppliers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier
    pub id: ItemId,
    /// Stock keeping unit (human-readable business key)
    pub sku: String,
    /// Display name, frozen onto invoice lines at sale time
    pub name: String,
    /// Current unit price
    pub unit_price: Money,
    /// Units available for sale
    pub available_quantity: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Creates a new catalog item
    pub fn new(sku: impl Into<String>, name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        Self {
            id: ItemId::new_v7(),
            sku: sku.into(),
            name: name.into(),
            unit_price,
            available_quantity: quantity,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the requested quantity can be sold from stock
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        quantity > 0 && self.available_quantity >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_fulfil() {
        let item = CatalogItem::new("SKU-1", "Blender", Money::from_minor(45000), 3);
        assert!(item.can_fulfil(3));
        assert!(!item.can_fulfil(4));
        assert!(!item.can_fulfil(0));
        assert!(!item.can_fulfil(-1));
    }
}
