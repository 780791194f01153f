//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! so tests specify only the fields they care about.

use core_kernel::Money;
use domain_catalog::CatalogItem;
use domain_credit::ledger::Customer;

use crate::fixtures::MoneyFixtures;
use crate::generators;

/// Builder for test customers
pub struct CustomerBuilder {
    name: String,
    phone: Option<String>,
    credit_limit: Money,
    block_reason: Option<String>,
}

impl Default for CustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerBuilder {
    /// Creates a builder with a generated name and the standard limit
    pub fn new() -> Self {
        Self {
            name: generators::customer_name(),
            phone: Some(generators::phone_number()),
            credit_limit: MoneyFixtures::credit_limit(),
            block_reason: None,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit limit
    pub fn with_credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = limit;
        self
    }

    /// Starts the customer blocked with the given reason
    pub fn blocked(mut self, reason: impl Into<String>) -> Self {
        self.block_reason = Some(reason.into());
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        let mut customer = Customer::new(self.name, self.credit_limit);
        customer.phone = self.phone;
        if let Some(reason) = self.block_reason {
            customer.place_block(reason);
        }
        customer
    }
}

/// Builder for test catalog items
pub struct CatalogItemBuilder {
    sku: String,
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl Default for CatalogItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogItemBuilder {
    /// Creates a builder with a generated SKU and the standard price
    pub fn new() -> Self {
        Self {
            sku: generators::sku(),
            name: generators::product_name(),
            unit_price: MoneyFixtures::unit_price(),
            quantity: 10,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit price
    pub fn with_unit_price(mut self, price: Money) -> Self {
        self.unit_price = price;
        self
    }

    /// Sets the available stock
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Builds the item
    pub fn build(self) -> CatalogItem {
        CatalogItem::new(self.sku, self.name, self.unit_price, self.quantity)
    }
}
