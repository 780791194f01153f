//! Random test data generators

use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

static SKU_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1000));

/// Generates a customer display name
pub fn customer_name() -> String {
    Name().fake()
}

/// Generates a contact phone number
pub fn phone_number() -> String {
    PhoneNumber().fake()
}

/// Generates a unique SKU for the current process
pub fn sku() -> String {
    let n = SKU_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("SKU-{n}")
}

/// Generates a product display name
pub fn product_name() -> String {
    let n = SKU_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("Test product {n}")
}
