//! Catalog domain errors

use thiserror::Error;

/// Errors surfaced by catalog adapters
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Not enough stock to fulfil the requested quantity
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: i64,
        available: i64,
    },

    /// Requested quantity was zero or negative
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Underlying store failure
    #[error("Catalog store error: {0}")]
    Store(String),
}
