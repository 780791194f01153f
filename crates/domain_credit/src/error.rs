//! Credit domain errors
//!
//! Every failure mode of the core is a typed variant carrying enough
//! detail for the caller to act. None of these are retried internally
//! except the single retry behind `ConcurrencyConflict`.

use core_kernel::Money;
use thiserror::Error;

/// Errors that can occur in the credit domain
#[derive(Debug, Error)]
pub enum CreditError {
    /// Missing or malformed input; never mutates state
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Payment amount was zero or negative
    #[error("Invalid payment amount: {amount}")]
    InvalidAmount { amount: Money },

    /// A line requested more units than the catalog can fulfil
    #[error("Insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: i64,
        available: i64,
    },

    /// The sale would push the customer past their credit limit
    #[error("Credit limit exceeded: requested {requested}, available {available}")]
    CreditExceeded { requested: Money, available: Money },

    /// The payment exceeds the invoice's remaining balance
    #[error("Payment of {amount} exceeds remaining balance {remaining}")]
    Overpayment { amount: Money, remaining: Money },

    /// The customer carries an active sales block
    #[error("Sales blocked: {reason}")]
    SalesBlocked { reason: String },

    /// The single baked-in retry against fresh state failed; resubmit
    #[error("Concurrent modification detected, resubmit the operation")]
    ConcurrencyConflict,

    /// An internal invariant was violated; fatal, never silently corrected
    #[error("Ledger inconsistency: {0}")]
    LedgerInconsistency(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence-layer failure with no partial commit
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CreditError {
    pub fn validation(message: impl Into<String>) -> Self {
        CreditError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CreditError::NotFound(message.into())
    }

    pub fn inconsistency(message: impl Into<String>) -> Self {
        CreditError::LedgerInconsistency(message.into())
    }
}

impl From<core_kernel::PortError> for CreditError {
    fn from(err: core_kernel::PortError) -> Self {
        match err {
            core_kernel::PortError::NotFound { entity_type, id } => {
                CreditError::NotFound(format!("{} {}", entity_type, id))
            }
            core_kernel::PortError::Conflict { .. } => CreditError::ConcurrencyConflict,
            other => CreditError::Storage(other.to_string()),
        }
    }
}

impl From<domain_catalog::CatalogError> for CreditError {
    fn from(err: domain_catalog::CatalogError) -> Self {
        match err {
            domain_catalog::CatalogError::ItemNotFound(id) => {
                CreditError::NotFound(format!("item {}", id))
            }
            domain_catalog::CatalogError::InsufficientStock {
                item,
                requested,
                available,
            } => CreditError::InsufficientStock {
                item,
                requested,
                available,
            },
            domain_catalog::CatalogError::InvalidQuantity(q) => {
                CreditError::Validation(format!("invalid quantity: {}", q))
            }
            domain_catalog::CatalogError::Store(message) => CreditError::Storage(message),
        }
    }
}
