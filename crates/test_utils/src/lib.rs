//! Shared test utilities
//!
//! Builders, fixtures, generators, and assertion helpers used across the
//! workspace test suites. Nothing here ships in production builds; the
//! crate exists so the suites construct data the same way everywhere.

pub mod assertions;
pub mod builders;
pub mod dispatch;
pub mod fixtures;
pub mod generators;

pub use assertions::assert_ledger_conserved;
pub use builders::{CatalogItemBuilder, CustomerBuilder};
pub use dispatch::CollectingDispatcher;
