//! Core kernel for the Fiado credit platform
//!
//! This crate provides the shared vocabulary used by every domain crate:
//! precise money arithmetic, strongly-typed identifiers, temporal types,
//! and the port abstractions for the hexagonal seams.
//!
//! Nothing in here performs I/O.

pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use identifiers::{CustomerId, InvoiceId, ItemId, PaymentId};
pub use money::{Money, MoneyError};
pub use ports::{DomainPort, PortError};
pub use temporal::{DateRange, TemporalError, Timezone};
