//! Ports for the credit domain
//!
//! Defined here, implemented by the infrastructure crates. The stores
//! are versioned: every write carries the version the caller read, and a
//! stale write is rejected with a conflict so the services can retry
//! against fresh state.

use async_trait::async_trait;
use core_kernel::{CustomerId, DomainPort, InvoiceId, PortError};

use crate::events::CreditEvent;
use crate::invoice::Invoice;
use crate::ledger::Customer;

/// Persistent store for customers
#[async_trait]
pub trait CustomerStore: DomainPort {
    /// Fetches a customer by id
    async fn get(&self, id: CustomerId) -> Result<Customer, PortError>;

    /// Inserts a new customer
    async fn insert(&self, customer: Customer) -> Result<(), PortError>;

    /// Writes back a customer read at `customer.version`
    ///
    /// Rejects the write with `PortError::Conflict` when the stored
    /// version no longer matches, leaving the store untouched.
    async fn update(&self, customer: Customer) -> Result<(), PortError>;
}

/// Persistent store for invoices
#[async_trait]
pub trait InvoiceStore: DomainPort {
    /// Fetches an invoice by id
    async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Inserts a new invoice
    async fn insert(&self, invoice: Invoice) -> Result<(), PortError>;

    /// Writes back an invoice read at `invoice.version`, rejecting stale writes
    async fn update(&self, invoice: Invoice) -> Result<(), PortError>;

    /// Snapshot of a customer's invoices in creation order
    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Invoice>, PortError>;

    /// Snapshot of every invoice still open (pending or partially paid)
    async fn list_open(&self) -> Result<Vec<Invoice>, PortError>;
}

/// Fire-and-forget event dispatcher
///
/// Adapters own their delivery failures; emitting must never fail the
/// operation that produced the event.
#[async_trait]
pub trait NotificationPort: DomainPort {
    /// Hands an event to the external dispatcher
    async fn emit(&self, event: CreditEvent);
}
