//! Versioned in-memory store for customers and invoices

use async_trait::async_trait;
use dashmap::DashMap;

use core_kernel::{CustomerId, DomainPort, InvoiceId, PortError};
use domain_credit::invoice::{Invoice, InvoiceStatus};
use domain_credit::ledger::Customer;
use domain_credit::ports::{CustomerStore, InvoiceStore};

/// Concurrent in-memory store
///
/// Writes follow compare-and-set semantics on the aggregate's `version`
/// field: an update whose version no longer matches the stored one is
/// rejected with a conflict and leaves the store untouched. Accepted
/// writes store the aggregate with the version bumped by one.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: DashMap<CustomerId, Customer>,
    invoices: DashMap<InvoiceId, Invoice>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryStore {}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn get(&self, id: CustomerId) -> Result<Customer, PortError> {
        self.customers
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| PortError::not_found("Customer", id))
    }

    async fn insert(&self, customer: Customer) -> Result<(), PortError> {
        let id = customer.id;
        match self.customers.entry(id) {
            dashmap::Entry::Occupied(_) => Err(PortError::already_exists("Customer", id)),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(customer);
                Ok(())
            }
        }
    }

    async fn update(&self, mut customer: Customer) -> Result<(), PortError> {
        let id = customer.id;
        let mut stored = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Customer", id))?;
        if stored.version != customer.version {
            return Err(PortError::conflict(format!(
                "customer {} was modified concurrently (read v{}, stored v{})",
                id, customer.version, stored.version
            )));
        }
        customer.version += 1;
        *stored = customer;
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        self.invoices
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn insert(&self, invoice: Invoice) -> Result<(), PortError> {
        let id = invoice.id;
        match self.invoices.entry(id) {
            dashmap::Entry::Occupied(_) => Err(PortError::already_exists("Invoice", id)),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(invoice);
                Ok(())
            }
        }
    }

    async fn update(&self, mut invoice: Invoice) -> Result<(), PortError> {
        let id = invoice.id;
        let mut stored = self
            .invoices
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Invoice", id))?;
        if stored.version != invoice.version {
            return Err(PortError::conflict(format!(
                "invoice {} was modified concurrently (read v{}, stored v{})",
                id, invoice.version, stored.version
            )));
        }
        invoice.version += 1;
        *stored = invoice;
        Ok(())
    }

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Invoice>, PortError> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|entry| entry.customer_id == customer_id)
            .map(|entry| entry.clone())
            .collect();
        // Creation order; time-ordered v7 ids break same-instant ties
        invoices.sort_by_key(|i| (i.created_at, *i.id.as_uuid()));
        Ok(invoices)
    }

    async fn list_open(&self) -> Result<Vec<Invoice>, PortError> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|entry| {
                matches!(
                    entry.status,
                    InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid
                )
            })
            .map(|entry| entry.clone())
            .collect();
        invoices.sort_by_key(|i| (i.created_at, *i.id.as_uuid()));
        Ok(invoices)
    }
}
