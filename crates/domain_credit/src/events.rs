//! Domain events for the credit core
//!
//! Core operations never talk to messaging systems directly; they build
//! these events and hand them to the injected dispatcher port. Delivery
//! is fire-and-forget: a failed dispatch is logged by the adapter and
//! never fails the ledger operation that produced it.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, InvoiceId, Money, PaymentId};
use serde::{Deserialize, Serialize};

/// Events emitted by the credit core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CreditEvent {
    /// An invoice was created and credit reserved
    InvoiceCreated {
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        total_amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// A payment was applied against an invoice
    PaymentReceived {
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        payment_id: PaymentId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// An invoice reached zero remaining balance
    InvoiceSettled {
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// An unpaid invoice was cancelled and its charge removed
    InvoiceCancelled {
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        released_amount: Money,
        timestamp: DateTime<Utc>,
    },

    /// The due-date sweep flipped an invoice to overdue
    InvoiceOverdue {
        invoice_id: InvoiceId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// A sales block was placed on a customer
    SalesBlockSet {
        customer_id: CustomerId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A sales block was lifted from a customer
    SalesBlockLifted {
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },
}

impl CreditEvent {
    /// Short machine-readable event name, used by dispatchers for routing
    pub fn name(&self) -> &'static str {
        match self {
            CreditEvent::InvoiceCreated { .. } => "invoice_created",
            CreditEvent::PaymentReceived { .. } => "payment_received",
            CreditEvent::InvoiceSettled { .. } => "invoice_settled",
            CreditEvent::InvoiceCancelled { .. } => "invoice_cancelled",
            CreditEvent::InvoiceOverdue { .. } => "invoice_overdue",
            CreditEvent::SalesBlockSet { .. } => "sales_block_set",
            CreditEvent::SalesBlockLifted { .. } => "sales_block_lifted",
        }
    }
}
