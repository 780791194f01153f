//! Credit Domain - Installment Ledger and Invoicing
//!
//! This crate is the hard core of the platform: it turns a cart of
//! items into an invoice, splits the amount owed into a due-dated
//! installment schedule, applies partial and out-of-order payments
//! against that schedule, maintains each customer's running financial
//! state, gates further sales behind an explicit block flag, and
//! replays the append-only history into a chronological statement.
//!
//! # Invariants
//!
//! - Installment schedules sum exactly to the amount they cover; all
//!   rounding is absorbed by the final installment.
//! - A customer's outstanding balance equals the sum of remaining
//!   amounts over their non-cancelled invoices at every quiescent point.
//! - Payments are append-only; corrections recompute derived state,
//!   they never rewrite history.
//!
//! # Concurrency
//!
//! All financial mutations for a customer serialize behind a
//! per-customer critical section; versioned stores reject stale writes,
//! retried once and then surfaced as a conflict (see [`services`]).

pub mod error;
pub mod events;
pub mod gate;
pub mod invoice;
pub mod ledger;
pub mod ports;
pub mod schedule;
pub mod services;
pub mod statement;

pub use error::CreditError;
pub use events::CreditEvent;
pub use gate::SalesBlock;
pub use invoice::{
    Installment, InstallmentStatus, Invoice, InvoiceLine, InvoiceStatus, Payment, PaymentMethod,
    PaymentTerms,
};
pub use ledger::{Customer, Financials};
pub use ports::{CustomerStore, InvoiceStore, NotificationPort};
pub use schedule::{build_schedule, Frequency, InstallmentPlan};
pub use services::{
    CreateInvoiceCommand, CustomerLocks, CustomerService, InvoiceService, PaymentService,
    SaleLine, Services, StatementService,
};
pub use statement::{EntryKind, Statement, StatementEntry, StatementSummary};
