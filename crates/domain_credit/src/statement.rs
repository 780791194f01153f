//! Customer statement generation
//!
//! A statement is a pure replay of the invoice/payment history into a
//! chronological list of debit and credit entries with a running
//! balance. It takes no locks and mutates nothing: whatever snapshot of
//! invoices it is handed, the same input always produces the same
//! output.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, InvoiceId, Money, PaymentId};
use serde::{Deserialize, Serialize};

use crate::invoice::{Invoice, InvoiceStatus};

/// Whether an entry increases or decreases the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A purchase: invoice total at creation time
    Debit,
    /// A payment received
    Credit,
}

/// One line of the statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Debit or credit
    pub kind: EntryKind,
    /// Event timestamp
    pub date: DateTime<Utc>,
    /// Event amount, always non-negative
    pub amount: Money,
    /// Running balance after this entry
    pub balance: Money,
    /// Invoice the entry belongs to
    pub invoice_id: InvoiceId,
    /// Payment identifier for credit entries
    pub payment_id: Option<PaymentId>,
}

/// Totals over the statement period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Sum of debit entries
    pub total_purchases: Money,
    /// Sum of credit entries
    pub total_payments: Money,
    /// Final running balance (opening balance when the period is empty)
    pub current_balance: Money,
}

/// A rendered statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Customer the statement belongs to
    pub customer_id: CustomerId,
    /// Balance carried into the period
    pub opening_balance: Money,
    /// Chronological entries with running balances
    pub entries: Vec<StatementEntry>,
    /// Period totals
    pub summary: StatementSummary,
}

/// Generates a statement from a snapshot of the customer's invoices
///
/// One debit entry per non-cancelled invoice (dated at creation) and one
/// credit entry per recorded payment, filtered to the inclusive period
/// bounds when given. Entries sort by `(date, kind)`: a debit precedes
/// a credit on an equal timestamp, so an invoice's creation sorts
/// before any payment against it even when clocks collide, and
/// insertion order is the final tiebreak for determinism.
pub fn generate(
    customer_id: CustomerId,
    invoices: &[Invoice],
    period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    opening_balance: Money,
) -> Statement {
    let mut raw: Vec<(DateTime<Utc>, EntryKind, usize, Money, InvoiceId, Option<PaymentId>)> =
        Vec::new();
    let mut seq = 0usize;

    for invoice in invoices {
        if invoice.status == InvoiceStatus::Cancelled {
            continue;
        }
        raw.push((
            invoice.created_at,
            EntryKind::Debit,
            seq,
            invoice.total_amount,
            invoice.id,
            None,
        ));
        seq += 1;
        for payment in &invoice.payments {
            raw.push((
                payment.paid_at,
                EntryKind::Credit,
                seq,
                payment.amount,
                invoice.id,
                Some(payment.id),
            ));
            seq += 1;
        }
    }

    if let Some((start, end)) = period {
        raw.retain(|(date, ..)| *date >= start && *date <= end);
    }

    raw.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));

    let mut balance = opening_balance;
    let mut total_purchases = Money::zero();
    let mut total_payments = Money::zero();
    let mut entries = Vec::with_capacity(raw.len());

    for (date, kind, _, amount, invoice_id, payment_id) in raw {
        match kind {
            EntryKind::Debit => {
                balance += amount;
                total_purchases += amount;
            }
            EntryKind::Credit => {
                balance -= amount;
                total_payments += amount;
            }
        }
        entries.push(StatementEntry {
            kind,
            date,
            amount,
            balance,
            invoice_id,
            payment_id,
        });
    }

    Statement {
        customer_id,
        opening_balance,
        summary: StatementSummary {
            total_purchases,
            total_payments,
            current_balance: balance,
        },
        entries,
    }
}
