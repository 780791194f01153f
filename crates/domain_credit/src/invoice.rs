//! Invoice aggregate
//!
//! An invoice is created once by the invoicing service and mutated only
//! through payment application, the overdue sweep, and cancellation.
//! Payments are an append-only log; installment corrections happen by
//! recomputing status from `paid_amount` vs `amount` and `due_date` vs
//! the sweep date, never by deleting anything.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{CustomerId, InvoiceId, ItemId, Money, PaymentId};
use serde::{Deserialize, Serialize};

use crate::error::CreditError;

/// Credit terms agreed at the point of sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Paid in full at the counter
    Cash,
    /// Split into a due-dated schedule
    Installment,
    /// Single deferred due date
    Deferred,
}

/// How a settlement was tendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash
    Cash,
    /// Bank transfer
    BankTransfer,
    /// Card
    Card,
    /// Digital wallet
    DigitalWallet,
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created, nothing beyond a down payment received
    Pending,
    /// Partial payment received
    PartiallyPaid,
    /// Fully settled (terminal)
    Paid,
    /// Past due date with an open balance
    Overdue,
    /// Voided before any payment (terminal)
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true for states that accept no further mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

/// Installment status, derived from paid amount and due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Overdue,
}

/// One scheduled partial payment of an invoice's total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Position in the schedule, starting at 1
    pub number: u32,
    /// Calendar due date
    pub due_date: NaiveDate,
    /// Amount owed by this installment
    pub amount: Money,
    /// Amount allocated to this installment so far
    pub paid_amount: Money,
    /// Derived status
    pub status: InstallmentStatus,
}

impl Installment {
    /// Amount still owed by this installment
    pub fn remaining(&self) -> Money {
        self.amount - self.paid_amount
    }

    /// Recomputes status from paid amount and due date
    pub fn recompute_status(&mut self, today: NaiveDate) {
        self.status = if self.paid_amount >= self.amount {
            InstallmentStatus::Paid
        } else if self.due_date < today {
            InstallmentStatus::Overdue
        } else if self.paid_amount.is_positive() {
            InstallmentStatus::PartiallyPaid
        } else {
            InstallmentStatus::Pending
        };
    }
}

/// A line item, frozen from the catalog at sale time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Catalog item sold
    pub item_id: ItemId,
    /// SKU at time of sale
    pub sku: String,
    /// Display name at time of sale
    pub name: String,
    /// Unit price at time of sale
    pub unit_price: Money,
    /// Units sold
    pub quantity: i64,
    /// unit_price × quantity
    pub line_total: Money,
}

impl InvoiceLine {
    /// Creates a line, computing its total
    pub fn new(
        item_id: ItemId,
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            item_id,
            sku: sku.into(),
            name: name.into(),
            unit_price,
            quantity,
            line_total: unit_price * quantity,
        }
    }
}

/// A settlement recorded against an invoice, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Amount settled
    pub amount: Money,
    /// Tender method
    pub method: PaymentMethod,
    /// When the payment was received
    pub paid_at: DateTime<Utc>,
}

/// An invoice with its schedule and payment history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Customer who owes the balance
    pub customer_id: CustomerId,
    /// Line items, frozen at sale time
    pub lines: Vec<InvoiceLine>,
    /// Sum of line totals
    pub total_amount: Money,
    /// Up-front payment recorded at creation, zero otherwise
    pub down_payment: Money,
    /// Total settled so far, down payment included
    pub paid_amount: Money,
    /// total_amount − paid_amount
    pub remaining_amount: Money,
    /// Lifecycle status
    pub status: InvoiceStatus,
    /// Credit terms
    pub terms: PaymentTerms,
    /// Due date for deferred terms
    pub due_date: Option<NaiveDate>,
    /// Schedule, present iff terms = installment
    pub installments: Vec<Installment>,
    /// Append-only settlement log
    pub payments: Vec<Payment>,
    /// Optimistic-concurrency version, bumped by the store on every write
    pub version: u64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a pending invoice from frozen lines
    pub fn new(customer_id: CustomerId, lines: Vec<InvoiceLine>, terms: PaymentTerms) -> Self {
        let now = Utc::now();
        let total: Money = lines.iter().map(|l| l.line_total).sum();
        Self {
            id: InvoiceId::new_v7(),
            customer_id,
            lines,
            total_amount: total,
            down_payment: Money::zero(),
            paid_amount: Money::zero(),
            remaining_amount: total,
            status: InvoiceStatus::Pending,
            terms,
            due_date: None,
            installments: Vec::new(),
            payments: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches the installment schedule
    pub fn with_installments(mut self, installments: Vec<Installment>) -> Self {
        self.installments = installments;
        self
    }

    /// Sets the deferred due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Records the down payment taken at the counter
    ///
    /// Must be the first and only payment at creation time; the schedule
    /// is built over the remainder, so it stays untouched here. The
    /// invoice remains `pending`: its lifecycle is driven by payments
    /// against the schedule, not by the deposit.
    pub fn record_down_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        at: DateTime<Utc>,
    ) -> Result<(), CreditError> {
        if !self.payments.is_empty() {
            return Err(CreditError::validation(
                "down payment must precede all other payments",
            ));
        }
        if !amount.is_positive() {
            return Err(CreditError::InvalidAmount { amount });
        }
        if amount >= self.total_amount {
            return Err(CreditError::validation(
                "down payment must be strictly less than the invoice total",
            ));
        }

        self.down_payment = amount;
        self.paid_amount += amount;
        self.remaining_amount -= amount;
        self.payments.push(Payment {
            id: PaymentId::new_v7(),
            amount,
            method,
            paid_at: at,
        });
        self.updated_at = at;
        self.debug_check();
        Ok(())
    }

    /// Applies a payment against the outstanding schedule
    ///
    /// Allocation is strictly oldest-installment-first: each open
    /// installment is topped up to its owed amount before the next one
    /// receives anything. Afterwards the invoice status is recomputed:
    /// `paid` when nothing remains, else `partially_paid` once anything
    /// has been paid; overdue flags are owned by the due-date sweep.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` when `amount <= 0`
    /// - `Overpayment` when `amount` exceeds the remaining balance
    /// - `Validation` when the invoice is cancelled
    pub fn apply_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        at: DateTime<Utc>,
    ) -> Result<PaymentId, CreditError> {
        if !amount.is_positive() {
            return Err(CreditError::InvalidAmount { amount });
        }
        if self.status == InvoiceStatus::Cancelled {
            return Err(CreditError::validation("invoice is cancelled"));
        }
        if amount > self.remaining_amount {
            return Err(CreditError::Overpayment {
                amount,
                remaining: self.remaining_amount,
            });
        }

        let mut left = amount;
        for installment in self.installments.iter_mut() {
            if left.is_zero() {
                break;
            }
            let owed = installment.remaining();
            if !owed.is_positive() {
                continue;
            }
            let take = owed.min(left);
            installment.paid_amount += take;
            left -= take;
            installment.status = if installment.remaining().is_zero() {
                InstallmentStatus::Paid
            } else {
                InstallmentStatus::PartiallyPaid
            };
        }
        if left.is_positive() && !self.installments.is_empty() {
            // Unreachable given the overpayment check; surfaced, never clamped
            return Err(CreditError::inconsistency(format!(
                "payment residue of {} after filling every installment",
                left
            )));
        }

        self.paid_amount += amount;
        self.remaining_amount -= amount;
        let payment_id = PaymentId::new_v7();
        self.payments.push(Payment {
            id: payment_id,
            amount,
            method,
            paid_at: at,
        });

        self.status = if self.remaining_amount.is_zero() {
            InvoiceStatus::Paid
        } else if self.paid_amount.is_positive() {
            InvoiceStatus::PartiallyPaid
        } else {
            self.status
        };
        self.updated_at = at;
        self.debug_check();
        Ok(payment_id)
    }

    /// Recomputes overdue state as of `today`
    ///
    /// Returns true when the invoice newly became overdue. Terminal
    /// invoices and already-overdue invoices are left alone.
    pub fn refresh_overdue(&mut self, today: NaiveDate) -> bool {
        if !matches!(
            self.status,
            InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid
        ) {
            return false;
        }

        for installment in self.installments.iter_mut() {
            installment.recompute_status(today);
        }

        let past_due = self
            .installments
            .iter()
            .any(|i| i.status == InstallmentStatus::Overdue)
            || self.due_date.map_or(false, |d| d < today);

        if past_due {
            self.status = InvoiceStatus::Overdue;
            true
        } else {
            false
        }
    }

    /// Returns true if the invoice may still be cancelled
    pub fn can_cancel(&self) -> bool {
        self.payments.is_empty() && !self.status.is_terminal()
    }

    /// Cancels the invoice, returning the charge to remove from the ledger
    ///
    /// Only an invoice with no recorded payments can be cancelled;
    /// anything else needs a refund flow this core does not own.
    pub fn cancel(&mut self) -> Result<Money, CreditError> {
        if !self.can_cancel() {
            return Err(CreditError::validation(
                "only an unpaid, non-terminal invoice can be cancelled",
            ));
        }
        let released = self.remaining_amount;
        self.status = InvoiceStatus::Cancelled;
        self.remaining_amount = Money::zero();
        self.updated_at = Utc::now();
        Ok(released)
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.remaining_amount,
            self.total_amount - self.paid_amount,
            "remaining must equal total minus paid"
        );
        if !self.installments.is_empty() {
            let scheduled: Money = self.installments.iter().map(|i| i.amount).sum();
            debug_assert_eq!(
                scheduled,
                self.total_amount - self.down_payment,
                "schedule must cover the total net of the down payment"
            );
            let allocated: Money = self.installments.iter().map(|i| i.paid_amount).sum();
            debug_assert_eq!(
                allocated,
                self.paid_amount - self.down_payment,
                "installment allocations must match payments net of the down payment"
            );
        }
    }
}
