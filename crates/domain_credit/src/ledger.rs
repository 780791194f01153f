//! Customer credit ledger
//!
//! `Financials` is the single owner of a customer's monetary aggregate.
//! Every mutation validates its invariant before committing: the
//! outstanding balance never exceeds the credit limit on reserve, never
//! goes negative on release, and the lifetime counters only grow.
//!
//! # Invariants
//!
//! - `outstanding_balance >= 0` at all times
//! - `outstanding_balance == Σ invoice.remaining_amount` over the
//!   customer's non-cancelled invoices, at every quiescent point
//! - `total_purchases` and `total_paid` are monotonically non-decreasing

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, Money};
use serde::{Deserialize, Serialize};

use crate::error::CreditError;
use crate::gate::SalesBlock;

/// A customer's financial aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    /// Maximum outstanding balance the customer may carry
    pub credit_limit: Money,
    /// Sum of remaining amounts across non-cancelled invoices
    pub outstanding_balance: Money,
    /// Lifetime purchases counter
    pub total_purchases: Money,
    /// Lifetime payments counter
    pub total_paid: Money,
}

impl Financials {
    /// Creates a fresh aggregate with the given credit limit
    pub fn new(credit_limit: Money) -> Self {
        Self {
            credit_limit,
            outstanding_balance: Money::zero(),
            total_purchases: Money::zero(),
            total_paid: Money::zero(),
        }
    }

    /// Credit still available before the limit is reached
    pub fn available_credit(&self) -> Money {
        self.credit_limit - self.outstanding_balance
    }

    /// Reserves credit for a new sale
    ///
    /// A sale that exactly exhausts the limit succeeds; one minor unit
    /// more fails. On success the outstanding balance and the lifetime
    /// purchases counter both grow by `amount`.
    ///
    /// # Errors
    ///
    /// `CreditExceeded` when `amount` is greater than the available credit.
    pub fn reserve(&mut self, amount: Money) -> Result<(), CreditError> {
        if amount.is_negative() {
            return Err(CreditError::validation("reserve amount must not be negative"));
        }
        let available = self.available_credit();
        if amount > available {
            return Err(CreditError::CreditExceeded {
                requested: amount,
                available,
            });
        }
        self.outstanding_balance += amount;
        self.total_purchases += amount;
        Ok(())
    }

    /// Releases credit when a payment is applied
    ///
    /// # Errors
    ///
    /// `LedgerInconsistency` if the release would drive the outstanding
    /// balance negative. Callers must never pass more than the customer's
    /// current outstanding balance; this is a defect signal, not a
    /// user-facing error.
    pub fn release(&mut self, amount: Money) -> Result<(), CreditError> {
        if amount.is_negative() {
            return Err(CreditError::validation("release amount must not be negative"));
        }
        if amount > self.outstanding_balance {
            return Err(CreditError::inconsistency(format!(
                "release of {} exceeds outstanding balance {}",
                amount, self.outstanding_balance
            )));
        }
        self.outstanding_balance -= amount;
        self.total_paid += amount;
        Ok(())
    }

    /// Removes an aborted reservation during invoice-creation rollback
    ///
    /// Inverse of the reserve (and down-payment release) applied earlier
    /// in the same critical section. Only the rollback path may call
    /// this; the reservation being undone never committed, so the
    /// lifetime counters return to their prior values.
    pub fn unwind_reserve(&mut self, total: Money, down_payment: Money) {
        self.outstanding_balance -= total - down_payment;
        self.total_purchases -= total;
        self.total_paid -= down_payment;
    }

    /// Removes a charge when an unpaid invoice is cancelled
    ///
    /// Unlike [`Financials::release`] this leaves the lifetime counters
    /// untouched: nothing was paid, the purchase simply ceased to exist
    /// as an obligation.
    pub fn cancel_charge(&mut self, amount: Money) -> Result<(), CreditError> {
        if amount.is_negative() {
            return Err(CreditError::validation("cancel amount must not be negative"));
        }
        if amount > self.outstanding_balance {
            return Err(CreditError::inconsistency(format!(
                "cancellation of {} exceeds outstanding balance {}",
                amount, self.outstanding_balance
            )));
        }
        self.outstanding_balance -= amount;
        Ok(())
    }
}

/// A customer with credit standing and sales-block state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Contact phone, used by the external notification dispatcher
    pub phone: Option<String>,
    /// Financial aggregate, owned exclusively by the ledger operations
    pub financials: Financials,
    /// Active sales block, if any
    pub block: Option<SalesBlock>,
    /// Optimistic-concurrency version, bumped by the store on every write
    pub version: u64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer with the given credit limit
    pub fn new(name: impl Into<String>, credit_limit: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new_v7(),
            name: name.into(),
            phone: None,
            financials: Financials::new(credit_limit),
            block: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the contact phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns true if the customer carries an active sales block
    pub fn is_blocked(&self) -> bool {
        self.block.is_some()
    }

    /// Places a sales block
    pub fn place_block(&mut self, reason: impl Into<String>) {
        self.block = Some(SalesBlock::new(reason));
        self.updated_at = Utc::now();
    }

    /// Lifts the sales block
    pub fn lift_block(&mut self) {
        self.block = None;
        self.updated_at = Utc::now();
    }
}
