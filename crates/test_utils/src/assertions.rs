//! Domain assertion helpers

use core_kernel::Money;
use domain_credit::invoice::{Invoice, InvoiceStatus};
use domain_credit::ledger::Financials;

/// Asserts the conservation invariant: the outstanding balance equals
/// the sum of remaining amounts over the non-cancelled invoices.
///
/// # Panics
///
/// Panics with a descriptive message when the invariant does not hold.
pub fn assert_ledger_conserved(financials: &Financials, invoices: &[Invoice]) {
    let open: Money = invoices
        .iter()
        .filter(|i| i.status != InvoiceStatus::Cancelled)
        .map(|i| i.remaining_amount)
        .sum();
    assert_eq!(
        financials.outstanding_balance, open,
        "ledger conservation violated: outstanding {} vs invoice remainders {}",
        financials.outstanding_balance, open
    );
}
