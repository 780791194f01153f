//! Installment scheduling
//!
//! Pure computation of a due-dated installment schedule. All rounding
//! policy lives here: the base amount is the floor of the even split and
//! the final installment absorbs the exact remainder, so the schedule
//! sums to the total unconditionally.

use chrono::{Days, Months, NaiveDate};
use core_kernel::Money;
use serde::{Deserialize, Serialize};

use crate::error::CreditError;
use crate::invoice::{Installment, InstallmentStatus};

/// How often an installment falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every 7 days
    Weekly,
    /// Every 15 days (quincena)
    Biweekly,
    /// Every calendar month
    Monthly,
    /// Every two calendar months
    Bimonthly,
}

impl Frequency {
    /// Advances `start` by `steps` frequency intervals
    ///
    /// Month-based frequencies use calendar arithmetic anchored at the
    /// start date (Jan 31 + 1 month = Feb 28/29), never cumulative
    /// clamping.
    pub fn advance(&self, start: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => start.checked_add_days(Days::new(7 * steps as u64)),
            Frequency::Biweekly => start.checked_add_days(Days::new(15 * steps as u64)),
            Frequency::Monthly => start.checked_add_months(Months::new(steps)),
            Frequency::Bimonthly => start.checked_add_months(Months::new(2 * steps)),
        }
    }
}

/// The terms requested for an installment sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Number of installments, at least one
    pub count: u32,
    /// Interval between due dates
    pub frequency: Frequency,
    /// Amount paid up front, strictly less than the invoice total
    pub down_payment: Money,
}

/// Builds the installment schedule for `total`
///
/// Every installment receives `floor(total / count)` minor units except
/// the last, which receives `total - base * (count - 1)` so the sum is
/// exact regardless of rounding. Due dates advance from `start_date` by
/// the frequency step; the first installment is due one full step after
/// the invoice date, never on day zero.
///
/// # Errors
///
/// Validation failure when `count` is zero, `total` is negative, or a
/// due date falls outside the representable calendar range.
pub fn build_schedule(
    total: Money,
    count: u32,
    frequency: Frequency,
    start_date: NaiveDate,
) -> Result<Vec<Installment>, CreditError> {
    if count == 0 {
        return Err(CreditError::validation("installment count must be at least 1"));
    }
    if total.is_negative() {
        return Err(CreditError::validation("scheduled total must not be negative"));
    }

    let base = Money::from_minor(total.minor() / count as i64);
    let last = total - base * (count as i64 - 1);

    let mut installments = Vec::with_capacity(count as usize);
    for number in 1..=count {
        let due_date = frequency
            .advance(start_date, number)
            .ok_or_else(|| CreditError::validation("due date out of calendar range"))?;
        let amount = if number == count { last } else { base };
        installments.push(Installment {
            number,
            due_date,
            amount,
            paid_amount: Money::zero(),
            status: InstallmentStatus::Pending,
        });
    }

    Ok(installments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_thousand_over_three_monthly() {
        let schedule =
            build_schedule(Money::from_minor(1000), 3, Frequency::Monthly, date(2026, 1, 10))
                .unwrap();

        let amounts: Vec<i64> = schedule.iter().map(|i| i.amount.minor()).collect();
        assert_eq!(amounts, vec![333, 333, 334]);

        let dues: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dues,
            vec![date(2026, 2, 10), date(2026, 3, 10), date(2026, 4, 10)]
        );
    }

    #[test]
    fn test_exact_division_has_no_remainder() {
        let schedule =
            build_schedule(Money::from_minor(90_000), 3, Frequency::Weekly, date(2026, 1, 1))
                .unwrap();
        assert!(schedule.iter().all(|i| i.amount == Money::from_minor(30_000)));
    }

    #[test]
    fn test_first_due_date_is_one_step_out() {
        let schedule =
            build_schedule(Money::from_minor(500), 2, Frequency::Biweekly, date(2026, 6, 1))
                .unwrap();
        assert_eq!(schedule[0].due_date, date(2026, 6, 16));
        assert_eq!(schedule[1].due_date, date(2026, 7, 1));
    }

    #[test]
    fn test_month_end_clamps() {
        let schedule =
            build_schedule(Money::from_minor(300), 2, Frequency::Monthly, date(2026, 1, 31))
                .unwrap();
        assert_eq!(schedule[0].due_date, date(2026, 2, 28));
        // Anchored at the start date, not at the clamped previous due
        assert_eq!(schedule[1].due_date, date(2026, 3, 31));
    }

    #[test]
    fn test_bimonthly_step() {
        let schedule =
            build_schedule(Money::from_minor(100), 2, Frequency::Bimonthly, date(2026, 1, 15))
                .unwrap();
        assert_eq!(schedule[0].due_date, date(2026, 3, 15));
        assert_eq!(schedule[1].due_date, date(2026, 5, 15));
    }

    #[test]
    fn test_zero_count_rejected() {
        let result = build_schedule(Money::from_minor(100), 0, Frequency::Weekly, date(2026, 1, 1));
        assert!(matches!(result, Err(CreditError::Validation(_))));
    }

    #[test]
    fn test_single_installment_takes_all() {
        let schedule =
            build_schedule(Money::from_minor(12_345), 1, Frequency::Monthly, date(2026, 1, 1))
                .unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].amount, Money::from_minor(12_345));
    }
}
