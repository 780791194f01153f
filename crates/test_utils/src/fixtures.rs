//! Common fixture values

use chrono::NaiveDate;
use core_kernel::Money;

/// Standard monetary amounts used across the suites
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Default customer credit limit: 5,000.00
    pub fn credit_limit() -> Money {
        Money::from_minor(500_000)
    }

    /// Default item unit price: 150.00
    pub fn unit_price() -> Money {
        Money::from_minor(15_000)
    }

    /// A small payment: 25.00
    pub fn small_payment() -> Money {
        Money::from_minor(2_500)
    }
}

/// Standard calendar dates used across the suites
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A fixed reference sale date
    pub fn sale_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    /// A date safely after every schedule built from [`Self::sale_date`]
    pub fn far_future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }
}
