//! Money with integer minor-unit arithmetic
//!
//! Monetary values are stored as whole minor units (cents) in an `i64`.
//! Integer representation makes every sum exact and pushes all rounding
//! decisions to the single place that splits an amount (the installment
//! scheduler). `rust_decimal` is used only at the API boundary to parse
//! and render decimal strings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount {0} has sub-cent precision")]
    PrecisionLoss(Decimal),

    #[error("Amount is out of representable range")]
    Overflow,

    #[error("Amount must not be negative: {0}")]
    Negative(Decimal),
}

/// A monetary amount in minor units (cents)
///
/// The inner value is signed so that ledger deltas and refunds can be
/// expressed, but every externally visible amount is non-negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (cents)
    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Creates a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition, failing on `i64` overflow
    pub fn checked_add(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction, failing on `i64` overflow
    pub fn checked_sub(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked multiplication by a quantity
    pub fn checked_mul(&self, qty: i64) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Parses a decimal amount (e.g. `"123.45"`) into minor units
    ///
    /// Fails if the value carries more than two fractional digits; amounts
    /// are never silently rounded on the way in.
    pub fn from_decimal(value: Decimal) -> Result<Money, MoneyError> {
        let scaled = value * Decimal::ONE_HUNDRED;
        if !scaled.fract().is_zero() {
            return Err(MoneyError::PrecisionLoss(value));
        }
        scaled.to_i64().map(Money).ok_or(MoneyError::Overflow)
    }

    /// Like [`Money::from_decimal`], but additionally rejects negative amounts
    pub fn from_decimal_positive(value: Decimal) -> Result<Money, MoneyError> {
        if value.is_sign_negative() {
            return Err(MoneyError::Negative(value));
        }
        Self::from_decimal(value)
    }

    /// Renders the amount as a two-place decimal
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, qty: i64) -> Self {
        Self(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
