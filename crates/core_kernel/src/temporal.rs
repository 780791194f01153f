//! Temporal types for statement periods
//!
//! Statement ranges arrive as calendar dates in the tenant's local
//! timezone and are converted to UTC instants for filtering the
//! timestamped event history.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// Timezone wrapper for tenant jurisdictions
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name (e.g. `America/Mexico_City`)
    pub fn parse(name: &str) -> Option<Self> {
        Tz::from_str(name).ok().map(Timezone)
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_local_timezone(self.0)
            .earliest()
            .expect("start of day resolves in every timezone")
            .with_timezone(&Utc)
    }

    /// Gets the end of day (23:59:59.999999999) in this timezone as UTC
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_nano_opt(23, 59, 59, 999_999_999)
            .expect("end of day is always a valid time")
            .and_local_timezone(self.0)
            .latest()
            .expect("end of day resolves in every timezone")
            .with_timezone(&Utc)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// An inclusive calendar-date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Converts to inclusive UTC instant bounds using the given timezone
    pub fn to_utc_bounds(&self, tz: &Timezone) -> (DateTime<Utc>, DateTime<Utc>) {
        (tz.start_of_day(self.start), tz.end_of_day(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let result = DateRange::new(date(2026, 2, 1), date(2026, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        assert!(range.contains(date(2026, 1, 15)));
        assert!(range.contains(date(2026, 1, 31)));
        assert!(!range.contains(date(2026, 2, 1)));
        assert_eq!(range.days(), 30);
    }

    #[test]
    fn test_utc_bounds_in_utc() {
        let range = DateRange::new(date(2026, 3, 1), date(2026, 3, 1)).unwrap();
        let (start, end) = range.to_utc_bounds(&Timezone::default());
        assert_eq!(start.to_rfc3339(), "2026-03-01T00:00:00+00:00");
        assert!(end > start);
    }

    #[test]
    fn test_utc_bounds_shift_with_timezone() {
        let tz = Timezone::parse("America/Mexico_City").unwrap();
        let range = DateRange::new(date(2026, 3, 1), date(2026, 3, 1)).unwrap();
        let (start, _) = range.to_utc_bounds(&tz);
        // Midnight in Mexico City is 06:00 UTC
        assert_eq!(start.to_rfc3339(), "2026-03-01T06:00:00+00:00");
    }

    #[test]
    fn test_timezone_serde_roundtrip() {
        let tz = Timezone::parse("Europe/Madrid").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Madrid\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(tz, back);
    }
}
