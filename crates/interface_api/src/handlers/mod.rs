//! Request handlers

pub mod customers;
pub mod health;
pub mod invoices;
pub mod items;
pub mod maintenance;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path identifier, accepting both bare UUIDs and prefixed forms
pub(crate) fn parse_id<T>(raw: &str, what: &str) -> Result<T, ApiError>
where
    T: FromStr,
{
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} id: {}", what, raw)))
}
