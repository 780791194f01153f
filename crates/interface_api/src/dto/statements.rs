//! Statement DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_credit::statement::{EntryKind, Statement, StatementEntry, StatementSummary};

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Period start (calendar date, inclusive)
    pub from: Option<NaiveDate>,
    /// Period end (calendar date, inclusive)
    pub to: Option<NaiveDate>,
    /// IANA timezone the period dates are interpreted in; defaults to UTC
    pub tz: Option<String>,
    /// Balance carried into the period
    pub opening_balance: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct StatementEntryResponse {
    pub kind: EntryKind,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub balance: Decimal,
    pub invoice_id: String,
    pub payment_id: Option<String>,
}

impl From<StatementEntry> for StatementEntryResponse {
    fn from(entry: StatementEntry) -> Self {
        Self {
            kind: entry.kind,
            date: entry.date,
            amount: entry.amount.to_decimal(),
            balance: entry.balance.to_decimal(),
            invoice_id: entry.invoice_id.to_string(),
            payment_id: entry.payment_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatementSummaryResponse {
    pub total_purchases: Decimal,
    pub total_payments: Decimal,
    pub current_balance: Decimal,
}

impl From<StatementSummary> for StatementSummaryResponse {
    fn from(summary: StatementSummary) -> Self {
        Self {
            total_purchases: summary.total_purchases.to_decimal(),
            total_payments: summary.total_payments.to_decimal(),
            current_balance: summary.current_balance.to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub customer_id: String,
    pub opening_balance: Decimal,
    pub entries: Vec<StatementEntryResponse>,
    pub summary: StatementSummaryResponse,
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            customer_id: statement.customer_id.to_string(),
            opening_balance: statement.opening_balance.to_decimal(),
            entries: statement.entries.into_iter().map(Into::into).collect(),
            summary: statement.summary.into(),
        }
    }
}
