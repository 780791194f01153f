//! Customer DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_credit::ledger::Customer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub phone: Option<String>,
    pub credit_limit: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SetSalesBlockRequest {
    pub blocked: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub credit_limit: Decimal,
    pub outstanding_balance: Decimal,
    pub available_credit: Decimal,
    pub total_purchases: Decimal,
    pub total_paid: Decimal,
    pub blocked: bool,
    pub block_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name,
            phone: customer.phone,
            credit_limit: customer.financials.credit_limit.to_decimal(),
            outstanding_balance: customer.financials.outstanding_balance.to_decimal(),
            available_credit: customer.financials.available_credit().to_decimal(),
            total_purchases: customer.financials.total_purchases.to_decimal(),
            total_paid: customer.financials.total_paid.to_decimal(),
            blocked: customer.block.is_some(),
            block_reason: customer.block.map(|b| b.reason),
            created_at: customer.created_at,
        }
    }
}
