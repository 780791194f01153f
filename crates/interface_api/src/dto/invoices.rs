//! Invoice and payment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_credit::invoice::{
    Installment, InstallmentStatus, Invoice, InvoiceLine, InvoiceStatus, Payment, PaymentMethod,
    PaymentTerms,
};
use domain_credit::schedule::Frequency;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    /// Accepts both the prefixed form (`CUS-<uuid>`) and a bare UUID
    pub customer_id: String,
    #[validate(length(min = 1, message = "an invoice needs at least one line"))]
    pub lines: Vec<LineRequest>,
    pub terms: PaymentTerms,
    pub plan: Option<PlanRequest>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LineRequest {
    /// Accepts both the prefixed form (`ITM-<uuid>`) and a bare UUID
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
    pub frequency: Frequency,
    pub down_payment: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyPaymentRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct PayInFullRequest {
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct SweepRequest {
    /// Sweep reference date; defaults to today (UTC)
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub as_of: NaiveDate,
    pub flipped: u32,
}

#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub item_id: String,
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub line_total: Decimal,
}

impl From<InvoiceLine> for LineResponse {
    fn from(line: InvoiceLine) -> Self {
        Self {
            item_id: line.item_id.to_string(),
            sku: line.sku,
            name: line.name,
            unit_price: line.unit_price.to_decimal(),
            quantity: line.quantity,
            line_total: line.line_total.to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InstallmentResponse {
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub status: InstallmentStatus,
}

impl From<Installment> for InstallmentResponse {
    fn from(installment: Installment) -> Self {
        Self {
            number: installment.number,
            due_date: installment.due_date,
            amount: installment.amount.to_decimal(),
            paid_amount: installment.paid_amount.to_decimal(),
            status: installment.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            amount: payment.amount.to_decimal(),
            method: payment.method,
            paid_at: payment.paid_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub customer_id: String,
    pub status: InvoiceStatus,
    pub terms: PaymentTerms,
    pub total_amount: Decimal,
    pub down_payment: Decimal,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub lines: Vec<LineResponse>,
    pub installments: Vec<InstallmentResponse>,
    pub payments: Vec<PaymentResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            customer_id: invoice.customer_id.to_string(),
            status: invoice.status,
            terms: invoice.terms,
            total_amount: invoice.total_amount.to_decimal(),
            down_payment: invoice.down_payment.to_decimal(),
            paid_amount: invoice.paid_amount.to_decimal(),
            remaining_amount: invoice.remaining_amount.to_decimal(),
            due_date: invoice.due_date,
            lines: invoice.lines.into_iter().map(Into::into).collect(),
            installments: invoice.installments.into_iter().map(Into::into).collect(),
            payments: invoice.payments.into_iter().map(Into::into).collect(),
            created_at: invoice.created_at,
        }
    }
}
