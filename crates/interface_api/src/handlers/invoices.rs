//! Invoice and payment handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use validator::Validate;

use core_kernel::{InvoiceId, Money};
use domain_credit::schedule::InstallmentPlan;
use domain_credit::services::{CreateInvoiceCommand, SaleLine};

use crate::dto::invoices::{
    ApplyPaymentRequest, CreateInvoiceRequest, InvoiceResponse, PayInFullRequest,
};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Creates an invoice from a cart of items
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    request.validate()?;

    let plan = match request.plan {
        Some(plan) => {
            plan.validate()?;
            let down_payment =
                Money::from_decimal_positive(plan.down_payment.unwrap_or(Decimal::ZERO))?;
            Some(InstallmentPlan {
                count: plan.count,
                frequency: plan.frequency,
                down_payment,
            })
        }
        None => None,
    };

    let mut lines = Vec::with_capacity(request.lines.len());
    for line in request.lines {
        lines.push(SaleLine {
            item_id: parse_id(&line.item_id, "item")?,
            quantity: line.quantity,
        });
    }

    let command = CreateInvoiceCommand {
        customer_id: parse_id(&request.customer_id, "customer")?,
        lines,
        terms: request.terms,
        plan,
        due_date: request.due_date,
    };

    let invoice = state.invoices.create_invoice(command).await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}

/// Gets an invoice with its schedule and payment history
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice_id: InvoiceId = parse_id(&id, "invoice")?;
    let invoice = state.invoices.get(invoice_id).await?;
    Ok(Json(invoice.into()))
}

/// Applies a payment against the invoice's outstanding schedule
pub async fn apply_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ApplyPaymentRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice_id: InvoiceId = parse_id(&id, "invoice")?;
    let amount = Money::from_decimal(request.amount)?;

    let invoice = state
        .payments
        .apply_payment(invoice_id, amount, request.method)
        .await?;
    Ok(Json(invoice.into()))
}

/// Settles the invoice's full remaining balance
pub async fn pay_in_full(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PayInFullRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice_id: InvoiceId = parse_id(&id, "invoice")?;
    let invoice = state.payments.pay_in_full(invoice_id, request.method).await?;
    Ok(Json(invoice.into()))
}

/// Cancels an unpaid invoice, restoring stock and credit
pub async fn cancel_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice_id: InvoiceId = parse_id(&id, "invoice")?;
    let invoice = state.invoices.cancel_invoice(invoice_id).await?;
    Ok(Json(invoice.into()))
}
