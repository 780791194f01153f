//! Customer handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use core_kernel::{CustomerId, DateRange, Money, Timezone};

use crate::dto::customers::{CreateCustomerRequest, CustomerResponse, SetSalesBlockRequest};
use crate::dto::invoices::InvoiceResponse;
use crate::dto::statements::{StatementQuery, StatementResponse};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Registers a new customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;
    let credit_limit = Money::from_decimal_positive(request.credit_limit)?;

    let customer = state
        .customers
        .register(request.name, request.phone, credit_limit)
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Gets a customer with their credit standing
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer_id: CustomerId = parse_id(&id, "customer")?;
    let customer = state.customers.get(customer_id).await?;
    Ok(Json(customer.into()))
}

/// Places or lifts the sales block
pub async fn set_sales_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetSalesBlockRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer_id: CustomerId = parse_id(&id, "customer")?;
    let customer = state
        .customers
        .set_sales_block(customer_id, request.blocked, request.reason)
        .await?;
    Ok(Json(customer.into()))
}

/// Generates the customer's statement
pub async fn get_statement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatementQuery>,
) -> Result<Json<StatementResponse>, ApiError> {
    let customer_id: CustomerId = parse_id(&id, "customer")?;

    let timezone = match &query.tz {
        Some(name) => Timezone::parse(name)
            .ok_or_else(|| ApiError::BadRequest(format!("invalid timezone: {}", name)))?,
        None => Timezone::default(),
    };

    let range = match (query.from, query.to) {
        (Some(from), Some(to)) => Some(
            DateRange::new(from, to)
                .map_err(|err| ApiError::BadRequest(err.to_string()))?,
        ),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "from and to must be provided together".to_string(),
            ))
        }
    };

    let opening_balance = match query.opening_balance {
        Some(value) => Money::from_decimal(value)?,
        None => Money::zero(),
    };

    let statement = state
        .statements
        .statement_for(customer_id, range, timezone, opening_balance)
        .await?;
    Ok(Json(statement.into()))
}

/// Lists the customer's invoices in creation order
pub async fn list_invoices(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let customer_id: CustomerId = parse_id(&id, "customer")?;
    // Existence check so an unknown customer is a 404, not an empty list
    state.customers.get(customer_id).await?;
    let invoices = state.invoices.list_for_customer(customer_id).await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}
