//! Maintenance handlers
//!
//! The due-date sweep is owned by an external scheduler; this endpoint
//! is what it calls.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::dto::invoices::{SweepRequest, SweepResponse};
use crate::error::ApiError;
use crate::AppState;

/// Flips open invoices past their due dates to overdue
pub async fn overdue_sweep(
    State(state): State<AppState>,
    Json(request): Json<SweepRequest>,
) -> Result<Json<SweepResponse>, ApiError> {
    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let flipped = state.invoices.mark_overdue(as_of).await?;
    Ok(Json(SweepResponse { as_of, flipped }))
}
