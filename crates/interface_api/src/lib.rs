//! HTTP API Layer
//!
//! This crate provides the REST API for the installment-credit core
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers for customers, items, invoices,
//!   payments, statements, and maintenance
//! - **DTOs**: request/response objects with decimal money at the edge
//! - **Middleware**: request audit logging and tracing
//! - **Error handling**: consistent mapping of domain errors to HTTP
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let app = create_router(AppState::new(ApiConfig::default()));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_credit::services::{
    CustomerService, InvoiceService, PaymentService, Services, StatementService,
};
use infra_store::{InMemoryCatalog, InMemoryStore, LogDispatcher};

use crate::config::ApiConfig;
use crate::handlers::{customers, health, invoices, items, maintenance};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub invoices: InvoiceService,
    pub payments: PaymentService,
    pub statements: StatementService,
    pub catalog: Arc<InMemoryCatalog>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over the in-memory adapters
    pub fn new(config: ApiConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let services = Services::new(
            store.clone(),
            store,
            catalog.clone(),
            Arc::new(LogDispatcher::new()),
        );
        Self {
            customers: services.customers,
            invoices: services.invoices,
            payments: services.payments,
            statements: services.statements,
            catalog,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Wired application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (probes)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", post(customers::create_customer))
        .route("/:id", get(customers::get_customer))
        .route("/:id/sales-block", put(customers::set_sales_block))
        .route("/:id/statement", get(customers::get_statement))
        .route("/:id/invoices", get(customers::list_invoices));

    // Catalog item routes
    let item_routes = Router::new()
        .route("/", post(items::create_item))
        .route("/:id", get(items::get_item));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice))
        .route("/:id", get(invoices::get_invoice))
        .route("/:id/payments", post(invoices::apply_payment))
        .route("/:id/pay-in-full", post(invoices::pay_in_full))
        .route("/:id/cancel", post(invoices::cancel_invoice));

    // Maintenance routes (external scheduler)
    let maintenance_routes = Router::new().route("/overdue-sweep", post(maintenance::overdue_sweep));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/items", item_routes)
        .nest("/invoices", invoice_routes)
        .nest("/maintenance", maintenance_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
