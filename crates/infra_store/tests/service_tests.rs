//! Service-level tests over the in-memory adapters
//!
//! These exercise the full orchestration: gate check, stock validation,
//! credit reservation, scheduling, rollback, payment application, and
//! the serialization guarantees for concurrent writers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use core_kernel::{CustomerId, DomainPort, ItemId, Money, Timezone};
use domain_catalog::{CatalogError, CatalogItem, CatalogPort};
use domain_credit::invoice::{InvoiceStatus, PaymentMethod, PaymentTerms};
use domain_credit::ports::{CustomerStore, InvoiceStore};
use domain_credit::schedule::{Frequency, InstallmentPlan};
use domain_credit::services::{CreateInvoiceCommand, SaleLine, Services};
use domain_credit::CreditError;
use infra_store::{InMemoryCatalog, InMemoryStore, LogDispatcher};
use test_utils::{assert_ledger_conserved, CatalogItemBuilder, CollectingDispatcher, CustomerBuilder};

struct Harness {
    services: Services,
    store: Arc<InMemoryStore>,
    catalog: Arc<InMemoryCatalog>,
    dispatcher: Arc<CollectingDispatcher>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let dispatcher = Arc::new(CollectingDispatcher::new());
    let services = Services::new(
        store.clone(),
        store.clone(),
        catalog.clone(),
        dispatcher.clone(),
    );
    Harness {
        services,
        store,
        catalog,
        dispatcher,
    }
}

async fn seed_customer(h: &Harness, limit_minor: i64) -> CustomerId {
    let customer = CustomerBuilder::new()
        .with_credit_limit(Money::from_minor(limit_minor))
        .build();
    let id = customer.id;
    CustomerStore::insert(h.store.as_ref(), customer).await.unwrap();
    id
}

fn seed_item(h: &Harness, price_minor: i64, stock: i64) -> ItemId {
    let item = CatalogItemBuilder::new()
        .with_unit_price(Money::from_minor(price_minor))
        .with_quantity(stock)
        .build();
    let id = item.id;
    h.catalog.insert_item(item);
    id
}

fn installment_command(
    customer_id: CustomerId,
    item_id: ItemId,
    quantity: i64,
    count: u32,
    down_payment_minor: i64,
) -> CreateInvoiceCommand {
    CreateInvoiceCommand {
        customer_id,
        lines: vec![SaleLine { item_id, quantity }],
        terms: PaymentTerms::Installment,
        plan: Some(InstallmentPlan {
            count,
            frequency: Frequency::Monthly,
            down_payment: Money::from_minor(down_payment_minor),
        }),
        due_date: None,
    }
}

// ============================================================================
// Invoice creation
// ============================================================================

#[tokio::test]
async fn create_installment_invoice_reserves_credit_and_stock() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 30_000, 10);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 2, 3, 0))
        .await
        .unwrap();

    assert_eq!(invoice.total_amount, Money::from_minor(60_000));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.installments.len(), 3);
    let scheduled: Money = invoice.installments.iter().map(|i| i.amount).sum();
    assert_eq!(scheduled, Money::from_minor(60_000));

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::from_minor(60_000));
    assert_eq!(customer.financials.total_purchases, Money::from_minor(60_000));

    let item = h.catalog.get_item(item_id).await.unwrap();
    assert_eq!(item.available_quantity, 8);

    assert_eq!(h.dispatcher.names(), vec!["invoice_created"]);
}

#[tokio::test]
async fn down_payment_settles_part_of_the_balance_at_creation() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 60_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 3, 15_000))
        .await
        .unwrap();

    assert_eq!(invoice.down_payment, Money::from_minor(15_000));
    assert_eq!(invoice.paid_amount, Money::from_minor(15_000));
    assert_eq!(invoice.remaining_amount, Money::from_minor(45_000));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    let scheduled: Money = invoice.installments.iter().map(|i| i.amount).sum();
    assert_eq!(scheduled, Money::from_minor(45_000));

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::from_minor(45_000));
    assert_eq!(customer.financials.total_purchases, Money::from_minor(60_000));
    assert_eq!(customer.financials.total_paid, Money::from_minor(15_000));

    assert_eq!(h.dispatcher.names(), vec!["invoice_created", "payment_received"]);
}

#[tokio::test]
async fn blocked_customer_is_rejected_before_any_mutation() {
    let h = harness();
    let customer = CustomerBuilder::new()
        .with_credit_limit(Money::from_minor(500_000))
        .blocked("manual review pending")
        .build();
    let customer_id = customer.id;
    CustomerStore::insert(h.store.as_ref(), customer).await.unwrap();
    let item_id = seed_item(&h, 10_000, 4);

    let err = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap_err();

    match err {
        CreditError::SalesBlocked { reason } => assert_eq!(reason, "manual review pending"),
        other => panic!("expected SalesBlocked, got {other:?}"),
    }

    let item = h.catalog.get_item(item_id).await.unwrap();
    assert_eq!(item.available_quantity, 4);
    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::zero());
    assert!(h.dispatcher.events().is_empty());
}

#[tokio::test]
async fn insufficient_stock_names_the_first_violating_item() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let plentiful = seed_item(&h, 5_000, 50);
    let scarce_item = CatalogItemBuilder::new()
        .with_name("Scarce blender")
        .with_unit_price(Money::from_minor(8_000))
        .with_quantity(1)
        .build();
    let scarce = scarce_item.id;
    h.catalog.insert_item(scarce_item);

    let err = h
        .services
        .invoices
        .create_invoice(CreateInvoiceCommand {
            customer_id,
            lines: vec![
                SaleLine { item_id: plentiful, quantity: 2 },
                SaleLine { item_id: scarce, quantity: 3 },
            ],
            terms: PaymentTerms::Cash,
            plan: None,
            due_date: None,
        })
        .await
        .unwrap_err();

    match err {
        CreditError::InsufficientStock { item, requested, available } => {
            assert_eq!(item, "Scarce blender");
            assert_eq!(requested, 3);
            assert_eq!(available, 1);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // No partial commit: neither line touched stock or credit
    assert_eq!(h.catalog.get_item(plentiful).await.unwrap().available_quantity, 50);
    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::zero());
}

#[tokio::test]
async fn credit_boundary_exact_limit_succeeds_then_one_cent_fails() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let exact = seed_item(&h, 500_000, 1);
    let cheap = seed_item(&h, 1, 1);

    h.services
        .invoices
        .create_invoice(installment_command(customer_id, exact, 1, 4, 0))
        .await
        .unwrap();

    let err = h
        .services
        .invoices
        .create_invoice(CreateInvoiceCommand {
            customer_id,
            lines: vec![SaleLine { item_id: cheap, quantity: 1 }],
            terms: PaymentTerms::Cash,
            plan: None,
            due_date: None,
        })
        .await
        .unwrap_err();

    match err {
        CreditError::CreditExceeded { requested, available } => {
            assert_eq!(requested, Money::from_minor(1));
            assert_eq!(available, Money::zero());
        }
        other => panic!("expected CreditExceeded, got {other:?}"),
    }
    // The rejected sale must not touch stock
    assert_eq!(h.catalog.get_item(cheap).await.unwrap().available_quantity, 1);
}

// ============================================================================
// Rollback when stock fails after the reservation
// ============================================================================

struct FailingCatalog {
    inner: InMemoryCatalog,
    fail_on: ItemId,
}

impl DomainPort for FailingCatalog {}

#[async_trait]
impl CatalogPort for FailingCatalog {
    async fn get_item(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        self.inner.get_item(id).await
    }

    async fn decrement_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError> {
        if id == self.fail_on {
            return Err(CatalogError::Store("simulated catalog outage".to_string()));
        }
        self.inner.decrement_stock(id, quantity).await
    }

    async fn increment_stock(&self, id: ItemId, quantity: i64) -> Result<(), CatalogError> {
        self.inner.increment_stock(id, quantity).await
    }
}

#[tokio::test]
async fn failed_stock_decrement_unwinds_credit_and_prior_decrements() {
    let store = Arc::new(InMemoryStore::new());
    let inner = InMemoryCatalog::new();

    let good_item = CatalogItemBuilder::new()
        .with_unit_price(Money::from_minor(10_000))
        .with_quantity(5)
        .build();
    let bad_item = CatalogItemBuilder::new()
        .with_unit_price(Money::from_minor(20_000))
        .with_quantity(5)
        .build();
    let (good, bad) = (good_item.id, bad_item.id);
    inner.insert_item(good_item);
    inner.insert_item(bad_item);

    let catalog = Arc::new(FailingCatalog { inner, fail_on: bad });
    let services = Services::new(
        store.clone(),
        store.clone(),
        catalog.clone(),
        Arc::new(LogDispatcher::new()),
    );

    let customer = CustomerBuilder::new()
        .with_credit_limit(Money::from_minor(500_000))
        .build();
    let customer_id = customer.id;
    CustomerStore::insert(store.as_ref(), customer).await.unwrap();

    let err = services
        .invoices
        .create_invoice(CreateInvoiceCommand {
            customer_id,
            lines: vec![
                SaleLine { item_id: good, quantity: 2 },
                SaleLine { item_id: bad, quantity: 1 },
            ],
            terms: PaymentTerms::Cash,
            plan: None,
            due_date: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CreditError::Storage(_)));

    // The first decrement was rolled back and the reservation unwound
    assert_eq!(catalog.get_item(good).await.unwrap().available_quantity, 5);
    let customer = CustomerStore::get(store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::zero());
    assert_eq!(customer.financials.total_purchases, Money::zero());

    // And nothing was persisted
    let invoices = InvoiceStore::list_by_customer(store.as_ref(), customer_id)
        .await
        .unwrap();
    assert!(invoices.is_empty());
}

// ============================================================================
// Payments
// ============================================================================

#[tokio::test]
async fn payment_flows_through_invoice_and_ledger() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 30_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 3, 0))
        .await
        .unwrap();

    let updated = h
        .services
        .payments
        .apply_payment(invoice.id, Money::from_minor(12_000), PaymentMethod::Cash)
        .await
        .unwrap();

    assert_eq!(updated.status, InvoiceStatus::PartiallyPaid);
    assert_eq!(updated.remaining_amount, Money::from_minor(18_000));
    assert_eq!(updated.installments[0].paid_amount, Money::from_minor(10_000));
    assert_eq!(updated.installments[1].paid_amount, Money::from_minor(2_000));

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    let invoices = InvoiceStore::list_by_customer(h.store.as_ref(), customer_id)
        .await
        .unwrap();
    assert_ledger_conserved(&customer.financials, &invoices);
    assert_eq!(customer.financials.total_paid, Money::from_minor(12_000));
}

#[tokio::test]
async fn pay_in_full_settles_and_emits_settlement() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 45_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap();

    let settled = h
        .services
        .payments
        .pay_in_full(invoice.id, PaymentMethod::BankTransfer)
        .await
        .unwrap();

    assert_eq!(settled.status, InvoiceStatus::Paid);
    assert_eq!(settled.remaining_amount, Money::zero());

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::zero());

    let names = h.dispatcher.names();
    assert!(names.contains(&"payment_received"));
    assert!(names.contains(&"invoice_settled"));

    // A settled invoice takes nothing further
    let err = h
        .services
        .payments
        .pay_in_full(invoice.id, PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, CreditError::Validation(_)));
}

#[tokio::test]
async fn overpayment_through_the_service_changes_nothing() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 10_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap();

    let err = h
        .services
        .payments
        .apply_payment(invoice.id, Money::from_minor(10_001), PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, CreditError::Overpayment { .. }));

    let stored = h.services.invoices.get(invoice.id).await.unwrap();
    assert_eq!(stored.paid_amount, Money::zero());
    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.total_paid, Money::zero());
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn cancellation_restores_stock_and_ledger() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 25_000, 6);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 2, 2, 0))
        .await
        .unwrap();
    assert_eq!(h.catalog.get_item(item_id).await.unwrap().available_quantity, 4);

    let cancelled = h.services.invoices.cancel_invoice(invoice.id).await.unwrap();
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

    assert_eq!(h.catalog.get_item(item_id).await.unwrap().available_quantity, 6);
    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::zero());
    // Lifetime counters keep the cancelled purchase
    assert_eq!(customer.financials.total_purchases, Money::from_minor(50_000));

    let invoices = InvoiceStore::list_by_customer(h.store.as_ref(), customer_id)
        .await
        .unwrap();
    assert_ledger_conserved(&customer.financials, &invoices);
}

#[tokio::test]
async fn cancellation_after_a_payment_is_rejected() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 25_000, 6);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap();
    h.services
        .payments
        .apply_payment(invoice.id, Money::from_minor(500), PaymentMethod::Cash)
        .await
        .unwrap();

    let err = h.services.invoices.cancel_invoice(invoice.id).await.unwrap_err();
    assert!(matches!(err, CreditError::Validation(_)));
}

// ============================================================================
// Overdue sweep
// ============================================================================

#[tokio::test]
async fn sweep_flips_past_due_invoices_only() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 10_000, 10);

    let weekly = CreateInvoiceCommand {
        customer_id,
        lines: vec![SaleLine { item_id, quantity: 1 }],
        terms: PaymentTerms::Installment,
        plan: Some(InstallmentPlan {
            count: 2,
            frequency: Frequency::Weekly,
            down_payment: Money::zero(),
        }),
        due_date: None,
    };
    let invoice = h.services.invoices.create_invoice(weekly).await.unwrap();
    let first_due = invoice.installments[0].due_date;

    // On the first due date nothing flips
    assert_eq!(h.services.invoices.mark_overdue(first_due).await.unwrap(), 0);

    // One day later the invoice is overdue; a second sweep is a no-op
    let day_after = first_due + Duration::days(1);
    assert_eq!(h.services.invoices.mark_overdue(day_after).await.unwrap(), 1);
    assert_eq!(h.services.invoices.mark_overdue(day_after).await.unwrap(), 0);

    let stored = h.services.invoices.get(invoice.id).await.unwrap();
    assert_eq!(stored.status, InvoiceStatus::Overdue);
    assert!(h.dispatcher.names().contains(&"invoice_overdue"));
}

// ============================================================================
// Sales gate administration
// ============================================================================

#[tokio::test]
async fn block_and_unblock_round_trip_with_events() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;

    let blocked = h
        .services
        .customers
        .set_sales_block(customer_id, true, Some("field collector request".to_string()))
        .await
        .unwrap();
    assert!(blocked.is_blocked());

    let unblocked = h
        .services
        .customers
        .set_sales_block(customer_id, false, None)
        .await
        .unwrap();
    assert!(!unblocked.is_blocked());

    assert_eq!(h.dispatcher.names(), vec!["sales_block_set", "sales_block_lifted"]);
}

#[tokio::test]
async fn payment_never_lifts_a_block() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 10_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap();

    h.services
        .customers
        .set_sales_block(customer_id, true, Some("risk hold".to_string()))
        .await
        .unwrap();

    h.services
        .payments
        .pay_in_full(invoice.id, PaymentMethod::Cash)
        .await
        .unwrap();

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert!(customer.is_blocked());
}

// ============================================================================
// Statements through the service
// ============================================================================

#[tokio::test]
async fn statement_matches_ledger_and_is_idempotent() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 40_000, 10);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 2, 4, 0))
        .await
        .unwrap();
    h.services
        .payments
        .apply_payment(invoice.id, Money::from_minor(35_000), PaymentMethod::Cash)
        .await
        .unwrap();

    let first = h
        .services
        .statements
        .statement_for(customer_id, None, Timezone::default(), Money::zero())
        .await
        .unwrap();
    let second = h
        .services
        .statements
        .statement_for(customer_id, None, Timezone::default(), Money::zero())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(first.summary.current_balance, customer.financials.outstanding_balance);
    assert_eq!(first.summary.total_purchases, Money::from_minor(80_000));
    assert_eq!(first.summary.total_payments, Money::from_minor(35_000));
}

// ============================================================================
// Concurrency hazards
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reservations_cannot_jointly_exceed_the_limit() {
    let h = harness();
    let customer_id = seed_customer(&h, 50_000).await;
    let item_id = seed_item(&h, 30_000, 10);

    let service_a = h.services.invoices.clone();
    let service_b = h.services.invoices.clone();
    let cmd_a = installment_command(customer_id, item_id, 1, 2, 0);
    let cmd_b = installment_command(customer_id, item_id, 1, 2, 0);

    let (a, b) = tokio::join!(
        tokio::spawn(async move { service_a.create_invoice(cmd_a).await }),
        tokio::spawn(async move { service_b.create_invoice(cmd_b).await }),
    );
    let results = [a.unwrap(), b.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of the two reservations may pass");
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(CreditError::CreditExceeded { .. }))));

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    assert_eq!(customer.financials.outstanding_balance, Money::from_minor(30_000));
    assert_eq!(h.catalog.get_item(item_id).await.unwrap().available_quantity, 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_payments_cannot_overcommit_an_invoice() {
    let h = harness();
    let customer_id = seed_customer(&h, 500_000).await;
    let item_id = seed_item(&h, 10_000, 5);

    let invoice = h
        .services
        .invoices
        .create_invoice(installment_command(customer_id, item_id, 1, 2, 0))
        .await
        .unwrap();

    let payments_a = h.services.payments.clone();
    let payments_b = h.services.payments.clone();
    let invoice_id = invoice.id;

    let (a, b) = tokio::join!(
        tokio::spawn(async move {
            payments_a
                .apply_payment(invoice_id, Money::from_minor(8_000), PaymentMethod::Cash)
                .await
        }),
        tokio::spawn(async move {
            payments_b
                .apply_payment(invoice_id, Money::from_minor(8_000), PaymentMethod::Cash)
                .await
        }),
    );
    let results = [a.unwrap(), b.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "the second payment must see the drained balance");
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(CreditError::Overpayment { .. }))));

    let stored = h.services.invoices.get(invoice_id).await.unwrap();
    assert_eq!(stored.paid_amount, Money::from_minor(8_000));
    assert_eq!(stored.remaining_amount, Money::from_minor(2_000));

    let customer = CustomerStore::get(h.store.as_ref(), customer_id).await.unwrap();
    let invoices = InvoiceStore::list_by_customer(h.store.as_ref(), customer_id)
        .await
        .unwrap();
    assert_ledger_conserved(&customer.financials, &invoices);
}

// ============================================================================
// Store versioning
// ============================================================================

#[tokio::test]
async fn stale_writes_are_rejected_by_the_version_check() {
    let store = InMemoryStore::new();
    let customer = CustomerBuilder::new().build();
    let id = customer.id;
    CustomerStore::insert(&store, customer).await.unwrap();

    let copy_a = CustomerStore::get(&store, id).await.unwrap();
    let copy_b = CustomerStore::get(&store, id).await.unwrap();

    CustomerStore::update(&store, copy_a).await.unwrap();

    let err = CustomerStore::update(&store, copy_b).await.unwrap_err();
    assert!(err.is_conflict());

    // The accepted write bumped the version
    let current = CustomerStore::get(&store, id).await.unwrap();
    assert_eq!(current.version, 1);
}

#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let store = InMemoryStore::new();
    let customer = CustomerBuilder::new().build();
    let dup = customer.clone();

    CustomerStore::insert(&store, customer).await.unwrap();
    let err = CustomerStore::insert(&store, dup).await.unwrap_err();
    assert!(err.to_string().contains("Already exists"));
}
