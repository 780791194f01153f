//! Credit domain services
//!
//! The services orchestrate the aggregates over the store and catalog
//! ports. Two hazards require explicit serialization: concurrent credit
//! reservations for the same customer, and concurrent payments against
//! the same invoice. Both are covered by a single-writer critical
//! section per customer (payments serialize on the invoice's owning
//! customer). The versioned stores additionally reject stale writes,
//! which are retried once against fresh state and then surfaced as
//! `ConcurrencyConflict`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use core_kernel::{CustomerId, InvoiceId, Money, Timezone};
use domain_catalog::CatalogPort;

use crate::error::CreditError;
use crate::events::CreditEvent;
use crate::invoice::{Invoice, InvoiceLine, InvoiceStatus, PaymentMethod, PaymentTerms};
use crate::ledger::Customer;
use crate::ports::{CustomerStore, InvoiceStore, NotificationPort};
use crate::schedule::{build_schedule, InstallmentPlan};
use crate::statement::{self, Statement};

/// Per-customer critical sections
///
/// Every financial mutation for a customer runs while holding that
/// customer's mutex, so a read-check-write can never interleave with
/// another writer for the same customer.
#[derive(Default)]
pub struct CustomerLocks {
    locks: DashMap<CustomerId, Arc<Mutex<()>>>,
}

impl CustomerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock guarding the given customer
    pub fn for_customer(&self, id: CustomerId) -> Arc<Mutex<()>> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// One line of a sale request
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub item_id: core_kernel::ItemId,
    pub quantity: i64,
}

/// Everything needed to create an invoice
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    pub customer_id: CustomerId,
    pub lines: Vec<SaleLine>,
    pub terms: PaymentTerms,
    /// Required when terms are installment
    pub plan: Option<InstallmentPlan>,
    /// Required when terms are deferred
    pub due_date: Option<NaiveDate>,
}

/// Shared dependencies for every service
#[derive(Clone)]
struct Deps {
    customers: Arc<dyn CustomerStore>,
    invoices: Arc<dyn InvoiceStore>,
    catalog: Arc<dyn CatalogPort>,
    notifier: Arc<dyn NotificationPort>,
    locks: Arc<CustomerLocks>,
}

/// Bundles the wired service set
pub struct Services {
    pub customers: CustomerService,
    pub invoices: InvoiceService,
    pub payments: PaymentService,
    pub statements: StatementService,
}

impl Services {
    /// Wires the services over the given adapters
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        invoices: Arc<dyn InvoiceStore>,
        catalog: Arc<dyn CatalogPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let deps = Deps {
            customers,
            invoices,
            catalog,
            notifier,
            locks: Arc::new(CustomerLocks::new()),
        };
        Self {
            customers: CustomerService { deps: deps.clone() },
            invoices: InvoiceService { deps: deps.clone() },
            payments: PaymentService { deps: deps.clone() },
            statements: StatementService { deps },
        }
    }
}

/// Loads, mutates, and writes back a customer with one conflict retry
async fn mutate_customer<F>(
    store: &dyn CustomerStore,
    id: CustomerId,
    mutate: F,
) -> Result<Customer, CreditError>
where
    F: Fn(&mut Customer) -> Result<(), CreditError>,
{
    let mut customer = store.get(id).await?;
    mutate(&mut customer)?;
    match store.update(customer.clone()).await {
        Ok(()) => Ok(customer),
        Err(err) if err.is_conflict() => {
            warn!(customer_id = %id, "customer write conflicted, retrying against fresh state");
            let mut fresh = store.get(id).await?;
            mutate(&mut fresh)?;
            match store.update(fresh.clone()).await {
                Ok(()) => Ok(fresh),
                Err(err) if err.is_conflict() => Err(CreditError::ConcurrencyConflict),
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Loads, mutates, and writes back an invoice with one conflict retry
async fn mutate_invoice<F, T>(
    store: &dyn InvoiceStore,
    id: InvoiceId,
    mutate: F,
) -> Result<(Invoice, T), CreditError>
where
    F: Fn(&mut Invoice) -> Result<T, CreditError>,
{
    let mut invoice = store.get(id).await?;
    let value = mutate(&mut invoice)?;
    match store.update(invoice.clone()).await {
        Ok(()) => Ok((invoice, value)),
        Err(err) if err.is_conflict() => {
            warn!(invoice_id = %id, "invoice write conflicted, retrying against fresh state");
            let mut fresh = store.get(id).await?;
            let value = mutate(&mut fresh)?;
            match store.update(fresh.clone()).await {
                Ok(()) => Ok((fresh, value)),
                Err(err) if err.is_conflict() => Err(CreditError::ConcurrencyConflict),
                Err(err) => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Customer service
// ============================================================================

/// Customer registration and the sales gate
#[derive(Clone)]
pub struct CustomerService {
    deps: Deps,
}

impl CustomerService {
    /// Registers a new customer with a credit limit
    pub async fn register(
        &self,
        name: String,
        phone: Option<String>,
        credit_limit: Money,
    ) -> Result<Customer, CreditError> {
        if name.trim().is_empty() {
            return Err(CreditError::validation("customer name must not be empty"));
        }
        if credit_limit.is_negative() {
            return Err(CreditError::validation("credit limit must not be negative"));
        }

        let mut customer = Customer::new(name, credit_limit);
        customer.phone = phone;
        self.deps.customers.insert(customer.clone()).await?;
        info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Fetches a customer
    pub async fn get(&self, id: CustomerId) -> Result<Customer, CreditError> {
        Ok(self.deps.customers.get(id).await?)
    }

    /// Places or lifts the sales block
    ///
    /// Blocking requires no justification machinery beyond a free-text
    /// reason; deciding when to block is external risk policy. Payment
    /// activity never flips this flag back.
    pub async fn set_sales_block(
        &self,
        id: CustomerId,
        blocked: bool,
        reason: Option<String>,
    ) -> Result<Customer, CreditError> {
        let lock = self.deps.locks.for_customer(id);
        let _guard = lock.lock().await;

        let was_blocked = self.deps.customers.get(id).await?.is_blocked();
        let reason = reason.unwrap_or_else(|| "blocked by administrator".to_string());

        let customer = mutate_customer(&*self.deps.customers, id, |c| {
            if blocked {
                c.place_block(reason.clone());
            } else {
                c.lift_block();
            }
            Ok(())
        })
        .await?;

        if blocked && !was_blocked {
            self.deps
                .notifier
                .emit(CreditEvent::SalesBlockSet {
                    customer_id: id,
                    reason,
                    timestamp: Utc::now(),
                })
                .await;
        } else if !blocked && was_blocked {
            self.deps
                .notifier
                .emit(CreditEvent::SalesBlockLifted {
                    customer_id: id,
                    timestamp: Utc::now(),
                })
                .await;
        }

        Ok(customer)
    }
}

// ============================================================================
// Invoice service
// ============================================================================

/// Invoice creation, cancellation, and the overdue sweep
#[derive(Clone)]
pub struct InvoiceService {
    deps: Deps,
}

impl InvoiceService {
    /// Creates an invoice, reserving stock and credit atomically
    ///
    /// Under the customer's critical section: the sales block is
    /// honored before anything else, stock is validated before any
    /// mutation, credit is reserved (with the down payment released in
    /// the same write), stock is decremented, and the invoice is
    /// persisted. Any failure after the reservation unwinds it and every
    /// stock decrement already taken, so both commit or neither does.
    pub async fn create_invoice(
        &self,
        command: CreateInvoiceCommand,
    ) -> Result<Invoice, CreditError> {
        validate_command(&command)?;

        let lock = self.deps.locks.for_customer(command.customer_id);
        let _guard = lock.lock().await;

        // Gate first: a blocked customer causes no stock or credit traffic
        let customer = self.deps.customers.get(command.customer_id).await?;
        if let Some(block) = &customer.block {
            return Err(CreditError::SalesBlocked {
                reason: block.reason.clone(),
            });
        }

        // Read-only stock validation, naming the first violating item
        let mut lines = Vec::with_capacity(command.lines.len());
        for line in &command.lines {
            let item = self.deps.catalog.get_item(line.item_id).await?;
            if !item.can_fulfil(line.quantity) {
                return Err(CreditError::InsufficientStock {
                    item: item.name,
                    requested: line.quantity,
                    available: item.available_quantity,
                });
            }
            lines.push(InvoiceLine::new(
                item.id,
                item.sku,
                item.name,
                item.unit_price,
                line.quantity,
            ));
        }

        let mut invoice = Invoice::new(command.customer_id, lines, command.terms);
        let total = invoice.total_amount;
        if !total.is_positive() {
            return Err(CreditError::validation("invoice total must be positive"));
        }

        let mut down_payment = Money::zero();
        match command.terms {
            PaymentTerms::Installment => {
                let plan = command
                    .plan
                    .ok_or_else(|| CreditError::validation("installment terms require a plan"))?;
                down_payment = plan.down_payment;
                if down_payment.is_negative() {
                    return Err(CreditError::validation("down payment must not be negative"));
                }
                if down_payment >= total {
                    return Err(CreditError::validation(
                        "down payment must be strictly less than the invoice total",
                    ));
                }
                let schedule = build_schedule(
                    total - down_payment,
                    plan.count,
                    plan.frequency,
                    invoice.created_at.date_naive(),
                )?;
                invoice = invoice.with_installments(schedule);
            }
            PaymentTerms::Deferred => {
                let due_date = command
                    .due_date
                    .ok_or_else(|| CreditError::validation("deferred terms require a due date"))?;
                invoice = invoice.with_due_date(due_date);
            }
            PaymentTerms::Cash => {}
        }

        if down_payment.is_positive() {
            invoice.record_down_payment(down_payment, PaymentMethod::Cash, invoice.created_at)?;
        }

        // Reserve the full total; the down payment is released in the
        // same write so the outstanding balance lands at the invoice's
        // remaining amount.
        mutate_customer(&*self.deps.customers, command.customer_id, |c| {
            if let Some(block) = &c.block {
                return Err(CreditError::SalesBlocked {
                    reason: block.reason.clone(),
                });
            }
            c.financials.reserve(total)?;
            if down_payment.is_positive() {
                c.financials.release(down_payment)?;
            }
            Ok(())
        })
        .await?;

        // Decrement stock; unwind everything on the first failure
        let mut decremented: Vec<(core_kernel::ItemId, i64)> = Vec::new();
        for line in &invoice.lines {
            match self
                .deps
                .catalog
                .decrement_stock(line.item_id, line.quantity)
                .await
            {
                Ok(()) => decremented.push((line.item_id, line.quantity)),
                Err(err) => {
                    self.unwind(&decremented, total, down_payment, command.customer_id)
                        .await;
                    return Err(err.into());
                }
            }
        }

        if let Err(err) = self.deps.invoices.insert(invoice.clone()).await {
            self.unwind(&decremented, total, down_payment, command.customer_id)
                .await;
            return Err(err.into());
        }

        info!(
            invoice_id = %invoice.id,
            customer_id = %invoice.customer_id,
            total = %invoice.total_amount,
            terms = ?invoice.terms,
            "invoice created"
        );

        self.deps
            .notifier
            .emit(CreditEvent::InvoiceCreated {
                invoice_id: invoice.id,
                customer_id: invoice.customer_id,
                total_amount: invoice.total_amount,
                timestamp: invoice.created_at,
            })
            .await;
        if let Some(payment) = invoice.payments.first() {
            self.deps
                .notifier
                .emit(CreditEvent::PaymentReceived {
                    invoice_id: invoice.id,
                    customer_id: invoice.customer_id,
                    payment_id: payment.id,
                    amount: payment.amount,
                    timestamp: payment.paid_at,
                })
                .await;
        }

        Ok(invoice)
    }

    /// Rolls back stock decrements and the credit reservation
    async fn unwind(
        &self,
        decremented: &[(core_kernel::ItemId, i64)],
        total: Money,
        down_payment: Money,
        customer_id: CustomerId,
    ) {
        for (item_id, quantity) in decremented {
            if let Err(err) = self.deps.catalog.increment_stock(*item_id, *quantity).await {
                error!(item_id = %item_id, %err, "failed to restore stock during rollback");
            }
        }
        let result = mutate_customer(&*self.deps.customers, customer_id, |c| {
            c.financials.unwind_reserve(total, down_payment);
            Ok(())
        })
        .await;
        if let Err(err) = result {
            error!(customer_id = %customer_id, %err, "failed to unwind credit reservation");
        }
    }

    /// Fetches an invoice
    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, CreditError> {
        Ok(self.deps.invoices.get(id).await?)
    }

    /// Snapshot of a customer's invoices in creation order
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Invoice>, CreditError> {
        Ok(self.deps.invoices.list_by_customer(customer_id).await?)
    }

    /// Cancels an unpaid invoice, restoring stock and credit
    pub async fn cancel_invoice(&self, id: InvoiceId) -> Result<Invoice, CreditError> {
        let probe = self.deps.invoices.get(id).await?;
        let lock = self.deps.locks.for_customer(probe.customer_id);
        let _guard = lock.lock().await;

        let (invoice, released) =
            mutate_invoice(&*self.deps.invoices, id, |inv| inv.cancel()).await?;

        for line in &invoice.lines {
            if let Err(err) = self
                .deps
                .catalog
                .increment_stock(line.item_id, line.quantity)
                .await
            {
                error!(item_id = %line.item_id, %err, "failed to restore stock for cancelled invoice");
            }
        }

        mutate_customer(&*self.deps.customers, invoice.customer_id, |c| {
            c.financials.cancel_charge(released)
        })
        .await?;

        info!(invoice_id = %id, released = %released, "invoice cancelled");
        self.deps
            .notifier
            .emit(CreditEvent::InvoiceCancelled {
                invoice_id: invoice.id,
                customer_id: invoice.customer_id,
                released_amount: released,
                timestamp: Utc::now(),
            })
            .await;

        Ok(invoice)
    }

    /// Flips open invoices past their due dates to overdue
    ///
    /// Invoked by the external scheduler. Idempotent; an invoice whose
    /// write conflicts with a concurrent payment is skipped and caught
    /// by the next sweep.
    pub async fn mark_overdue(&self, as_of: NaiveDate) -> Result<u32, CreditError> {
        let open = self.deps.invoices.list_open().await?;
        let mut flipped = 0u32;

        for snapshot in open {
            let mut invoice = snapshot;
            if !invoice.refresh_overdue(as_of) {
                continue;
            }
            match self.deps.invoices.update(invoice.clone()).await {
                Ok(()) => {
                    flipped += 1;
                    self.deps
                        .notifier
                        .emit(CreditEvent::InvoiceOverdue {
                            invoice_id: invoice.id,
                            customer_id: invoice.customer_id,
                            timestamp: Utc::now(),
                        })
                        .await;
                }
                Err(err) if err.is_conflict() => {
                    debug!(invoice_id = %invoice.id, "sweep write conflicted, deferring to next run");
                }
                Err(err) => return Err(err.into()),
            }
        }

        if flipped > 0 {
            info!(count = flipped, %as_of, "overdue sweep flipped invoices");
        }
        Ok(flipped)
    }
}

// ============================================================================
// Payment service
// ============================================================================

/// Payment application against invoices
#[derive(Clone)]
pub struct PaymentService {
    deps: Deps,
}

impl PaymentService {
    /// Applies a payment to an invoice's outstanding schedule
    pub async fn apply_payment(
        &self,
        invoice_id: InvoiceId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Invoice, CreditError> {
        if !amount.is_positive() {
            return Err(CreditError::InvalidAmount { amount });
        }

        let probe = self.deps.invoices.get(invoice_id).await?;
        let lock = self.deps.locks.for_customer(probe.customer_id);
        let _guard = lock.lock().await;

        self.apply_locked(invoice_id, amount, method).await
    }

    /// Settles the full remaining balance of an invoice
    pub async fn pay_in_full(
        &self,
        invoice_id: InvoiceId,
        method: PaymentMethod,
    ) -> Result<Invoice, CreditError> {
        let probe = self.deps.invoices.get(invoice_id).await?;
        let lock = self.deps.locks.for_customer(probe.customer_id);
        let _guard = lock.lock().await;

        // Read the balance under the lock so a racing payment cannot
        // inflate the settlement into an overpayment.
        let fresh = self.deps.invoices.get(invoice_id).await?;
        if fresh.status.is_terminal() {
            return Err(CreditError::validation("invoice accepts no further payments"));
        }
        self.apply_locked(invoice_id, fresh.remaining_amount, method)
            .await
    }

    async fn apply_locked(
        &self,
        invoice_id: InvoiceId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Invoice, CreditError> {
        let now = Utc::now();
        let (invoice, payment_id) = mutate_invoice(&*self.deps.invoices, invoice_id, |inv| {
            inv.apply_payment(amount, method, now)
        })
        .await?;

        let release = mutate_customer(&*self.deps.customers, invoice.customer_id, |c| {
            c.financials.release(amount)
        })
        .await;
        if let Err(err) = release {
            if matches!(err, CreditError::LedgerInconsistency(_)) {
                error!(
                    invoice_id = %invoice_id,
                    customer_id = %invoice.customer_id,
                    %err,
                    "ledger refused payment release"
                );
            }
            return Err(err);
        }

        info!(
            invoice_id = %invoice_id,
            amount = %amount,
            status = ?invoice.status,
            "payment applied"
        );

        self.deps
            .notifier
            .emit(CreditEvent::PaymentReceived {
                invoice_id: invoice.id,
                customer_id: invoice.customer_id,
                payment_id,
                amount,
                timestamp: now,
            })
            .await;
        if invoice.status == InvoiceStatus::Paid {
            self.deps
                .notifier
                .emit(CreditEvent::InvoiceSettled {
                    invoice_id: invoice.id,
                    customer_id: invoice.customer_id,
                    timestamp: now,
                })
                .await;
        }

        Ok(invoice)
    }
}

// ============================================================================
// Statement service
// ============================================================================

/// Read-only statement generation over a store snapshot
#[derive(Clone)]
pub struct StatementService {
    deps: Deps,
}

impl StatementService {
    /// Generates a statement for the customer
    ///
    /// Takes no locks; the result reflects whatever state existed at
    /// read time.
    pub async fn statement_for(
        &self,
        customer_id: CustomerId,
        range: Option<core_kernel::DateRange>,
        timezone: Timezone,
        opening_balance: Money,
    ) -> Result<Statement, CreditError> {
        // Existence check so an unknown customer is a 404, not an empty statement
        self.deps.customers.get(customer_id).await?;

        let invoices = self.deps.invoices.list_by_customer(customer_id).await?;
        let period = range.map(|r| r.to_utc_bounds(&timezone));
        Ok(statement::generate(
            customer_id,
            &invoices,
            period,
            opening_balance,
        ))
    }
}

fn validate_command(command: &CreateInvoiceCommand) -> Result<(), CreditError> {
    if command.lines.is_empty() {
        return Err(CreditError::validation("an invoice needs at least one line"));
    }
    if command.lines.iter().any(|l| l.quantity <= 0) {
        return Err(CreditError::validation("line quantities must be positive"));
    }
    match command.terms {
        PaymentTerms::Installment if command.plan.is_none() => {
            Err(CreditError::validation("installment terms require a plan"))
        }
        PaymentTerms::Cash | PaymentTerms::Deferred if command.plan.is_some() => Err(
            CreditError::validation("an installment plan is only valid with installment terms"),
        ),
        _ => Ok(()),
    }
}
