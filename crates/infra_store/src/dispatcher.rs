//! Event dispatcher adapter
//!
//! The production deployment hands events to the messaging gateway
//! (WhatsApp/PDF delivery lives there); this adapter logs them, which is
//! all the core needs in-process. Emission is fire-and-forget by
//! contract, so there is nothing to propagate.

use async_trait::async_trait;
use tracing::{info, warn};

use core_kernel::DomainPort;
use domain_credit::events::CreditEvent;
use domain_credit::ports::NotificationPort;

/// Dispatcher that logs every event through `tracing`
#[derive(Debug, Default, Clone)]
pub struct LogDispatcher;

impl LogDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for LogDispatcher {}

#[async_trait]
impl NotificationPort for LogDispatcher {
    async fn emit(&self, event: CreditEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(event = event.name(), %payload, "domain event"),
            Err(err) => warn!(event = event.name(), %err, "domain event failed to serialize"),
        }
    }
}
