//! Collecting event dispatcher for assertions

use async_trait::async_trait;
use parking_lot::Mutex;

use core_kernel::DomainPort;
use domain_credit::events::CreditEvent;
use domain_credit::ports::NotificationPort;

/// Dispatcher that records every emitted event for later assertions
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    events: Mutex<Vec<CreditEvent>>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<CreditEvent> {
        self.events.lock().clone()
    }

    /// Event names in emission order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.name()).collect()
    }
}

impl DomainPort for CollectingDispatcher {}

#[async_trait]
impl NotificationPort for CollectingDispatcher {
    async fn emit(&self, event: CreditEvent) {
        self.events.lock().push(event);
    }
}
