// SPDX-License-Identifier: GPL-3.0-only
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};
use uuid::Uuid;

/// Topic every manifest listener agrees on, inside and outside this crate
pub const MANIFEST_LOADED_TOPIC: &str = "com.ota.update.MANIFEST_LOADED";

type Handler = Arc<dyn Fn() + Send + Sync>;

/// Proof of an active subscription; pass back to [`EventBus::unsubscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(Uuid);

/// Single-topic "manifest refreshed" channel.
///
/// Events carry no payload and are not retained: publishing with no
/// subscribers drops the event. Handlers run on the publisher's task, so
/// they should only forward a message to their owner.
pub struct EventBus {
    topic: &'static str,
    handlers: Mutex<HashMap<SubscriptionHandle, Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_topic(MANIFEST_LOADED_TOPIC)
    }

    pub fn with_topic(topic: &'static str) -> Self {
        Self {
            topic,
            handlers: Mutex::new(HashMap::new()),
        }
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handle = SubscriptionHandle(Uuid::new_v4());
        self.lock().insert(handle, Arc::new(handler));
        debug!(topic = self.topic, ?handle, "Subscribed");
        handle
    }

    /// Returns false if the handle was not (or no longer) subscribed
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let removed = self.lock().remove(&handle).is_some();
        debug!(topic = self.topic, ?handle, removed, "Unsubscribed");
        removed
    }

    /// Notify every current subscriber; returns how many were reached
    pub fn publish(&self) -> usize {
        // Snapshot so a handler may (un)subscribe without deadlocking.
        let handlers: Vec<Handler> = self.lock().values().cloned().collect();

        if handlers.is_empty() {
            debug!(topic = self.topic, "No subscribers, event dropped");
            return 0;
        }

        for handler in &handlers {
            handler();
        }

        trace!(topic = self.topic, delivered = handlers.len(), "Event published");
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SubscriptionHandle, Handler>> {
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
