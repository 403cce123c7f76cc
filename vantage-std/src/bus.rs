//! Ordered snapshot-delivery event bus.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use vantage_core::{BusRef, Event, EventBus, EventHandler, SubscriberId, Subscription};

/// The standard [`EventBus`]: a per-topic ordered registry with
/// snapshot-then-iterate delivery.
///
/// Handlers registered for a topic are notified in subscription order.
/// Each publish clones the topic's entry list before invoking anything,
/// so a handler that subscribes, unsubscribes, or publishes reentrantly
/// never perturbs the pass that is delivering to it. A handler added
/// during a pass first hears the *next* publish; a handler removed during
/// a pass still hears the current one.
///
/// Duplicate registrations accumulate. Publishing on a topic nobody
/// subscribed to is a no-op.
#[derive(Default)]
pub struct Dispatcher {
    topics: RefCell<HashMap<String, Vec<(SubscriberId, EventHandler)>>>,
    next_id: Cell<u64>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dispatcher behind a shared handle.
    pub fn shared() -> BusRef {
        Rc::new(Self::new())
    }

    /// Number of handlers currently registered for `topic`.
    pub fn handler_count(&self, topic: &str) -> usize {
        self.topics
            .borrow()
            .get(topic)
            .map_or(0, |entries| entries.len())
    }
}

impl EventBus for Dispatcher {
    fn subscribe(&self, topic: &str, handler: EventHandler) -> Subscription {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.topics
            .borrow_mut()
            .entry(topic.to_owned())
            .or_default()
            .push((id, handler));
        #[cfg(feature = "tracing")]
        tracing::debug!(topic, id = id.0, "subscribed");
        Subscription {
            topic: topic.to_owned(),
            id,
        }
    }

    fn unsubscribe(&self, sub: Subscription) {
        let mut topics = self.topics.borrow_mut();
        if let Some(entries) = topics.get_mut(&sub.topic) {
            entries.retain(|(id, _)| *id != sub.id);
            if entries.is_empty() {
                topics.remove(&sub.topic);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(topic = sub.topic.as_str(), id = sub.id.0, "unsubscribed");
    }

    fn publish(&self, event: &Event) {
        // Snapshot before delivery; the borrow must not be held while
        // handlers run, they are free to call back into the bus.
        let pass: Vec<EventHandler> = match self.topics.borrow().get(&event.topic) {
            Some(entries) => entries.iter().map(|(_, h)| h.clone()).collect(),
            None => return,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(topic = event.topic.as_str(), handlers = pass.len(), "publish");
        for handler in pass {
            handler(event);
        }
    }
}
