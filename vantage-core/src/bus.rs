//! Event bus contract.

use crate::event::Event;
use std::rc::Rc;

/// Handler invoked for every event published on a subscribed topic.
///
/// Handlers run synchronously on the UI thread and must not assume anything
/// about delivery order across *different* topics. They are shared closures
/// so one registry entry can be snapshot-cloned during a notification pass.
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// Opaque identifier distinguishing one registry entry from another.
///
/// Two subscriptions of an identical closure receive distinct ids; the bus
/// never deduplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Token returned by [`EventBus::subscribe`].
///
/// The token, not the handler's identity, is what [`EventBus::unsubscribe`]
/// consumes; holding it is the only way to release the registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    /// Topic the handler was registered under.
    pub topic: String,
    /// Registry entry this token releases.
    pub id: SubscriberId,
}

/// Publish/subscribe registry decoupling controllers from views.
///
/// Contract:
///
/// - [`publish`](Self::publish) notifies every handler currently registered
///   for the event's topic, synchronously and in subscription order. Zero
///   subscribers is a no-op, never an error. Delivery iterates a snapshot:
///   a handler that subscribes or unsubscribes during its own invocation
///   cannot affect the in-progress pass.
/// - [`subscribe`](Self::subscribe) appends to the topic's ordered list.
///   Duplicate registrations of one closure accumulate.
/// - [`unsubscribe`](Self::unsubscribe) releases the token's entry; a stale
///   token is a no-op, not an error.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventBus`",
    label = "missing `EventBus` implementation",
    note = "Implement `subscribe`, `unsubscribe`, and `publish` to act as a bus."
)]
pub trait EventBus {
    /// Register `handler` for `topic`; returns the release token.
    fn subscribe(&self, topic: &str, handler: EventHandler) -> Subscription;

    /// Release a registration. No-op if the token's entry is already gone.
    fn unsubscribe(&self, sub: Subscription);

    /// Deliver `event` to every handler registered for its topic.
    fn publish(&self, event: &Event);
}

/// Shared handle to a bus implementation.
pub type BusRef = Rc<dyn EventBus>;
