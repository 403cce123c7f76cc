//! # vantage-core
//!
//! Core contracts for the Vantage single-page navigation engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! screens, controllers, and host adapters that don't need the full
//! `vantage-std` implementation.
//!
//! # Architecture
//!
//! Vantage coordinates four pieces around a single-threaded, event-driven
//! execution model:
//!
//! ## Event Bus ([`EventBus`])
//!
//! A named-topic publish/subscribe registry. Controllers finish their
//! asynchronous work outside the engine and re-enter it by publishing an
//! [`Event`]; every view subscribed to that topic is notified synchronously,
//! in subscription order, on the UI thread.
//!
//! - **Decoupling**: views never receive results as return values
//! - **Tokens**: [`EventBus::subscribe`] returns a [`Subscription`] handle
//!   that is surrendered back to [`EventBus::unsubscribe`]
//! - **Snapshot delivery**: a handler mutating the registry during its own
//!   invocation cannot affect the in-progress notification pass
//!
//! ## Views ([`View`])
//!
//! A screen-rendering unit bound to a URL path. Views move through
//! `Constructed → Initialized → Deinitialized` ([`Phase`]) exactly once;
//! a deinitialized view is discarded, never reused. Everything a view
//! registers during [`View::init`] (DOM listeners, bus subscriptions)
//! must be released during [`View::deinit`].
//!
//! ## Router ([`Navigator`])
//!
//! The router owns the path → [`ViewFactory`] table and the single active
//! view, and keeps browser history in sync. Views only ever see the
//! object-safe [`Navigator`] capability, so they can request navigation
//! without holding the router alive.
//!
//! ## Host capabilities ([`Element`], [`History`], [`TemplateEngine`])
//!
//! The DOM, the history stack, and the template renderer are consumed as
//! narrow capability traits. The engine never inspects markup and never
//! awaits anything; hosts (a browser binding, or the mock host in
//! `vantage-std::testing`) implement these traits.
//!
//! # Error Types
//!
//! - [`EngineError`] - Top-level error type
//! - [`RouteError`] - Navigation and route-table errors
//! - [`ViewError`] - View construction and lifecycle errors
//! - [`TemplateError`] - Template rendering errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod controller;
mod dom;
mod error;
mod event;
mod history;
mod template;
mod view;

// Re-exports
pub use bus::{BusRef, EventBus, EventHandler, SubscriberId, Subscription};
pub use controller::{
    LeaderboardController, LeaderboardControllerRef, UserController, UserControllerRef,
};
pub use dom::{
    Anchor, ClickModifiers, Document, Element, ElementRef, FormData, InputEvent, InputHandler,
    InputKind, ListenerId,
};
pub use error::{EngineError, RouteError, ViewError};
pub use event::{Event, FieldError, Payload, topic};
pub use history::{History, HistoryRef, PopHandler};
pub use template::{TemplateEngine, TemplateError, TemplateRef};
pub use view::{Navigator, NavigatorRef, Phase, View, ViewFactory, ViewRef};
