//! # vantage - Client-Side View Engine
//!
//! `vantage` is a single-threaded view engine for browser-style hosts: a
//! named-event bus with snapshot delivery, a view lifecycle with guaranteed
//! teardown, and a path router that keeps **exactly one** view alive at a
//! time. The host supplies the document, the session history, and the
//! backend controllers; the engine supplies everything in between, including
//! a ready-made application preset with eight screens.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vantage::{App, Dispatcher};
//!
//! let bus = Dispatcher::shared();
//! let app = App::bootstrap(&document, history, bus, users, boards)?;
//!
//! // Anchor clicks route on their own; programmatic navigation goes
//! // through the navigator handle.
//! app.navigator().route_to("/leaderboard")?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use vantage_core::{
    // DOM input and elements
    Anchor,
    // Event bus
    BusRef,
    ClickModifiers,
    Document,
    Element,
    ElementRef,
    // Error types
    EngineError,
    Event,
    EventBus,
    EventHandler,
    FieldError,
    FormData,
    // Session history
    History,
    HistoryRef,
    InputEvent,
    InputHandler,
    InputKind,
    // Backend controllers
    LeaderboardController,
    LeaderboardControllerRef,
    ListenerId,
    // Navigation
    Navigator,
    NavigatorRef,
    Payload,
    Phase,
    PopHandler,
    RouteError,
    SubscriberId,
    Subscription,
    // Templates
    TemplateEngine,
    TemplateError,
    TemplateRef,
    UserController,
    UserControllerRef,
    // Views
    View,
    ViewError,
    ViewFactory,
    ViewRef,
};

/// Well-known event topic names.
pub use vantage_core::topic;

// Engine implementations
pub use vantage_std::{
    bus::Dispatcher,
    factory::view_factory,
    intercept::AnchorInterceptor,
    router::{Router, RouterBuilder},
    scope::ViewScope,
    template::HandlebarsEngine,
};

pub mod app;
pub mod screens;
pub mod session;

pub use app::App;
pub use session::{Session, User};

/// Testing doubles for every host capability.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use vantage_std::testing::*;
}

/// Common imports for embedders.
///
/// # Usage
///
/// ```rust,ignore
/// use vantage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App,
        // Bus
        BusRef,
        Dispatcher,
        // Host capabilities
        Document,
        Element,
        ElementRef,
        EngineError,
        Event,
        EventBus,
        History,
        HistoryRef,
        LeaderboardController,
        Navigator,
        NavigatorRef,
        Payload,
        // Views and routing
        Router,
        RouterBuilder,
        Session,
        TemplateEngine,
        TemplateRef,
        UserController,
        View,
        ViewError,
        ViewFactory,
        ViewRef,
        ViewScope,
        topic,
    };
}
