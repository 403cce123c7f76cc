//! Error types.
//!
//! Each layer has its own error enum; [`EngineError`] is the umbrella the
//! navigation surface returns, converting from the layer errors via `From`.

use crate::template::TemplateError;
use thiserror::Error;

/// Top-level error for navigation and bootstrap.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Route table failure.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// View construction or initialization failure.
    #[error(transparent)]
    View(#[from] ViewError),

    /// Template failure surfaced outside a view.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The application root element is missing from the document.
    #[error("root element `{0}` not found in document")]
    RootNotFound(String),
}

/// Route table and router lifecycle failures.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Path not registered and no default route configured.
    #[error("no route for `{0}` and no default route configured")]
    NoRoute(String),

    /// The default points at a path with no registered factory.
    #[error("default route `{0}` has no registered factory")]
    DefaultUnregistered(String),

    /// A factory is already registered for this path.
    #[error("route `{0}` is already registered")]
    Duplicate(String),

    /// Registration attempted after the router started serving.
    #[error("route table is frozen once the router is initialized")]
    Frozen,

    /// The router was initialized twice.
    #[error("router is already initialized")]
    AlreadyInitialized,

    /// The router behind this navigator has been dropped.
    #[error("router is gone")]
    RouterGone,
}

/// View lifecycle failures.
#[derive(Debug, Error)]
pub enum ViewError {
    /// `init` called on a view that is already live.
    #[error("view is already initialized")]
    AlreadyInitialized,

    /// `init` called on a view that has been retired.
    #[error("view has been deinitialized")]
    Deinitialized,

    /// The factory could not build the view.
    #[error("view construction failed: {0}")]
    Construction(String),

    /// The view's first render failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
