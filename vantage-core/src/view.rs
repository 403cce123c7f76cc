//! View lifecycle contract.

use crate::dom::ElementRef;
use crate::error::{EngineError, ViewError};
use crate::event::Event;
use std::rc::Rc;

/// Where a view is in its lifecycle.
///
/// The only legal path is `Constructed -> Initialized -> Deinitialized`.
/// Construction acquires nothing observable; initialization acquires
/// subscriptions and listeners; deinitialization releases everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Built, owns no resources yet.
    #[default]
    Constructed,
    /// Live: rendered, subscribed, listening.
    Initialized,
    /// Retired: all resources released. Terminal.
    Deinitialized,
}

/// Programmatic navigation, as handed to views and interceptors.
///
/// The handle stays valid for the view's whole life but outliving the
/// router turns calls into [`RouteError::RouterGone`] errors rather than
/// keeping the router alive.
///
/// [`RouteError::RouterGone`]: crate::error::RouteError::RouterGone
pub trait Navigator {
    /// Activates the view registered for `path`.
    fn route_to(&self, path: &str) -> Result<(), EngineError>;
}

/// Shared handle to a navigator.
pub type NavigatorRef = Rc<dyn Navigator>;

/// A screen owning one element for one activation.
///
/// Implementations take `&self` everywhere and manage state with interior
/// mutability: lifecycle calls may re-enter the view that triggered them
/// (a click handler navigating away deinitializes its own view).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `View`",
    label = "missing `View` implementation",
    note = "Views implement `init`, and usually `render` and `deinit`."
)]
pub trait View {
    /// Brings the view live: first render, subscriptions, listeners.
    ///
    /// Takes `Rc<Self>` so the view can hand weak references of itself to
    /// the callbacks it registers. Calling `init` on a view that is not
    /// [`Phase::Constructed`] is an error.
    fn init(self: Rc<Self>) -> Result<(), ViewError>;

    /// Repaints in place from an event. Never acquires resources, so it is
    /// safe to call any number of times while initialized.
    fn render(&self, _event: &Event) {}

    /// Releases everything `init` acquired and blanks the element.
    ///
    /// Idempotent: any call after the first is a no-op. Never fails.
    fn deinit(&self);
}

impl std::fmt::Debug for dyn View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View").finish_non_exhaustive()
    }
}

/// Shared handle to a view.
pub type ViewRef = Rc<dyn View>;

/// Builds a view over the element it will own, wired to a navigator.
///
/// Factories are how the router stays ignorant of concrete screen types:
/// registration binds a path to a factory, activation calls it. Factories
/// carry their screen's collaborators (bus, templates, controllers) by
/// capture; see `view_factory` in `vantage-std`.
pub type ViewFactory = Rc<dyn Fn(ElementRef, NavigatorRef) -> Result<ViewRef, ViewError>>;
