//! Session history capability.

use std::rc::Rc;

/// Callback fired when the user navigates with back/forward.
///
/// Receives the path the session moved to. The router reacts by activating
/// that path's view without pushing a new entry.
pub type PopHandler = Rc<dyn Fn(&str)>;

/// Browser-style session history.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `History`",
    label = "missing `History` implementation",
    note = "Provide the current location, entry pushes, and pop notifications."
)]
pub trait History {
    /// Path of the current entry.
    fn location(&self) -> String;

    /// Appends a new entry for `path` and makes it current.
    fn push(&self, path: &str);

    /// Registers the pop callback. Later registrations replace earlier ones.
    fn on_pop(&self, handler: PopHandler);
}

/// Shared handle to a history implementation.
pub type HistoryRef = Rc<dyn History>;
