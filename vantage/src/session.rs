//! Signed-in user state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use vantage_core::{Event, Payload, topic};

/// Avatar shown when the user never uploaded one.
pub const DEFAULT_AVATAR: &str = "/img/avatar.jpg";

/// Profile of the signed-in user, as the backend reports it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Unique login.
    pub login: String,
    /// Game score.
    #[serde(default)]
    pub score: i64,
    /// Uploaded avatar path, if any.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Parses a user out of an event payload value.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// The avatar to display, falling back to [`DEFAULT_AVATAR`].
    pub fn avatar_or_default(&self) -> &str {
        self.avatar.as_deref().unwrap_or(DEFAULT_AVATAR)
    }
}

/// Who is signed in right now, shared across screens.
///
/// The session does not fetch anything itself. It absorbs the same bus
/// events the screens react to: a `user-loaded` payload installs or clears
/// the user, a `logged-out` success clears it. Screens read it
/// synchronously (the settings screen compares the submitted login against
/// the current one).
#[derive(Default)]
pub struct Session {
    user: RefCell<Option<User>>,
}

impl Session {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anonymous session behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Whether somebody is signed in.
    pub fn is_authorized(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Replaces the session state directly.
    pub fn set(&self, user: Option<User>) {
        *self.user.borrow_mut() = user;
    }

    /// Updates the session from a bus event; events that carry no session
    /// information are ignored.
    pub fn absorb(&self, event: &Event) {
        match event.topic.as_str() {
            topic::USER_LOADED => match &event.value {
                Payload::Data(value) => self.set(User::from_value(value)),
                Payload::Empty => self.set(None),
                _ => {}
            },
            topic::LOGGED_OUT => {
                if event.value.is_success() {
                    self.set(None);
                }
            }
            _ => {}
        }
    }
}
