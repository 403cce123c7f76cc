//! Event vocabulary shared between controllers and views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Topic names published across the controller/view boundary.
///
/// Controllers publish exactly one of these per completed operation; screens
/// subscribe to the topics they care about during `init`. Publishing a topic
/// nobody currently listens to is a no-op.
pub mod topic {
    /// The current user was resolved (or found absent).
    pub const USER_LOADED: &str = "user-loaded";
    /// An authentication attempt finished.
    pub const LOGGED_IN: &str = "logged-in";
    /// A sign-out finished.
    pub const LOGGED_OUT: &str = "logged-out";
    /// A registration attempt finished.
    pub const SIGNED_UP: &str = "signed-up";
    /// A profile update finished.
    pub const PROFILE_UPDATED: &str = "profile-updated";
    /// An avatar upload finished.
    pub const AVATAR_UPDATED: &str = "avatar-updated";
    /// A leaderboard page arrived.
    pub const LEADERBOARD_LOADED: &str = "leaderboard-loaded";
}

/// A named event delivered through the bus.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Topic the event was published under.
    pub topic: String,
    /// Value carried to every subscriber.
    pub value: Payload,
}

impl Event {
    /// Create an event carrying an arbitrary payload.
    pub fn new(topic: impl Into<String>, value: Payload) -> Self {
        Self {
            topic: topic.into(),
            value,
        }
    }

    /// Create a success-sentinel event.
    pub fn success(topic: impl Into<String>) -> Self {
        Self::new(topic, Payload::Success)
    }

    /// Create a structured-failure event.
    pub fn failure(
        topic: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(topic, Payload::Failure(FieldError::new(field, message)))
    }

    /// Create an event carrying a domain payload.
    pub fn data(topic: impl Into<String>, value: Value) -> Self {
        Self::new(topic, Payload::Data(value))
    }

    /// Create an event carrying nothing (e.g. "no user is signed in").
    pub fn empty(topic: impl Into<String>) -> Self {
        Self::new(topic, Payload::Empty)
    }
}

/// Value carried by an [`Event`].
///
/// Operations report either the bare success sentinel, a structured
/// field-level failure, or a domain payload (user object, leaderboard page).
/// `Empty` stands in for "nothing loaded" (an anonymous visitor, a missing
/// record) and is distinct from failure.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Payload {
    /// The operation succeeded and carries no further data.
    Success,
    /// The operation failed; the error names the offending field.
    Failure(FieldError),
    /// The operation produced a domain payload.
    Data(Value),
    /// The operation completed with nothing to deliver.
    #[default]
    Empty,
}

impl Payload {
    /// Whether this is the success sentinel.
    pub fn is_success(&self) -> bool {
        matches!(self, Payload::Success)
    }

    /// The structured failure, if this payload is one.
    pub fn as_failure(&self) -> Option<&FieldError> {
        match self {
            Payload::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// The domain payload, if this payload carries one.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Payload::Data(value) => Some(value),
            _ => None,
        }
    }
}

/// A domain/validation failure scoped to a single named field.
///
/// Views recover from these locally by echoing the message back into their
/// own rendered form; they are never surfaced to the router.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the form field the failure applies to.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
