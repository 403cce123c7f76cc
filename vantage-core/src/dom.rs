//! Host document capabilities.
//!
//! The engine never touches a concrete DOM. It talks to the page through
//! [`Element`] and [`Document`], and receives user input as [`InputEvent`]
//! values built by the host binding. Tests drive the same surface with the
//! mock elements from `vantage-std`.

use bitflags::bitflags;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

bitflags! {
    /// Modifier keys held during a click.
    ///
    /// A modified click on an internal anchor keeps its native meaning
    /// (open in new tab, etc.) and is never intercepted.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ClickModifiers: u8 {
        /// Control key.
        const CTRL = 1 << 0;
        /// Alt key.
        const ALT = 1 << 1;
        /// Shift key.
        const SHIFT = 1 << 2;
        /// Meta (command) key.
        const META = 1 << 3;
    }
}

/// What kind of user input an [`InputEvent`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// A pointer click, possibly on (or inside) an anchor.
    Click,
    /// A form submission.
    Submit,
}

/// Identifier for one listener registration on one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback registered on an element for a given [`InputKind`].
pub type InputHandler = Rc<dyn Fn(&InputEvent)>;

/// Anchor metadata resolved by the host at event time.
///
/// For a click that did not land on or inside an anchor the interceptor
/// sees no [`Anchor`] at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    /// The anchor's `href`, if any.
    pub href: Option<String>,
    /// Value of the routing opt-in attribute, if present.
    pub route: Option<String>,
    /// True when the href points outside the application origin.
    pub external: bool,
}

/// Submitted form fields, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    /// Builds form data from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, or `""` when the field is absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }
}

/// One user input delivered to a listener.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Click or submit.
    pub kind: InputKind,
    /// Anchor context for clicks that landed on or inside an anchor.
    pub anchor: Option<Anchor>,
    /// Field values for submits.
    pub form: Option<FormData>,
    /// Modifier keys held during a click.
    pub modifiers: ClickModifiers,
    default_prevented: Cell<bool>,
}

impl InputEvent {
    /// A click event, with anchor context when the click hit an anchor.
    pub fn click(anchor: Option<Anchor>, modifiers: ClickModifiers) -> Self {
        Self {
            kind: InputKind::Click,
            anchor,
            form: None,
            modifiers,
            default_prevented: Cell::new(false),
        }
    }

    /// A form submission carrying the submitted fields.
    pub fn submit(form: FormData) -> Self {
        Self {
            kind: InputKind::Submit,
            anchor: None,
            form: Some(form),
            modifiers: ClickModifiers::empty(),
            default_prevented: Cell::new(false),
        }
    }

    /// Suppress the host's native handling of this event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether some listener called [`prevent_default`](Self::prevent_default).
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// A rendering surface plus its input listeners.
///
/// Implementations use interior mutability; all engine access goes through
/// `&self` so listeners may call back into the element that invoked them.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Element`",
    label = "missing `Element` implementation",
    note = "Elements own their markup and their input listeners."
)]
pub trait Element {
    /// Replaces the element's markup.
    fn set_html(&self, html: &str);

    /// Current markup.
    fn html(&self) -> String;

    /// Registers a listener for `kind`; returns its removal id.
    fn add_listener(&self, kind: InputKind, handler: InputHandler) -> ListenerId;

    /// Removes a listener. Unknown ids are a no-op.
    fn remove_listener(&self, id: ListenerId);
}

/// Shared handle to an element.
pub type ElementRef = Rc<dyn Element>;

/// Entry point into the host page.
pub trait Document {
    /// Element lookup by id, `None` when the id does not exist.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_value_defaults_to_empty() {
        let form = FormData::from_pairs([("login", "ada")]);
        assert_eq!(form.get("login"), Some("ada"));
        assert_eq!(form.value("password"), "");
        assert_eq!(form.get("password"), None);
    }

    #[test]
    fn prevent_default_is_sticky() {
        let ev = InputEvent::click(None, ClickModifiers::empty());
        assert!(!ev.default_prevented());
        ev.prevent_default();
        ev.prevent_default();
        assert!(ev.default_prevented());
    }
}
