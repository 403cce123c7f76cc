//! Testing utilities for Vantage.
//!
//! This module provides in-memory doubles for every host capability so
//! engine and screen behavior can be exercised without a browser.
//!
//! # Features
//!
//! - [`MockElement`]: an element that records markup and fires input events
//! - [`MockDocument`]: an id-to-element table
//! - [`MockHistory`]: a history stack that records pushes and replays pops
//! - [`RecordingNavigator`]: a navigator that records requested paths
//! - [`RecordingHandler`]: an event handler that records deliveries
//! - [`RecordingUserController`] / [`RecordingBoardController`]: controllers
//!   that record calls instead of doing work
//! - [`FailingView`]: a view whose `init` always fails
//! - [`anchor_click`] / [`form_submit`]: input event builders

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use vantage_core::{
    Anchor, ClickModifiers, Document, Element, ElementRef, EngineError, Event, EventHandler,
    FormData, History, InputEvent, InputHandler, InputKind, LeaderboardController, ListenerId,
    Navigator, PopHandler, TemplateError, UserController, View, ViewError,
};

// ============================================================================
// Mock Element
// ============================================================================

/// An in-memory [`Element`].
///
/// Stores markup as a plain string and keeps registered listeners so tests
/// can fire synthetic input through [`fire`](Self::fire).
///
/// # Example
///
/// ```rust,ignore
/// let root = MockElement::shared();
/// root.set_html("<p>hi</p>");
/// root.fire(&anchor_click("/about"));
/// assert_eq!(root.listener_count(), 1);
/// ```
#[derive(Default)]
pub struct MockElement {
    html: RefCell<String>,
    listeners: RefCell<Vec<(ListenerId, InputKind, InputHandler)>>,
    next_id: Cell<u64>,
}

impl MockElement {
    /// Creates an empty element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty element behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers `event` to every listener registered for its kind.
    ///
    /// Listeners are invoked on a snapshot, so a listener that removes
    /// itself (or adds others) mid-delivery cannot perturb the pass.
    pub fn fire(&self, event: &InputEvent) {
        let pass: Vec<InputHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in pass {
            handler(event);
        }
    }
}

impl Element for MockElement {
    fn set_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_owned();
    }

    fn html(&self) -> String {
        self.html.borrow().clone()
    }

    fn add_listener(&self, kind: InputKind, handler: InputHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, kind, handler));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(entry, _, _)| *entry != id);
    }
}

// ============================================================================
// Mock Document
// ============================================================================

/// An id-to-element table implementing [`Document`].
#[derive(Default)]
pub struct MockDocument {
    elements: RefCell<HashMap<String, ElementRef>>,
}

impl MockDocument {
    /// Creates a document with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding one fresh [`MockElement`] under `id`,
    /// returning both.
    pub fn with_element(id: &str) -> (Rc<Self>, Rc<MockElement>) {
        let doc = Rc::new(Self::new());
        let element = MockElement::shared();
        doc.insert(id, element.clone());
        (doc, element)
    }

    /// Registers `element` under `id`.
    pub fn insert(&self, id: &str, element: ElementRef) {
        self.elements.borrow_mut().insert(id.to_owned(), element);
    }
}

impl Document for MockDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements.borrow().get(id).cloned()
    }
}

// ============================================================================
// Mock History
// ============================================================================

/// An in-memory [`History`] that records pushes and replays pops.
///
/// # Example
///
/// ```rust,ignore
/// let history = MockHistory::at("/menu");
/// router.init()?;
/// history.pop_to("/about"); // simulate the back button
/// assert_eq!(history.pushes().len(), 0);
/// ```
pub struct MockHistory {
    location: RefCell<String>,
    pushes: RefCell<Vec<String>>,
    pop_handler: RefCell<Option<PopHandler>>,
}

impl MockHistory {
    /// Creates a history sitting at `/`.
    pub fn new() -> Self {
        Self::with_location("/")
    }

    /// Creates a history sitting at `path`.
    pub fn with_location(path: &str) -> Self {
        Self {
            location: RefCell::new(path.to_owned()),
            pushes: RefCell::new(Vec::new()),
            pop_handler: RefCell::new(None),
        }
    }

    /// Shared history sitting at `path`.
    pub fn at(path: &str) -> Rc<Self> {
        Rc::new(Self::with_location(path))
    }

    /// Every path pushed so far, oldest first.
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }

    /// Number of entries pushed so far.
    pub fn push_count(&self) -> usize {
        self.pushes.borrow().len()
    }

    /// Whether a pop handler has been registered.
    pub fn has_pop_handler(&self) -> bool {
        self.pop_handler.borrow().is_some()
    }

    /// Simulates back/forward: moves the location to `path` and invokes the
    /// registered pop handler, if any.
    pub fn pop_to(&self, path: &str) {
        *self.location.borrow_mut() = path.to_owned();
        let handler = self.pop_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(path);
        }
    }
}

impl Default for MockHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MockHistory {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn push(&self, path: &str) {
        *self.location.borrow_mut() = path.to_owned();
        self.pushes.borrow_mut().push(path.to_owned());
    }

    fn on_pop(&self, handler: PopHandler) {
        *self.pop_handler.borrow_mut() = Some(handler);
    }
}

// ============================================================================
// Recording Navigator
// ============================================================================

/// A [`Navigator`] that records every requested path and always succeeds.
#[derive(Default)]
pub struct RecordingNavigator {
    paths: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a navigator behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Every path requested so far, oldest first.
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn route_to(&self, path: &str) -> Result<(), EngineError> {
        self.paths.borrow_mut().push(path.to_owned());
        Ok(())
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// Records every event delivered to it.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// bus.subscribe(topic::LOGGED_IN, recorder.handler());
/// // ... exercise ...
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingHandler {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingHandler {
    /// Creates a handler with an empty record.
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The bus-facing closure. Every clone feeds the same record.
    pub fn handler(&self) -> EventHandler {
        let events = self.events.clone();
        Rc::new(move |event: &Event| events.borrow_mut().push(event.clone()))
    }

    /// Every recorded event, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Number of deliveries so far.
    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    /// The most recent delivery, if any.
    pub fn last(&self) -> Option<Event> {
        self.events.borrow().last().cloned()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHandler {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

// ============================================================================
// Recording Controllers
// ============================================================================

/// One recorded [`UserController`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserCall {
    /// `login` was called.
    Login {
        /// Submitted login.
        login: String,
        /// Submitted password.
        password: String,
    },
    /// `sign_up` was called.
    SignUp {
        /// Submitted login.
        login: String,
        /// Submitted email.
        email: String,
        /// Submitted password.
        password: String,
        /// Submitted repeat password.
        repeat: String,
    },
    /// `fetch_user` was called.
    FetchUser,
    /// `update_profile` was called.
    UpdateProfile {
        /// Submitted login.
        login: String,
        /// Submitted password.
        password: String,
        /// Submitted repeat password.
        repeat: String,
    },
    /// `upload_avatar` was called.
    UploadAvatar {
        /// Submitted avatar.
        avatar: String,
    },
    /// `logout` was called.
    Logout,
}

/// A [`UserController`] that records calls instead of doing work.
#[derive(Default)]
pub struct RecordingUserController {
    calls: RefCell<Vec<UserCall>>,
}

impl RecordingUserController {
    /// Creates a controller with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<UserCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl UserController for RecordingUserController {
    fn login(&self, login: &str, password: &str) {
        self.calls.borrow_mut().push(UserCall::Login {
            login: login.to_owned(),
            password: password.to_owned(),
        });
    }

    fn sign_up(&self, login: &str, email: &str, password: &str, repeat: &str) {
        self.calls.borrow_mut().push(UserCall::SignUp {
            login: login.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            repeat: repeat.to_owned(),
        });
    }

    fn fetch_user(&self) {
        self.calls.borrow_mut().push(UserCall::FetchUser);
    }

    fn update_profile(&self, login: &str, password: &str, repeat: &str) {
        self.calls.borrow_mut().push(UserCall::UpdateProfile {
            login: login.to_owned(),
            password: password.to_owned(),
            repeat: repeat.to_owned(),
        });
    }

    fn upload_avatar(&self, avatar: &str) {
        self.calls.borrow_mut().push(UserCall::UploadAvatar {
            avatar: avatar.to_owned(),
        });
    }

    fn logout(&self) {
        self.calls.borrow_mut().push(UserCall::Logout);
    }
}

/// A [`LeaderboardController`] that records requested pages.
#[derive(Default)]
pub struct RecordingBoardController {
    pages: RefCell<Vec<u32>>,
}

impl RecordingBoardController {
    /// Creates a controller with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller behind a shared handle.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Every requested page, oldest first.
    pub fn pages(&self) -> Vec<u32> {
        self.pages.borrow().clone()
    }
}

impl LeaderboardController for RecordingBoardController {
    fn fetch_page(&self, page: u32) {
        self.pages.borrow_mut().push(page);
    }
}

// ============================================================================
// Failing View
// ============================================================================

/// A view whose `init` always fails, as if its template were missing.
///
/// Deinit calls are counted so tests can assert the failure cleanup ran.
pub struct FailingView {
    missing_template: String,
    deinits: Cell<usize>,
}

impl FailingView {
    /// Creates a view that will fail to find `missing_template`.
    pub fn new(missing_template: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            missing_template: missing_template.into(),
            deinits: Cell::new(0),
        })
    }

    /// Number of times `deinit` ran.
    pub fn deinit_count(&self) -> usize {
        self.deinits.get()
    }
}

impl View for FailingView {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        Err(ViewError::Template(TemplateError::Unknown(
            self.missing_template.clone(),
        )))
    }

    fn deinit(&self) {
        self.deinits.set(self.deinits.get() + 1);
    }
}

// ============================================================================
// Input Builders
// ============================================================================

/// An unmodified click on an internal anchor opted in to routing at `path`.
pub fn anchor_click(path: &str) -> InputEvent {
    InputEvent::click(
        Some(Anchor {
            href: Some(path.to_owned()),
            route: Some(String::new()),
            external: false,
        }),
        ClickModifiers::empty(),
    )
}

/// A form submission carrying the given `(name, value)` pairs.
pub fn form_submit<'a, I>(pairs: I) -> InputEvent
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    InputEvent::submit(FormData::from_pairs(pairs))
}
