use serde_json::json;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use vantage::testing::{MockDocument, MockElement, MockHistory, UserCall, anchor_click, form_submit};
use vantage::{
    App, BusRef, Dispatcher, Element, Event, EventBus, LeaderboardController, UserController, app,
    topic,
};

// ============================================================================
// Scripted Controllers
// ============================================================================

/// A [`UserController`] that records calls and answers each one by
/// publishing the next event queued under the call's response topic.
///
/// Queues are keyed by topic, so a test can script a login failure and a
/// profile load without caring which lands first. A call with an empty
/// queue publishes nothing, which models a backend that never answered.
pub struct ScriptedUserController {
    bus: BusRef,
    calls: RefCell<Vec<UserCall>>,
    responses: RefCell<HashMap<String, VecDeque<Event>>>,
}

impl ScriptedUserController {
    pub fn new(bus: BusRef) -> Rc<Self> {
        Rc::new(Self {
            bus,
            calls: RefCell::new(Vec::new()),
            responses: RefCell::new(HashMap::new()),
        })
    }

    /// Queues `event` to answer the next call that reports on its topic.
    pub fn enqueue(&self, event: Event) {
        self.responses
            .borrow_mut()
            .entry(event.topic.clone())
            .or_default()
            .push_back(event);
    }

    pub fn calls(&self) -> Vec<UserCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn answer(&self, call: UserCall, topic: &str) {
        self.calls.borrow_mut().push(call);
        // Neither borrow may be held while publishing; handlers are free
        // to call straight back into this controller.
        let queued = self
            .responses
            .borrow_mut()
            .get_mut(topic)
            .and_then(VecDeque::pop_front);
        if let Some(event) = queued {
            self.bus.publish(&event);
        }
    }
}

impl UserController for ScriptedUserController {
    fn login(&self, login: &str, password: &str) {
        self.answer(
            UserCall::Login {
                login: login.to_owned(),
                password: password.to_owned(),
            },
            topic::LOGGED_IN,
        );
    }

    fn sign_up(&self, login: &str, email: &str, password: &str, repeat: &str) {
        self.answer(
            UserCall::SignUp {
                login: login.to_owned(),
                email: email.to_owned(),
                password: password.to_owned(),
                repeat: repeat.to_owned(),
            },
            topic::SIGNED_UP,
        );
    }

    fn fetch_user(&self) {
        self.answer(UserCall::FetchUser, topic::USER_LOADED);
    }

    fn update_profile(&self, login: &str, password: &str, repeat: &str) {
        self.answer(
            UserCall::UpdateProfile {
                login: login.to_owned(),
                password: password.to_owned(),
                repeat: repeat.to_owned(),
            },
            topic::PROFILE_UPDATED,
        );
    }

    fn upload_avatar(&self, avatar: &str) {
        self.answer(
            UserCall::UploadAvatar {
                avatar: avatar.to_owned(),
            },
            topic::AVATAR_UPDATED,
        );
    }

    fn logout(&self) {
        self.answer(UserCall::Logout, topic::LOGGED_OUT);
    }
}

/// A [`LeaderboardController`] that records requested pages and answers
/// each request with the next queued event, in order.
pub struct ScriptedBoardController {
    bus: BusRef,
    pages: RefCell<Vec<u32>>,
    responses: RefCell<VecDeque<Event>>,
}

impl ScriptedBoardController {
    pub fn new(bus: BusRef) -> Rc<Self> {
        Rc::new(Self {
            bus,
            pages: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
        })
    }

    pub fn enqueue(&self, event: Event) {
        self.responses.borrow_mut().push_back(event);
    }

    pub fn pages(&self) -> Vec<u32> {
        self.pages.borrow().clone()
    }
}

impl LeaderboardController for ScriptedBoardController {
    fn fetch_page(&self, page: u32) {
        self.pages.borrow_mut().push(page);
        let queued = self.responses.borrow_mut().pop_front();
        if let Some(event) = queued {
            self.bus.publish(&event);
        }
    }
}

// ============================================================================
// Event Builders
// ============================================================================

/// A loaded-user event for `login`.
pub fn user_event(login: &str) -> Event {
    Event::data(
        topic::USER_LOADED,
        json!({
            "login": login,
            "email": format!("{login}@example.com"),
            "name": login,
            "score": 42,
        }),
    )
}

/// A two-row leaderboard page sitting at `page` of `page_count`.
pub fn page_event(page: u64, page_count: u64) -> Event {
    Event::data(
        topic::LEADERBOARD_LOADED,
        json!({
            "users": [
                { "login": "ada", "score": 120 },
                { "login": "kit", "score": 90 },
            ],
            "current_page": page,
            "page_count": page_count,
        }),
    )
}

// ============================================================================
// Harness
// ============================================================================

/// A booted application over mock host capabilities.
///
/// `dispatcher` is the same bus the app runs on, kept concrete so tests
/// can count live handlers per topic.
pub struct Harness {
    pub app: App,
    pub bus: BusRef,
    pub dispatcher: Rc<Dispatcher>,
    pub root: Rc<MockElement>,
    pub history: Rc<MockHistory>,
    pub users: Rc<ScriptedUserController>,
    pub boards: Rc<ScriptedBoardController>,
}

impl Harness {
    /// Boots the application at `start` with nothing scripted.
    pub fn boot(start: &str) -> Self {
        Self::boot_primed(start, [], [])
    }

    /// Boots at `start` with responses queued before bootstrap, so calls
    /// made during boot (the session warm-up, a landing screen's own
    /// fetch) are answered synchronously.
    pub fn boot_primed(
        start: &str,
        user_events: impl IntoIterator<Item = Event>,
        board_events: impl IntoIterator<Item = Event>,
    ) -> Self {
        let dispatcher = Rc::new(Dispatcher::new());
        let bus: BusRef = dispatcher.clone();
        let (document, root) = MockDocument::with_element(app::ROOT_ELEMENT_ID);
        let history = MockHistory::at(start);
        let users = ScriptedUserController::new(bus.clone());
        let boards = ScriptedBoardController::new(bus.clone());
        for event in user_events {
            users.enqueue(event);
        }
        for event in board_events {
            boards.enqueue(event);
        }
        let app = App::bootstrap(
            document.as_ref(),
            history.clone(),
            bus.clone(),
            users.clone(),
            boards.clone(),
        )
        .expect("application boots");
        Self {
            app,
            bus,
            dispatcher,
            root,
            history,
            users,
            boards,
        }
    }

    /// Clicks a routed anchor pointing at `path`.
    pub fn click(&self, path: &str) {
        self.root.fire(&anchor_click(path));
    }

    /// Submits a form carrying the given `(name, value)` pairs.
    pub fn submit(&self, pairs: &[(&str, &str)]) {
        self.root.fire(&form_submit(pairs.iter().copied()));
    }

    /// Current markup of the root element.
    pub fn html(&self) -> String {
        self.root.html()
    }

    /// Paths pushed onto the history so far, oldest first.
    pub fn pushes(&self) -> Vec<String> {
        self.history.pushes()
    }

    /// Path of the view currently on screen.
    pub fn active_path(&self) -> Option<String> {
        self.app.router().active_path()
    }
}
