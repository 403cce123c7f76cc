//! Application preset: route table, embedded templates, bootstrap wiring.

use crate::screens::{
    AboutScreen, LeaderboardScreen, LoginScreen, LogoutScreen, MenuScreen, ProfileScreen,
    ScreenDeps, SettingsScreen, SignupScreen, templates,
};
use crate::session::Session;
use std::rc::Rc;
use vantage_core::{
    BusRef, Document, ElementRef, EngineError, Event, HistoryRef, LeaderboardControllerRef,
    NavigatorRef, RouteError, Subscription, TemplateError, TemplateRef, UserControllerRef, topic,
};
use vantage_std::intercept::AnchorInterceptor;
use vantage_std::router::{Router, RouterBuilder};
use vantage_std::template::HandlebarsEngine;

/// Paths the application serves.
pub mod paths {
    /// Main menu, also the fallback for unknown paths.
    pub const MENU: &str = "/";
    /// Sign-in form.
    pub const LOGIN: &str = "/login";
    /// Profile card.
    pub const PROFILE: &str = "/profile";
    /// Profile settings form.
    pub const SETTINGS: &str = "/settings";
    /// Registration form.
    pub const SIGNUP: &str = "/signup";
    /// Score table.
    pub const LEADERBOARD: &str = "/leaderboard";
    /// About page.
    pub const ABOUT: &str = "/about";
    /// Sign-out.
    pub const LOGOUT: &str = "/logout";
}

/// Id of the document element the application renders into.
pub const ROOT_ELEMENT_ID: &str = "root";

/// Compiles the embedded screen templates into a fresh engine.
pub fn default_templates() -> Result<TemplateRef, TemplateError> {
    let engine = HandlebarsEngine::shared();
    engine.register_all([
        (templates::MENU, include_str!("../templates/menu.hbs")),
        (templates::LOGIN, include_str!("../templates/login.hbs")),
        (templates::SIGNUP, include_str!("../templates/signup.hbs")),
        (templates::PROFILE, include_str!("../templates/profile.hbs")),
        (
            templates::SETTINGS,
            include_str!("../templates/settings.hbs"),
        ),
        (
            templates::LEADERBOARD,
            include_str!("../templates/leaderboard.hbs"),
        ),
        (templates::ABOUT, include_str!("../templates/about.hbs")),
    ])?;
    Ok(engine.into_ref())
}

/// Builds the full route table over `root`, with the menu as the fallback.
pub fn install_routes(
    root: ElementRef,
    history: HistoryRef,
    deps: &ScreenDeps,
) -> Result<Rc<Router>, RouteError> {
    RouterBuilder::new()
        .route(paths::MENU, MenuScreen::factory(deps))
        .route(paths::LOGIN, LoginScreen::factory(deps))
        .route(paths::PROFILE, ProfileScreen::factory(deps))
        .route(paths::SETTINGS, SettingsScreen::factory(deps))
        .route(paths::SIGNUP, SignupScreen::factory(deps))
        .route(paths::LEADERBOARD, LeaderboardScreen::factory(deps))
        .route(paths::ABOUT, AboutScreen::factory(deps))
        .route(paths::LOGOUT, LogoutScreen::factory(deps))
        .default_route(paths::MENU)
        .build(root, history)
}

/// The running application.
///
/// Owns the router, the anchor interceptor, and the session. Dropping the
/// app retires the active view and releases everything it wired up.
pub struct App {
    router: Rc<Router>,
    session: Rc<Session>,
    bus: BusRef,
    session_subs: Vec<Subscription>,
    _interceptor: AnchorInterceptor,
}

impl App {
    /// Boots the application: finds the root element, compiles templates,
    /// attaches the session to the bus, installs and starts the router,
    /// hooks anchor interception, and warms the session with a user fetch.
    ///
    /// The bus and the controllers come from the embedder; controllers
    /// publish their results on that same bus.
    pub fn bootstrap(
        document: &dyn Document,
        history: HistoryRef,
        bus: BusRef,
        users: UserControllerRef,
        boards: LeaderboardControllerRef,
    ) -> Result<Self, EngineError> {
        let root = document
            .element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| EngineError::RootNotFound(ROOT_ELEMENT_ID.to_owned()))?;

        let session = Session::shared();
        let session_subs = attach_session(&bus, &session);

        let templates = default_templates()?;
        let deps = ScreenDeps {
            bus: bus.clone(),
            templates,
            users: users.clone(),
            boards,
            session: session.clone(),
        };

        let router = install_routes(root.clone(), history, &deps)?;
        router.init()?;
        let interceptor = AnchorInterceptor::install(root, router.navigator());

        // Warm the session even when the landing screen never asks.
        users.fetch_user();

        Ok(Self {
            router,
            session,
            bus,
            session_subs,
            _interceptor: interceptor,
        })
    }

    /// The router serving the application.
    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    /// Programmatic navigation handle.
    pub fn navigator(&self) -> NavigatorRef {
        self.router.navigator()
    }

    /// The signed-in user state.
    pub fn session(&self) -> &Rc<Session> {
        &self.session
    }

    /// The bus the application subscribes and publishes on.
    pub fn bus(&self) -> &BusRef {
        &self.bus
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("active_path", &self.router.active_path())
            .field("session_subs", &self.session_subs)
            .finish_non_exhaustive()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for sub in self.session_subs.drain(..) {
            self.bus.unsubscribe(sub);
        }
    }
}

fn attach_session(bus: &BusRef, session: &Rc<Session>) -> Vec<Subscription> {
    [topic::USER_LOADED, topic::LOGGED_OUT]
        .into_iter()
        .map(|name| {
            let session = session.clone();
            bus.subscribe(name, Rc::new(move |event: &Event| session.absorb(event)))
        })
        .collect()
}
