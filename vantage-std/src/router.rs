//! Path-to-view routing with lifecycle guarantees.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use vantage_core::{
    ElementRef, EngineError, HistoryRef, Navigator, NavigatorRef, RouteError, ViewFactory, ViewRef,
};

struct ActiveRoute {
    path: String,
    view: ViewRef,
    generation: u64,
}

/// Maps paths to view factories and keeps exactly one view active.
///
/// Every activation follows the same sequence: the previous view is fully
/// deinitialized, the new view is constructed by its factory, installed as
/// active, then initialized. Installing before `init` is what makes the
/// router reentrant: a view that navigates away during its own `init` or
/// from an event handler supersedes the in-flight activation instead of
/// corrupting it. Each navigation takes a generation number; when a nested
/// navigation bumps it, the superseded one skips its history push and
/// leaves the slot to the winner.
///
/// Unknown paths fall back to the default route, and it is the resolved
/// path that gets recorded and pushed. Programmatic navigation pushes a
/// history entry; activations driven by [`init`](Self::init) or by a
/// back/forward pop do not, the entry already exists.
pub struct Router {
    root: ElementRef,
    history: HistoryRef,
    routes: RefCell<HashMap<String, ViewFactory>>,
    default_path: RefCell<Option<String>>,
    active: RefCell<Option<ActiveRoute>>,
    generation: Cell<u64>,
    started: Cell<bool>,
    self_weak: Weak<Router>,
}

impl Router {
    /// Creates a router serving views into `root`.
    pub fn new(root: ElementRef, history: HistoryRef) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            root,
            history,
            routes: RefCell::new(HashMap::new()),
            default_path: RefCell::new(None),
            active: RefCell::new(None),
            generation: Cell::new(0),
            started: Cell::new(false),
            self_weak: weak.clone(),
        })
    }

    /// Registers a factory for `path`.
    ///
    /// Fails on a duplicate path and once the router is initialized; the
    /// table is append-only and frozen at startup.
    pub fn add_route(&self, path: &str, factory: ViewFactory) -> Result<(), RouteError> {
        if self.started.get() {
            return Err(RouteError::Frozen);
        }
        let mut routes = self.routes.borrow_mut();
        if routes.contains_key(path) {
            return Err(RouteError::Duplicate(path.to_owned()));
        }
        routes.insert(path.to_owned(), factory);
        Ok(())
    }

    /// Declares the fallback path for unknown locations.
    ///
    /// The path need not be registered yet; it is checked when a fallback
    /// actually resolves.
    pub fn set_default_route(&self, path: &str) -> Result<(), RouteError> {
        if self.started.get() {
            return Err(RouteError::Frozen);
        }
        *self.default_path.borrow_mut() = Some(path.to_owned());
        Ok(())
    }

    /// Starts serving: hooks back/forward navigation and activates the view
    /// for the current location, without pushing (the entry already exists).
    pub fn init(&self) -> Result<(), EngineError> {
        if self.started.replace(true) {
            return Err(RouteError::AlreadyInitialized.into());
        }
        let weak = self.self_weak.clone();
        self.history.on_pop(Rc::new(move |path: &str| {
            if let Some(router) = weak.upgrade() {
                // Pop activation cannot propagate; a failure leaves the
                // previous view retired and the slot empty.
                if let Err(_err) = router.navigate(path, false) {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %_err, path, "pop navigation failed");
                }
            }
        }));
        let start = self.history.location();
        self.navigate(&start, false)
    }

    /// Navigates programmatically, pushing a history entry for the resolved
    /// path.
    pub fn route_to(&self, path: &str) -> Result<(), EngineError> {
        self.navigate(path, true)
    }

    /// A weak navigation handle for views and interceptors.
    ///
    /// The handle never keeps the router alive; calls after the router is
    /// dropped fail with [`RouteError::RouterGone`].
    pub fn navigator(&self) -> NavigatorRef {
        Rc::new(RouterNavigator {
            router: self.self_weak.clone(),
        })
    }

    /// Path of the active view, if any.
    pub fn active_path(&self) -> Option<String> {
        self.active.borrow().as_ref().map(|a| a.path.clone())
    }

    fn resolve(&self, path: &str) -> Result<(String, ViewFactory), RouteError> {
        let routes = self.routes.borrow();
        if let Some(factory) = routes.get(path) {
            return Ok((path.to_owned(), factory.clone()));
        }
        match self.default_path.borrow().as_deref() {
            None => Err(RouteError::NoRoute(path.to_owned())),
            Some(default) => match routes.get(default) {
                Some(factory) => Ok((default.to_owned(), factory.clone())),
                None => Err(RouteError::DefaultUnregistered(default.to_owned())),
            },
        }
    }

    fn navigate(&self, path: &str, push: bool) -> Result<(), EngineError> {
        let (resolved, factory) = self.resolve(path)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path, resolved = resolved.as_str(), push, "navigating");

        // This navigation owns `generation` until a nested one bumps it.
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        // Retire the previous view with the slot borrow already released;
        // deinit may publish and touch elements.
        let previous = self.active.borrow_mut().take();
        if let Some(previous) = previous {
            previous.view.deinit();
        }

        let view = factory(self.root.clone(), self.navigator())?;

        // Install before init so a reentrant navigation started inside
        // init finds a retirable view in the slot, not a stale one.
        *self.active.borrow_mut() = Some(ActiveRoute {
            path: resolved.clone(),
            view: view.clone(),
            generation,
        });

        if let Err(err) = view.clone().init() {
            view.deinit();
            let mut active = self.active.borrow_mut();
            if active.as_ref().is_some_and(|a| a.generation == generation) {
                *active = None;
            }
            return Err(err.into());
        }

        if self.generation.get() != generation {
            // Superseded by a nested navigation, which settled the slot
            // and the history entry itself.
            return Ok(());
        }

        if push {
            self.history.push(&resolved);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("active_path", &self.active_path())
            .field("default_path", &self.default_path.borrow())
            .field("started", &self.started.get())
            .finish_non_exhaustive()
    }
}

impl Drop for Router {
    fn drop(&mut self) {
        // Release the last view's subscriptions and listeners.
        if let Some(active) = self.active.borrow_mut().take() {
            active.view.deinit();
        }
    }
}

struct RouterNavigator {
    router: Weak<Router>,
}

impl Navigator for RouterNavigator {
    fn route_to(&self, path: &str) -> Result<(), EngineError> {
        match self.router.upgrade() {
            Some(router) => router.route_to(path),
            None => Err(RouteError::RouterGone.into()),
        }
    }
}

/// Builder assembling a route table before the router exists.
///
/// Registration errors surface at [`build`](Self::build) time.
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<(String, ViewFactory)>,
    default_path: Option<String>,
}

impl RouterBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path-to-factory binding.
    pub fn route(mut self, path: impl Into<String>, factory: ViewFactory) -> Self {
        self.routes.push((path.into(), factory));
        self
    }

    /// Declares the fallback path.
    pub fn default_route(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Builds the router over `root` and `history`.
    pub fn build(self, root: ElementRef, history: HistoryRef) -> Result<Rc<Router>, RouteError> {
        let router = Router::new(root, history);
        for (path, factory) in self.routes {
            router.add_route(&path, factory)?;
        }
        if let Some(path) = self.default_path {
            router.set_default_route(&path)?;
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockElement, MockHistory};
    use std::cell::RefCell;
    use vantage_core::{View, ViewError};

    struct ProbeView {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        root: ElementRef,
        live: Cell<bool>,
    }

    impl ProbeView {
        fn log(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl View for ProbeView {
        fn init(self: Rc<Self>) -> Result<(), ViewError> {
            self.log("init");
            self.live.set(true);
            self.root.set_html(self.name);
            Ok(())
        }

        fn deinit(&self) {
            if !self.live.replace(false) {
                return;
            }
            self.log("deinit");
            self.root.set_html("");
        }
    }

    fn probe(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> ViewFactory {
        let log = log.clone();
        Rc::new(move |root, _nav| {
            Ok(Rc::new(ProbeView {
                name,
                log: log.clone(),
                root,
                live: Cell::new(false),
            }) as ViewRef)
        })
    }

    fn failing_factory(message: &'static str) -> ViewFactory {
        Rc::new(move |_root, _nav| Err(ViewError::Construction(message.to_owned())))
    }

    fn fixture() -> (Rc<MockElement>, Rc<MockHistory>, Rc<RefCell<Vec<String>>>) {
        (
            MockElement::shared(),
            MockHistory::at("/"),
            Rc::new(RefCell::new(Vec::new())),
        )
    }

    #[test]
    fn deinit_runs_before_the_next_init() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/a", probe("a", &log)).unwrap();
        router.add_route("/b", probe("b", &log)).unwrap();

        router.route_to("/a").unwrap();
        router.route_to("/b").unwrap();
        assert_eq!(*log.borrow(), ["a:init", "a:deinit", "b:init"]);
    }

    #[test]
    fn unknown_path_falls_back_to_the_default_route() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history.clone());
        router.add_route("/menu", probe("menu", &log)).unwrap();
        router.set_default_route("/menu").unwrap();

        router.route_to("/no-such-page").unwrap();
        assert_eq!(router.active_path().as_deref(), Some("/menu"));
        // The resolved path is what lands in history.
        assert_eq!(history.pushes(), ["/menu"]);
    }

    #[test]
    fn unknown_path_without_a_default_is_an_error() {
        let (root, history, _log) = fixture();
        let router = Router::new(root, history);
        let err = router.route_to("/nowhere").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Route(RouteError::NoRoute(path)) if path == "/nowhere"
        ));
    }

    #[test]
    fn default_route_must_itself_be_registered() {
        let (root, history, _log) = fixture();
        let router = Router::new(root, history);
        router.set_default_route("/ghost").unwrap();
        let err = router.route_to("/nowhere").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Route(RouteError::DefaultUnregistered(path)) if path == "/ghost"
        ));
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/a", probe("a", &log)).unwrap();
        let err = router.add_route("/a", probe("a2", &log)).unwrap_err();
        assert!(matches!(err, RouteError::Duplicate(path) if path == "/a"));
    }

    #[test]
    fn the_table_freezes_at_init() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/", probe("home", &log)).unwrap();
        router.init().unwrap();

        assert!(matches!(
            router.add_route("/late", probe("late", &log)),
            Err(RouteError::Frozen)
        ));
        assert!(matches!(
            router.set_default_route("/late"),
            Err(RouteError::Frozen)
        ));
    }

    #[test]
    fn init_is_single_shot() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/", probe("home", &log)).unwrap();
        router.init().unwrap();
        assert!(matches!(
            router.init(),
            Err(EngineError::Route(RouteError::AlreadyInitialized))
        ));
    }

    #[test]
    fn init_and_pop_activate_without_pushing() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history.clone());
        router.add_route("/", probe("home", &log)).unwrap();
        router.add_route("/about", probe("about", &log)).unwrap();

        router.init().unwrap();
        assert!(history.pushes().is_empty());

        router.route_to("/about").unwrap();
        assert_eq!(history.pushes(), ["/about"]);

        history.pop_to("/");
        assert_eq!(history.pushes(), ["/about"]);
        assert_eq!(router.active_path().as_deref(), Some("/"));
        assert_eq!(
            *log.borrow(),
            ["home:init", "home:deinit", "about:init", "about:deinit", "home:init"]
        );
    }

    #[test]
    fn nested_navigation_supersedes_and_pushes_once() {
        struct RedirectView {
            log: Rc<RefCell<Vec<String>>>,
            nav: NavigatorRef,
            live: Cell<bool>,
        }

        impl View for RedirectView {
            fn init(self: Rc<Self>) -> Result<(), ViewError> {
                self.log.borrow_mut().push("redirect:init".to_owned());
                self.live.set(true);
                self.nav.route_to("/menu").expect("menu is registered");
                Ok(())
            }

            fn deinit(&self) {
                if self.live.replace(false) {
                    self.log.borrow_mut().push("redirect:deinit".to_owned());
                }
            }
        }

        let (root, history, log) = fixture();
        let router = Router::new(root, history.clone());
        let redirect = {
            let log = log.clone();
            Rc::new(move |_root: ElementRef, nav: NavigatorRef| {
                Ok(Rc::new(RedirectView {
                    log: log.clone(),
                    nav,
                    live: Cell::new(false),
                }) as ViewRef)
            })
        };
        router.add_route("/login", redirect).unwrap();
        router.add_route("/menu", probe("menu", &log)).unwrap();

        router.route_to("/login").unwrap();
        assert_eq!(router.active_path().as_deref(), Some("/menu"));
        // The superseded outer navigation must not add a second entry.
        assert_eq!(history.pushes(), ["/menu"]);
        assert_eq!(
            *log.borrow(),
            ["redirect:init", "redirect:deinit", "menu:init"]
        );
    }

    #[test]
    fn failed_construction_leaves_the_slot_empty() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history.clone());
        router.add_route("/ok", probe("ok", &log)).unwrap();
        router.add_route("/broken", failing_factory("boom")).unwrap();

        router.route_to("/ok").unwrap();
        let err = router.route_to("/broken").unwrap_err();
        assert!(matches!(err, EngineError::View(ViewError::Construction(_))));
        // The previous view is retired and nothing replaced it.
        assert_eq!(router.active_path(), None);
        assert_eq!(history.pushes(), ["/ok"]);
        assert_eq!(*log.borrow(), ["ok:init", "ok:deinit"]);
    }

    #[test]
    fn navigator_reports_a_dropped_router() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/", probe("home", &log)).unwrap();
        let nav = router.navigator();

        nav.route_to("/").unwrap();
        drop(router);
        assert!(matches!(
            nav.route_to("/"),
            Err(EngineError::Route(RouteError::RouterGone))
        ));
    }

    #[test]
    fn dropping_the_router_retires_the_active_view() {
        let (root, history, log) = fixture();
        let router = Router::new(root, history);
        router.add_route("/", probe("home", &log)).unwrap();
        router.route_to("/").unwrap();

        drop(router);
        assert_eq!(*log.borrow(), ["home:init", "home:deinit"]);
    }

    #[test]
    fn builder_assembles_the_same_table() {
        let (root, history, log) = fixture();
        let router = RouterBuilder::new()
            .route("/menu", probe("menu", &log))
            .route("/about", probe("about", &log))
            .default_route("/menu")
            .build(root, history)
            .unwrap();

        router.route_to("/missing").unwrap();
        assert_eq!(router.active_path().as_deref(), Some("/menu"));
    }

    #[test]
    fn builder_rejects_duplicates() {
        let (root, history, log) = fixture();
        let err = RouterBuilder::new()
            .route("/a", probe("a", &log))
            .route("/a", probe("a2", &log))
            .build(root, history)
            .unwrap_err();
        assert!(matches!(err, RouteError::Duplicate(path) if path == "/a"));
    }
}
