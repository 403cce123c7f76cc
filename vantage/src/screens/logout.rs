//! Sign-out screen.

use crate::app::paths;
use crate::screens::{ScreenDeps, redirect, render_handler};
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, NavigatorRef, UserControllerRef, View, ViewError, ViewFactory, ViewRef,
    topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// Transitional screen with no markup of its own.
///
/// Activation requests the sign-out; the `logged-out` success sends the
/// user home. Until then the element simply stays blank.
pub struct LogoutScreen {
    scope: ViewScope,
    nav: NavigatorRef,
    users: UserControllerRef,
}

impl LogoutScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, nav: NavigatorRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            nav,
            users: deps.users,
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, nav, deps| {
            Ok(LogoutScreen::new(root, nav, deps) as ViewRef)
        })
    }
}

impl View for LogoutScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        self.scope
            .subscribe(topic::LOGGED_OUT, render_handler(&self));
        self.users.logout();
        Ok(())
    }

    fn render(&self, event: &Event) {
        if !self.scope.is_live() || event.topic != topic::LOGGED_OUT {
            return;
        }
        if event.value.is_success() {
            redirect(&self.nav, paths::MENU);
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
