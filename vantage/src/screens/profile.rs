//! Profile card screen.

use crate::app::paths;
use crate::screens::{ScreenDeps, redirect, render_handler, templates};
use crate::session::User;
use serde_json::json;
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, NavigatorRef, Payload, TemplateRef, UserControllerRef, View, ViewError,
    ViewFactory, ViewRef, topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// Read-only card for the signed-in user.
///
/// Paints an empty card, requests the user, and fills the card when
/// `user-loaded` carries a profile. An anonymous visitor is sent back to
/// the menu.
pub struct ProfileScreen {
    scope: ViewScope,
    nav: NavigatorRef,
    templates: TemplateRef,
    users: UserControllerRef,
}

impl ProfileScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, nav: NavigatorRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            nav,
            templates: deps.templates,
            users: deps.users,
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, nav, deps| {
            Ok(ProfileScreen::new(root, nav, deps) as ViewRef)
        })
    }

    fn paint(&self, user: Option<&User>) -> Result<(), ViewError> {
        let context = match user {
            Some(user) => json!({
                "login": user.login,
                "email": user.email,
                "avatar_path": user.avatar_or_default(),
                "score": user.score,
            }),
            None => json!({}),
        };
        let html = self.templates.render(templates::PROFILE, &context)?;
        self.scope.root().set_html(&html);
        Ok(())
    }
}

impl View for ProfileScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        self.paint(None)?;
        self.scope
            .subscribe(topic::USER_LOADED, render_handler(&self));
        self.users.fetch_user();
        Ok(())
    }

    fn render(&self, event: &Event) {
        if !self.scope.is_live() || event.topic != topic::USER_LOADED {
            return;
        }
        match &event.value {
            Payload::Data(value) => match User::from_value(value) {
                Some(user) => {
                    if let Err(_err) = self.paint(Some(&user)) {
                        #[cfg(feature = "tracing")]
                        tracing::error!(error = %_err, "profile repaint failed");
                    }
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("user payload did not parse, keeping the skeleton");
                }
            },
            // Nobody is signed in; the profile has nothing to show.
            _ => redirect(&self.nav, paths::MENU),
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
