//! Main menu screen.

use crate::screens::{ScreenDeps, render_handler, templates};
use serde_json::{Value, json};
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, NavigatorRef, Payload, TemplateRef, UserControllerRef, View, ViewError,
    ViewFactory, ViewRef, topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// The landing screen: navigation anchors, with the entries depending on
/// whether somebody is signed in.
///
/// Paints a skeleton immediately, requests the current user, and repaints
/// when `user-loaded` arrives.
pub struct MenuScreen {
    scope: ViewScope,
    templates: TemplateRef,
    users: UserControllerRef,
}

impl MenuScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            templates: deps.templates,
            users: deps.users,
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, _nav: NavigatorRef, deps| {
            Ok(MenuScreen::new(root, deps) as ViewRef)
        })
    }

    fn paint(&self, authorized: Value) -> Result<(), ViewError> {
        let html = self
            .templates
            .render(templates::MENU, &json!({ "is_authorized": authorized }))?;
        self.scope.root().set_html(&html);
        Ok(())
    }
}

impl View for MenuScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        // Skeleton first; the authorized entries appear once the user loads.
        self.paint(Value::Null)?;
        self.scope
            .subscribe(topic::USER_LOADED, render_handler(&self));
        self.users.fetch_user();
        Ok(())
    }

    fn render(&self, event: &Event) {
        if !self.scope.is_live() || event.topic != topic::USER_LOADED {
            return;
        }
        let authorized = Value::Bool(matches!(event.value, Payload::Data(_)));
        if let Err(_err) = self.paint(authorized) {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_err, "menu repaint failed");
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
