//! Registration screen.

use crate::app::paths;
use crate::screens::{ScreenDeps, redirect, render_handler, templates};
use serde_json::json;
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, FieldError, InputEvent, InputKind, NavigatorRef, Payload, TemplateRef,
    UserControllerRef, View, ViewError, ViewFactory, ViewRef, topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// The registration form. Mirrors the sign-in screen with a wider form and
/// the `signed-up` topic.
pub struct SignupScreen {
    scope: ViewScope,
    nav: NavigatorRef,
    templates: TemplateRef,
    users: UserControllerRef,
}

impl SignupScreen {
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
            Ok(SignupScreen::new(root, nav, deps) as ViewRef)
        })
    }

    fn paint(&self, error: Option<&FieldError>) -> Result<(), ViewError> {
        let context = match error {
            Some(fail) => json!({ "error": { "field": fail.field, "message": fail.message } }),
            None => json!({}),
        };
        let html = self.templates.render(templates::SIGNUP, &context)?;
        self.scope.root().set_html(&html);
        Ok(())
    }

    fn on_submit(&self, event: &InputEvent) {
        event.prevent_default();
        let Some(form) = event.form.as_ref() else {
            return;
        };
        self.users.sign_up(
            form.value("login"),
            form.value("email"),
            form.value("password"),
            form.value("repeat_password"),
        );
    }
}

impl View for SignupScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        self.paint(None)?;
        self.scope
            .subscribe(topic::SIGNED_UP, render_handler(&self));
        let weak = Rc::downgrade(&self);
        self.scope.listen(
            InputKind::Submit,
            Rc::new(move |event: &InputEvent| {
                if let Some(screen) = weak.upgrade() {
                    screen.on_submit(event);
                }
            }),
        );
        Ok(())
    }

    fn render(&self, event: &Event) {
        if !self.scope.is_live() || event.topic != topic::SIGNED_UP {
            return;
        }
        match &event.value {
            Payload::Success => redirect(&self.nav, paths::MENU),
            Payload::Failure(fail) => {
                if let Err(_err) = self.paint(Some(fail)) {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %_err, "signup repaint failed");
                }
            }
            _ => {}
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
