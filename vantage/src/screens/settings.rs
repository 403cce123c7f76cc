//! Profile settings screen.

use crate::app::paths;
use crate::screens::{ScreenDeps, redirect, render_handler, templates};
use crate::session::Session;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use vantage_core::{
    ElementRef, Event, FieldError, InputEvent, InputKind, NavigatorRef, Payload, TemplateRef,
    UserControllerRef, View, ViewError, ViewFactory, ViewRef, topic,
};
use vantage_std::factory::view_factory;
use vantage_std::scope::ViewScope;

/// What the screen is waiting on after a submit.
///
/// A submit without an avatar settles on one `profile-updated` success; a
/// submit with one needs `avatar-updated` too. Any failure abandons the
/// submission, so a late success from the other half cannot navigate away
/// from the error being shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Submission {
    Idle,
    Waiting { profile: bool, avatar: bool },
}

/// The profile settings form.
///
/// Field changes go to the user controller as a profile update, plus an
/// avatar upload when a file was chosen. The screen leaves for the menu
/// only once every part of the submission has succeeded.
pub struct SettingsScreen {
    scope: ViewScope,
    nav: NavigatorRef,
    templates: TemplateRef,
    users: UserControllerRef,
    session: Rc<Session>,
    pending: Cell<Submission>,
}

impl SettingsScreen {
    /// Builds the screen over `root`. Acquires nothing.
    pub fn new(root: ElementRef, nav: NavigatorRef, deps: ScreenDeps) -> Rc<Self> {
        Rc::new(Self {
            scope: ViewScope::new(root, deps.bus),
            nav,
            templates: deps.templates,
            users: deps.users,
            session: deps.session,
            pending: Cell::new(Submission::Idle),
        })
    }

    /// Factory for the route table.
    pub fn factory(deps: &ScreenDeps) -> ViewFactory {
        view_factory(deps.clone(), |root, nav, deps| {
            Ok(SettingsScreen::new(root, nav, deps) as ViewRef)
        })
    }

    fn paint(&self, error: Option<&FieldError>) -> Result<(), ViewError> {
        let login = self.session.user().map(|user| user.login).unwrap_or_default();
        let context = match error {
            Some(fail) => json!({
                "login": login,
                "error": { "field": fail.field, "message": fail.message },
            }),
            None => json!({ "login": login }),
        };
        let html = self.templates.render(templates::SETTINGS, &context)?;
        self.scope.root().set_html(&html);
        Ok(())
    }

    fn on_submit(&self, event: &InputEvent) {
        event.prevent_default();
        let Some(form) = event.form.as_ref() else {
            return;
        };

        // An unchanged login is submitted as empty so the backend does not
        // reject it as taken.
        let mut login = form.value("login");
        if let Some(user) = self.session.user()
            && login == user.login
        {
            login = "";
        }
        let avatar = form.value("avatar");

        self.pending.set(Submission::Waiting {
            profile: true,
            avatar: !avatar.is_empty(),
        });
        self.users.update_profile(
            login,
            form.value("password"),
            form.value("repeat_password"),
        );
        if !avatar.is_empty() {
            self.users.upload_avatar(avatar);
        }
    }

    fn settle(&self, event: &Event) {
        let Submission::Waiting {
            mut profile,
            mut avatar,
        } = self.pending.get()
        else {
            return;
        };
        match event.topic.as_str() {
            topic::PROFILE_UPDATED => profile = false,
            topic::AVATAR_UPDATED => avatar = false,
            _ => return,
        }
        if profile || avatar {
            self.pending.set(Submission::Waiting { profile, avatar });
        } else {
            self.pending.set(Submission::Idle);
            redirect(&self.nav, paths::MENU);
        }
    }
}

impl View for SettingsScreen {
    fn init(self: Rc<Self>) -> Result<(), ViewError> {
        self.scope.begin()?;
        self.paint(None)?;
        self.scope
            .subscribe(topic::PROFILE_UPDATED, render_handler(&self));
        self.scope
            .subscribe(topic::AVATAR_UPDATED, render_handler(&self));
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
        if !self.scope.is_live()
            || !matches!(
                event.topic.as_str(),
                topic::PROFILE_UPDATED | topic::AVATAR_UPDATED
            )
        {
            return;
        }
        match &event.value {
            Payload::Success => self.settle(event),
            Payload::Failure(fail) => {
                self.pending.set(Submission::Idle);
                if let Err(_err) = self.paint(Some(fail)) {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %_err, "settings repaint failed");
                }
            }
            _ => {}
        }
    }

    fn deinit(&self) {
        self.scope.teardown();
    }
}
