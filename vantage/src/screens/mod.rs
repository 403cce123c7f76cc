//! The application's screens.
//!
//! Each screen is a [`View`] over the shared root element. Screens follow
//! one shape: construction stores collaborators and acquires nothing, `init`
//! paints and registers through a [`ViewScope`], bus events arrive at
//! `render`, `deinit` delegates to the scope's teardown. Callbacks hold the
//! screen weakly, so a retired screen is also a collectable one.
//!
//! [`ViewScope`]: vantage_std::scope::ViewScope

use crate::session::Session;
use std::rc::Rc;
use vantage_core::{
    BusRef, Event, EventHandler, LeaderboardControllerRef, NavigatorRef, TemplateRef,
    UserControllerRef, View,
};

mod about;
mod leaderboard;
mod login;
mod logout;
mod menu;
mod profile;
mod settings;
mod signup;

pub use about::AboutScreen;
pub use leaderboard::LeaderboardScreen;
pub use login::LoginScreen;
pub use logout::LogoutScreen;
pub use menu::MenuScreen;
pub use profile::ProfileScreen;
pub use settings::SettingsScreen;
pub use signup::SignupScreen;

/// Template names the screens render by.
pub mod templates {
    /// Main menu markup.
    pub const MENU: &str = "menu";
    /// Sign-in form.
    pub const LOGIN: &str = "login";
    /// Registration form.
    pub const SIGNUP: &str = "signup";
    /// Profile card.
    pub const PROFILE: &str = "profile";
    /// Profile settings form.
    pub const SETTINGS: &str = "settings";
    /// Score table with pagination.
    pub const LEADERBOARD: &str = "leaderboard";
    /// Static about page.
    pub const ABOUT: &str = "about";
}

/// Collaborators every screen factory binds at registration time.
#[derive(Clone)]
pub struct ScreenDeps {
    /// Event bus the screens subscribe on.
    pub bus: BusRef,
    /// Template engine behind every paint.
    pub templates: TemplateRef,
    /// Account and profile operations.
    pub users: UserControllerRef,
    /// Score table operations.
    pub boards: LeaderboardControllerRef,
    /// Signed-in user state.
    pub session: Rc<Session>,
}

/// Bus handler that forwards deliveries to `view.render`, holding the view
/// weakly. Once the view is dropped the handler degrades to a no-op.
pub(crate) fn render_handler<V: View + 'static>(view: &Rc<V>) -> EventHandler {
    let weak = Rc::downgrade(view);
    Rc::new(move |event: &Event| {
        if let Some(view) = weak.upgrade() {
            view.render(event);
        }
    })
}

/// Navigates, logging instead of propagating; render paths have no caller
/// to hand an error to.
pub(crate) fn redirect(nav: &NavigatorRef, path: &str) {
    if let Err(_err) = nav.route_to(path) {
        #[cfg(feature = "tracing")]
        tracing::error!(error = %_err, path, "redirect failed");
    }
}
