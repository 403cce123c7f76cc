//! Backend controller contracts.
//!
//! Controllers are fire-and-forget: every method returns `()` and reports
//! its outcome later by publishing on the event bus. Views therefore never
//! block on a controller call and never see a controller result directly.

use std::rc::Rc;

/// Account and profile operations.
pub trait UserController {
    /// Attempts to sign the user in.
    fn login(&self, login: &str, password: &str);

    /// Attempts to create an account.
    fn sign_up(&self, login: &str, email: &str, password: &str, repeat: &str);

    /// Requests the current user's profile.
    fn fetch_user(&self);

    /// Submits profile field changes.
    fn update_profile(&self, login: &str, password: &str, repeat: &str);

    /// Submits a new avatar.
    fn upload_avatar(&self, avatar: &str);

    /// Ends the session.
    fn logout(&self);
}

/// Shared handle to a user controller.
pub type UserControllerRef = Rc<dyn UserController>;

/// Score table operations.
pub trait LeaderboardController {
    /// Requests one page of the score table.
    fn fetch_page(&self, page: u32);
}

/// Shared handle to a leaderboard controller.
pub type LeaderboardControllerRef = Rc<dyn LeaderboardController>;
