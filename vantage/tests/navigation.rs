use vantage::app::paths;
use vantage::{Event, topic};

mod common;
use common::{Harness, user_event};

#[test]
fn boot_lands_on_the_requested_screen() {
    let harness = Harness::boot(paths::ABOUT);

    assert_eq!(harness.active_path().as_deref(), Some(paths::ABOUT));
    assert!(harness.html().contains(r#"class="about""#));
    // The entry for the landing screen already exists.
    assert!(harness.pushes().is_empty());
}

#[test]
fn unknown_paths_fall_back_to_the_menu() {
    let harness = Harness::boot("/no-such-screen");

    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
    assert!(harness.html().contains(r#"class="menu""#));
    assert!(harness.pushes().is_empty());
}

#[test]
fn anchor_clicks_route_and_push() {
    let harness = Harness::boot(paths::MENU);

    harness.click(paths::ABOUT);

    assert_eq!(harness.active_path().as_deref(), Some(paths::ABOUT));
    assert!(harness.html().contains(r#"class="about""#));
    assert_eq!(harness.pushes(), [paths::ABOUT]);
}

#[test]
fn every_screen_is_reachable_by_anchor() {
    let harness = Harness::boot(paths::MENU);
    let stops = [
        (paths::LEADERBOARD, r#"class="leaderboard""#),
        (paths::ABOUT, r#"class="about""#),
        (paths::LOGIN, r#"class="login-form""#),
        (paths::SIGNUP, r#"class="signup-form""#),
        (paths::PROFILE, r#"class="profile""#),
        (paths::SETTINGS, r#"class="settings-form""#),
    ];

    for (path, marker) in stops {
        harness.click(path);
        assert_eq!(harness.active_path().as_deref(), Some(path));
        assert!(harness.html().contains(marker), "missing {marker}");
    }
}

#[test]
fn back_and_forward_route_without_pushing() {
    let harness = Harness::boot(paths::MENU);
    harness.click(paths::ABOUT);

    harness.history.pop_to(paths::MENU);

    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
    // Still only the original forward entry.
    assert_eq!(harness.pushes(), [paths::ABOUT]);
}

#[test]
fn popping_to_garbage_falls_back_without_pushing() {
    let harness = Harness::boot(paths::MENU);
    harness.click(paths::ABOUT);

    harness.history.pop_to("/mangled");

    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
    assert_eq!(harness.pushes(), [paths::ABOUT]);
}

#[test]
fn logging_out_lands_home_with_a_single_push() {
    let harness = Harness::boot_primed(paths::MENU, [user_event("ada")], []);
    assert!(harness.app.session().is_authorized());

    harness.users.enqueue(Event::success(topic::LOGGED_OUT));
    harness.click(paths::LOGOUT);

    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
    assert!(!harness.app.session().is_authorized());
    // The logout screen redirected mid-activation; only the final
    // destination lands in history.
    assert_eq!(harness.pushes(), [paths::MENU]);
    assert!(harness.html().contains("Sign in"));
}
