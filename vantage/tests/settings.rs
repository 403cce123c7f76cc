use vantage::app::paths;
use vantage::testing::UserCall;
use vantage::{Event, topic};

mod common;
use common::{Harness, user_event};

/// Arrives the way a user does: land home, let the user load, open the
/// settings from the menu.
fn settings_harness() -> Harness {
    let harness = Harness::boot_primed(paths::MENU, [user_event("ada")], []);
    harness.click(paths::SETTINGS);
    harness
}

#[test]
fn the_form_is_prefilled_with_the_current_login() {
    let harness = settings_harness();

    assert_eq!(harness.active_path().as_deref(), Some(paths::SETTINGS));
    assert!(harness.html().contains(r#"value="ada""#));
}

#[test]
fn profile_and_avatar_successes_both_land_home() {
    let harness = settings_harness();
    harness.users.enqueue(Event::success(topic::PROFILE_UPDATED));
    harness.users.enqueue(Event::success(topic::AVATAR_UPDATED));

    harness.submit(&[
        ("login", "lovelace"),
        ("password", "pw"),
        ("repeat_password", "pw"),
        ("avatar", "/tmp/ada.png"),
    ]);

    let calls = harness.users.calls();
    assert!(calls.contains(&UserCall::UpdateProfile {
        login: "lovelace".to_owned(),
        password: "pw".to_owned(),
        repeat: "pw".to_owned(),
    }));
    assert!(calls.contains(&UserCall::UploadAvatar {
        avatar: "/tmp/ada.png".to_owned(),
    }));
    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
    assert_eq!(harness.pushes(), [paths::SETTINGS, paths::MENU]);
}

#[test]
fn skipping_the_avatar_needs_only_the_profile_success() {
    let harness = settings_harness();
    harness.users.enqueue(Event::success(topic::PROFILE_UPDATED));

    harness.submit(&[
        ("login", "lovelace"),
        ("password", "pw"),
        ("repeat_password", "pw"),
        ("avatar", ""),
    ]);

    let calls = harness.users.calls();
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, UserCall::UploadAvatar { .. }))
    );
    assert_eq!(harness.active_path().as_deref(), Some(paths::MENU));
}

#[test]
fn an_unchanged_login_is_submitted_as_empty() {
    let harness = settings_harness();

    harness.submit(&[
        ("login", "ada"),
        ("password", "pw"),
        ("repeat_password", "pw"),
        ("avatar", ""),
    ]);

    assert!(harness.users.calls().contains(&UserCall::UpdateProfile {
        login: String::new(),
        password: "pw".to_owned(),
        repeat: "pw".to_owned(),
    }));
    // No success arrived yet, so the screen is still waiting in place.
    assert_eq!(harness.active_path().as_deref(), Some(paths::SETTINGS));
}

#[test]
fn a_failure_shows_the_message_and_stays() {
    let harness = settings_harness();
    harness.users.enqueue(Event::failure(
        topic::PROFILE_UPDATED,
        "login",
        "login is taken",
    ));
    harness.users.enqueue(Event::success(topic::AVATAR_UPDATED));

    harness.submit(&[
        ("login", "lovelace"),
        ("password", "pw"),
        ("repeat_password", "pw"),
        ("avatar", "/tmp/ada.png"),
    ]);

    // The avatar half succeeded afterwards, but the submission was
    // already abandoned; the error stays on screen.
    assert_eq!(harness.active_path().as_deref(), Some(paths::SETTINGS));
    assert_eq!(harness.pushes(), [paths::SETTINGS]);
    let html = harness.html();
    assert!(html.contains(r#"data-field="login""#));
    assert!(html.contains("login is taken"));
}
