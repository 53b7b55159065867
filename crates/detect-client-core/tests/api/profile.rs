use crate::helpers::{spawn_app, StubFailure, StubUser};
use detect_client_core::controller::{Notification, UiState};
use detect_shared::const_config::{
    msg::{MSG_PROFILE_UPDATED, MSG_PROFILE_UPDATE_FAILED},
    path::{PATH_AUTH_USER_ME, PATH_AUTH_USER_ME_UPDATE},
};

#[tokio::test]
async fn profile_page_loads_current_user() {
    // Arrange
    let mut app = spawn_app().await;
    let user = StubUser::normal();
    app.login_as(&user).await;
    let loads_before = app.backend.hits(PATH_AUTH_USER_ME.path);

    // Act
    assert!(app.controller.click_profile());
    app.settle().await;

    // Assert
    assert_eq!(app.controller.state(), UiState::Profile);
    assert_eq!(app.backend.hits(PATH_AUTH_USER_ME.path), loads_before + 1);
    let profile = app.controller.profile().unwrap();
    assert_eq!(profile.email, user.email);
    assert_eq!(profile.name, user.name);
    assert_eq!(app.backend.state.last_bearer(), Some(user.token()));
}

#[tokio::test]
async fn profile_update_sends_null_for_blank_fields() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    app.controller.click_profile();
    app.settle().await;
    app.controller.forms.profile.new_email = "   ".to_string();
    app.controller.forms.profile.new_name = "Иван Петрович".to_string();

    // Act
    app.controller.submit_profile_update();
    app.settle().await;

    // Assert
    assert_eq!(
        app.backend.state.last_update(),
        Some(serde_json::json!({"new_email": null, "new_name": "Иван Петрович"}))
    );
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::info(MSG_PROFILE_UPDATED)]
    );
    assert_eq!(
        app.controller.profile().unwrap().name,
        "Иван Петрович",
        "profile reloaded after update"
    );
    assert!(app.controller.forms.profile.new_name.is_empty(), "form reset");
    assert_eq!(app.backend.hits(PATH_AUTH_USER_ME_UPDATE.path), 1);
}

#[tokio::test]
async fn profile_requires_login() {
    // Arrange
    let mut app = spawn_app().await;

    // Act
    let shown = app.controller.click_profile();

    // Assert
    assert!(!shown);
    assert_eq!(app.controller.state(), UiState::LoggedOut);
    assert_eq!(app.backend.total_hits(), 0);
}

#[tokio::test]
async fn profile_update_failure_shows_server_detail() {
    // Arrange
    let mut app = spawn_app().await;
    let user = StubUser::normal();
    app.login_as(&user).await;
    app.controller.take_notifications();
    app.controller.forms.profile.new_email = "admin@example.com".to_string();
    app.backend.state.fail_next(
        PATH_AUTH_USER_ME_UPDATE.path,
        StubFailure::detail(400, "Email уже используется"),
    );

    // Act
    app.controller.submit_profile_update();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Email уже используется")]
    );
    assert_eq!(
        app.controller.forms.profile.new_email, "admin@example.com",
        "form kept for another try"
    );
    assert_eq!(app.backend.state.user(&user.email), Some(user));
}

#[tokio::test]
async fn profile_update_failure_without_json_body_uses_fallback() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    app.controller.take_notifications();
    app.controller.forms.profile.new_name = "Пётр".to_string();
    app.backend.state.fail_next(
        PATH_AUTH_USER_ME_UPDATE.path,
        StubFailure::plain_text(502, "<html>Bad Gateway</html>"),
    );

    // Act
    app.controller.submit_profile_update();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error(MSG_PROFILE_UPDATE_FAILED)]
    );
}
