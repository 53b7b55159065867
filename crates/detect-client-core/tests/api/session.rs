use crate::helpers::{spawn_app, spawn_app_with_token, StubUser};
use detect_client_core::controller::{Navigation, Notification, Section, UiState};
use detect_shared::const_config::path::PATH_AUTH_USER_ME;

#[tokio::test]
async fn persisted_token_restores_session() {
    // Arrange
    let user = StubUser::admin();

    // Act
    let mut app = spawn_app_with_token(&user.token()).await;
    assert_eq!(app.controller.state(), UiState::Predict);
    assert!(!app.controller.is_admin_known());
    app.settle().await;

    // Assert
    assert_eq!(app.backend.hits(PATH_AUTH_USER_ME.path), 1);
    assert_eq!(app.controller.navigation(), Navigation::new(true, true));
    assert_eq!(app.controller.sections().visible(), vec![Section::Predict]);
}

#[tokio::test]
async fn rejected_persisted_token_logs_out() {
    // Arrange
    let mut app = spawn_app_with_token("token-99").await;

    // Act
    app.settle().await;

    // Assert
    assert_eq!(app.controller.state(), UiState::LoggedOut);
    assert_eq!(app.store.stored(), None);
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Could not validate credentials")]
    );
}

#[tokio::test]
async fn logout_then_reload_shows_login() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;

    // Act
    app.controller.logout();
    app.reload().await;

    // Assert
    assert_eq!(app.store.stored(), None);
    assert_eq!(app.controller.state(), UiState::LoggedOut);
    assert_eq!(app.controller.sections().visible(), vec![Section::Auth]);
    assert_eq!(app.controller.navigation(), Navigation::new(false, false));
}

#[tokio::test]
async fn reload_while_logged_in_keeps_session() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;

    // Act
    app.reload().await;

    // Assert
    assert_eq!(app.controller.state(), UiState::Predict);
    assert!(app.controller.is_authenticated());
    assert_eq!(
        app.controller.profile().unwrap().email,
        StubUser::normal().email
    );
}

#[tokio::test]
async fn responses_after_logout_are_ignored() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::admin()).await;
    app.controller.click_profile();

    // Act
    app.controller.logout();
    app.settle().await;

    // Assert
    assert!(app.controller.profile().is_none());
    assert!(!app.controller.is_admin());
    assert_eq!(app.controller.state(), UiState::LoggedOut);
}
