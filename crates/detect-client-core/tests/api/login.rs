use crate::helpers::{no_cb, spawn_app, wait_until, with_timeout, StubUser};
use detect_client_core::{
    controller::{Navigation, Notification, RequestKind, Section, UiController, UiState},
    Client, ClientError, Session,
};
use detect_shared::{const_config::path::PATH_AUTH_LOGIN, req_args::LoginReqArgs};
use std::time::Duration;

#[tokio::test]
async fn login_success_stores_token_and_shows_predict() {
    // Arrange
    let mut app = spawn_app().await;
    let user = StubUser::normal();

    // Act
    app.login_as(&user).await;

    // Assert
    assert_eq!(app.store.stored(), Some(user.token()));
    assert_eq!(app.controller.state(), UiState::Predict);
    assert_eq!(
        app.controller.sections().visible(),
        vec![Section::Predict]
    );
    assert_eq!(app.controller.navigation(), Navigation::new(true, false));
    assert_eq!(app.controller.profile().unwrap().email, user.email);
    assert!(
        app.controller.take_notifications().is_empty(),
        "success is silent"
    );
}

#[tokio::test]
async fn login_as_admin_shows_admin_button() {
    // Arrange
    let mut app = spawn_app().await;

    // Act
    app.login_as(&StubUser::admin()).await;

    // Assert
    assert!(app.controller.is_admin());
    assert!(app.controller.navigation().admin);
}

#[tokio::test]
async fn login_failure_shows_server_detail() {
    // Arrange
    let mut app = spawn_app().await;
    app.controller.click_login();
    app.fill_login(&StubUser::normal().with_password("wrong"));

    // Act
    app.controller.submit_login();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Invalid username or password")]
    );
    assert_eq!(app.store.stored(), None);
    assert_eq!(app.controller.state(), UiState::Login);
    assert!(!app.controller.is_authenticated());
}

#[tokio::test]
async fn login_unreachable_backend_uses_fallback_message() {
    // Arrange
    let mut controller = UiController::without_wake(
        Client::new("http://127.0.0.1:9".to_string()),
        Session::in_memory(),
    );
    controller.forms.login.email = "a@b.c".to_string();

    // Act
    controller.submit_login();
    wait_until(
        &mut controller,
        |c| {
            c.poll();
        },
        |c| !c.has_pending_requests(),
    )
    .await;

    // Assert
    assert_eq!(
        controller.take_notifications(),
        vec![Notification::error("Ошибка авторизации")]
    );
}

#[tokio::test]
async fn login_sends_form_fields() {
    // Arrange
    let app = spawn_app().await;
    let user = StubUser::admin();
    let args = LoginReqArgs::new(user.email.clone(), user.password.clone().into());

    // Act
    let outcome = with_timeout(app.client().login(args, no_cb))
        .await
        .expect("sender dropped");

    // Assert
    let token_info = outcome.unwrap();
    assert_eq!(token_info.access_token, user.token());
    assert_eq!(token_info.token_type, "Bearer");
    assert_eq!(app.backend.hits(PATH_AUTH_LOGIN.path), 1);
}

#[tokio::test]
async fn login_failure_is_categorized() {
    // Arrange
    let app = spawn_app().await;
    let args = LoginReqArgs::new("nobody@example.com", "x".to_string().into());

    // Act
    let outcome = with_timeout(app.client().login(args, no_cb))
        .await
        .expect("sender dropped");

    // Assert
    let err = outcome.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(
        err,
        ClientError::Server {
            status: 401,
            detail: Some("Invalid username or password".to_string())
        }
    );
}

#[tokio::test]
async fn slower_earlier_login_does_not_override_later_one() {
    // Arrange
    let mut app = spawn_app().await;
    let admin = StubUser::admin();
    let user = StubUser::normal();
    app.backend
        .state
        .slow_login(&admin.email, Duration::from_millis(300));
    app.controller.click_login();

    // Act
    app.fill_login(&admin);
    app.controller.submit_login();
    app.fill_login(&user);
    app.controller.submit_login();
    assert!(app.controller.is_awaiting(RequestKind::Login));
    app.settle().await;

    // Assert
    assert_eq!(app.backend.hits(PATH_AUTH_LOGIN.path), 2, "both were sent");
    assert_eq!(app.store.stored(), Some(user.token()));
    assert_eq!(app.controller.profile().unwrap().email, user.email);
    assert!(!app.controller.is_admin());
}
