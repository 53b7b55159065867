use crate::helpers::spawn_app;
use detect_client_core::controller::{Notification, UiState};
use detect_shared::const_config::{msg::MSG_REGISTER_SUCCESS, path::PATH_AUTH_REGISTER};
use secrecy::SecretString;

fn fill_register(app: &mut crate::helpers::TestApp, email: &str, password: &str, confirm: &str) {
    let form = &mut app.controller.forms.register;
    form.name = "Пётр".to_string();
    form.email = email.to_string();
    form.password = SecretString::from(password);
    form.confirm_password = SecretString::from(confirm);
}

#[tokio::test]
async fn register_success_returns_to_login() {
    // Arrange
    let mut app = spawn_app().await;
    app.controller.click_register();
    fill_register(&mut app, "new@example.com", "secret", "secret");

    // Act
    app.controller.submit_register();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::info(MSG_REGISTER_SUCCESS)]
    );
    assert_eq!(app.controller.state(), UiState::Login);
    assert!(app.controller.forms.register.email.is_empty(), "form reset");
    assert!(app.backend.state.user("new@example.com").is_some());
    assert!(!app.controller.is_authenticated(), "registering does not log in");
}

#[tokio::test]
async fn register_duplicate_email_shows_detail() {
    // Arrange
    let mut app = spawn_app().await;
    app.controller.click_register();
    fill_register(&mut app, "user@example.com", "secret", "secret");

    // Act
    app.controller.submit_register();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Email already registered")]
    );
    assert_eq!(app.controller.state(), UiState::Register);
    assert_eq!(
        app.controller.forms.register.email, "user@example.com",
        "input kept for correction"
    );
}

#[tokio::test]
async fn register_validation_errors_are_joined() {
    // Arrange
    let mut app = spawn_app().await;
    app.controller.click_register();
    fill_register(&mut app, "new@example.com", "secret", "different");

    // Act
    app.controller.submit_register();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Passwords do not match")]
    );
    assert_eq!(app.backend.hits(PATH_AUTH_REGISTER.path), 1);
    assert!(app.backend.state.user("new@example.com").is_none());
}
