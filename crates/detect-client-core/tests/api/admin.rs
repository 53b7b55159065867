use crate::helpers::{no_cb, spawn_app, with_timeout, StubFailure, StubUser};
use detect_client_core::{
    controller::{Notification, UiState},
    ClientError, MemoryTokenStore, Session,
};
use detect_shared::const_config::{
    msg::{MSG_STATUS_INACTIVE, MSG_USERS_LOAD_FAILED},
    path::PATH_ADMIN_USERS,
};

#[tokio::test]
async fn admin_sees_user_table() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::admin()).await;

    // Act
    assert!(app.controller.click_admin());
    app.settle().await;

    // Assert
    assert_eq!(app.controller.state(), UiState::Admin);
    let users = app.controller.users();
    assert_eq!(users.len(), 2);
    let normal = users
        .iter()
        .find(|row| row.email == StubUser::normal().email)
        .unwrap();
    assert_eq!(normal.id, 2);
    assert_eq!(normal.status_label(), MSG_STATUS_INACTIVE);
    assert_eq!(normal.roles_name.as_deref(), Some("user"));
}

#[tokio::test]
async fn non_admin_cannot_open_admin_page() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;

    // Act
    let shown = app.controller.click_admin();

    // Assert
    assert!(!shown);
    assert_eq!(app.controller.state(), UiState::Predict);
    assert_eq!(app.backend.hits(PATH_ADMIN_USERS.path), 0);
    assert!(app.controller.take_notifications()[0].is_error());
}

#[tokio::test]
async fn backend_rejects_non_admin() {
    // Arrange
    let app = spawn_app().await;
    let session = Session::restore(MemoryTokenStore::with_token(StubUser::normal().token()));

    // Act
    let outcome = with_timeout(app.client().list_users(&session, no_cb))
        .await
        .expect("sender dropped");

    // Assert
    assert_eq!(
        outcome.unwrap_err(),
        ClientError::Server {
            status: 403,
            detail: Some("У вас недостаточно прав".to_string())
        }
    );
}

#[tokio::test]
async fn user_list_failure_shows_server_detail() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::admin()).await;
    app.controller.take_notifications();
    app.backend
        .state
        .fail_next(PATH_ADMIN_USERS.path, StubFailure::detail(503, "База данных недоступна"));

    // Act
    assert!(app.controller.click_admin());
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("База данных недоступна")]
    );
    assert!(app.controller.users().is_empty());
    assert_eq!(app.controller.state(), UiState::Admin);
}

#[tokio::test]
async fn user_list_failure_without_json_body_uses_fallback() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::admin()).await;
    app.controller.take_notifications();
    app.backend.state.fail_next(
        PATH_ADMIN_USERS.path,
        StubFailure::plain_text(500, "Internal Server Error"),
    );

    // Act
    assert!(app.controller.click_admin());
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error(MSG_USERS_LOAD_FAILED)]
    );
    assert!(app.controller.users().is_empty());
}
