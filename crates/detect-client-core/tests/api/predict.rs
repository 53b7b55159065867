use crate::helpers::{
    no_cb, spawn_app, stub_detections, with_timeout, StubFailure, StubUser, STUB_PROCESSED_IMAGE,
};
use detect_client_core::{controller::Notification, ClientError, Session};
use detect_shared::{
    const_config::{
        msg::{MSG_NO_IMAGE_SELECTED, MSG_PREDICT_FAILED},
        path::PATH_PREDICTIONS_PREDICT,
    },
    req_args::ImageUpload,
};

#[tokio::test]
async fn predict_shows_detections_and_image() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    assert!(!app.controller.is_result_visible());
    app.controller.forms.predict.selected = Some(ImageUpload::new("cat.jpg", vec![1, 2, 3]));

    // Act
    app.controller.upload();
    app.settle().await;

    // Assert
    assert!(app.controller.is_result_visible());
    let view = app.controller.prediction().unwrap();
    assert_eq!(
        view.image_src,
        format!("data:image/jpeg;base64,{STUB_PROCESSED_IMAGE}")
    );
    assert_eq!(
        view.detections_text,
        serde_json::to_string_pretty(&stub_detections()).unwrap()
    );
    let detections = view.detections.as_ref().unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].bounding_box, vec![1, 2, 3, 4]);
    assert_eq!(
        app.backend.state.last_upload(),
        Some(("cat.jpg".to_string(), vec![1, 2, 3]))
    );
}

#[tokio::test]
async fn upload_without_image_sends_nothing() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;

    // Act
    app.controller.upload();

    // Assert
    assert!(!app.controller.has_pending_requests());
    assert_eq!(app.backend.hits(PATH_PREDICTIONS_PREDICT.path), 0);
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error(MSG_NO_IMAGE_SELECTED)]
    );
}

#[tokio::test]
async fn predict_without_session_is_not_sent() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = with_timeout(app.client().predict(
        &Session::in_memory(),
        ImageUpload::new("cat.jpg", vec![1]),
        no_cb,
    ))
    .await
    .expect("sender dropped");

    // Assert
    assert!(matches!(outcome, Err(ClientError::NotLoggedIn(_))));
    assert_eq!(app.backend.total_hits(), 0);
}

#[tokio::test]
async fn new_result_replaces_previous() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    app.controller.forms.predict.selected = Some(ImageUpload::new("one.png", vec![1]));
    app.controller.upload();
    app.settle().await;

    // Act
    app.controller.forms.predict.selected = Some(ImageUpload::new("two.png", vec![2]));
    app.controller.upload();
    app.settle().await;

    // Assert
    assert_eq!(app.backend.hits(PATH_PREDICTIONS_PREDICT.path), 2);
    assert_eq!(
        app.backend.state.last_upload(),
        Some(("two.png".to_string(), vec![2]))
    );
    assert!(app.controller.is_result_visible());
}

#[tokio::test]
async fn predict_failure_shows_server_detail() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    app.controller.take_notifications();
    app.controller.forms.predict.selected = Some(ImageUpload::new("cat.jpg", vec![1]));
    app.backend.state.fail_next(
        PATH_PREDICTIONS_PREDICT.path,
        StubFailure::detail(500, "Модель недоступна"),
    );

    // Act
    app.controller.upload();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error("Модель недоступна")]
    );
    assert!(!app.controller.is_result_visible());
}

#[tokio::test]
async fn predict_failure_without_json_body_uses_fallback() {
    // Arrange
    let mut app = spawn_app().await;
    app.login_as(&StubUser::normal()).await;
    app.controller.take_notifications();
    app.controller.forms.predict.selected = Some(ImageUpload::new("cat.jpg", vec![1]));
    app.backend.state.fail_next(
        PATH_PREDICTIONS_PREDICT.path,
        StubFailure::plain_text(502, "Bad Gateway"),
    );

    // Act
    app.controller.upload();
    app.settle().await;

    // Assert
    assert_eq!(
        app.controller.take_notifications(),
        vec![Notification::error(MSG_PREDICT_FAILED)]
    );
    assert!(!app.controller.is_result_visible());
}
