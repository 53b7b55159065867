//! Handlers that imitate the detection backend closely enough for the client
//! to be exercised end to end

use actix_multipart::form::{bytes::Bytes as FormBytes, text::Text, MultipartForm};
use actix_multipart::MultipartError;
use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use detect_shared::const_config::path::{
    PATH_ADMIN_USERS, PATH_AUTH_LOGIN, PATH_AUTH_REGISTER, PATH_AUTH_USER_ME,
    PATH_AUTH_USER_ME_UPDATE, PATH_PREDICTIONS_PREDICT,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

/// Base64 of the bytes `processed`, returned as the annotated image
pub const STUB_PROCESSED_IMAGE: &str = "cHJvY2Vzc2Vk";

const TOKEN_PREFIX: &str = "token-";

/// The detections every successful prediction returns
pub fn stub_detections() -> serde_json::Value {
    json!([
        { "class_name": "cat", "confidence": 0.91, "box": [1, 2, 3, 4] }
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub is_active: bool,
}

impl StubUser {
    pub fn admin() -> Self {
        Self {
            id: 1,
            name: "Администратор".to_string(),
            email: "admin@example.com".to_string(),
            password: "adminpass".to_string(),
            is_admin: true,
            is_active: true,
        }
    }

    pub fn normal() -> Self {
        Self {
            id: 2,
            name: "Иван".to_string(),
            email: "user@example.com".to_string(),
            password: "userpass".to_string(),
            is_admin: false,
            is_active: false,
        }
    }

    pub fn with_password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = password.into();
        self
    }

    /// The access token the stub hands out for this user
    pub fn token(&self) -> String {
        format!("{TOKEN_PREFIX}{}", self.id)
    }

    fn role_name(&self) -> &'static str {
        if self.is_admin {
            "admin"
        } else {
            "user"
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<StubUser>,
    hits: HashMap<String, usize>,
    slow_logins: HashMap<String, Duration>,
    last_upload: Option<(String, Vec<u8>)>,
    last_update: Option<serde_json::Value>,
    last_bearer: Option<String>,
    failures: HashMap<String, StubFailure>,
}

/// A canned response served once instead of the normal handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFailure {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl StubFailure {
    /// The `{"detail": ...}` body FastAPI sends by default
    pub fn detail<S: Into<String>>(status: u16, detail: S) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: json!({ "detail": detail.into() }).to_string(),
        }
    }

    /// A body that is not JSON at all, like a proxy error page
    pub fn plain_text<S: Into<String>>(status: u16, text: S) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: text.into(),
        }
    }

    fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status)
            .content_type(self.content_type)
            .body(self.body)
    }
}

/// Everything the stub knows plus a record of what it was sent
#[derive(Debug, Default)]
pub struct StubState {
    inner: Mutex<Inner>,
}

impl StubState {
    pub fn with_users(users: Vec<StubUser>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                users,
                ..Default::default()
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::with_users(vec![StubUser::admin(), StubUser::normal()])
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("stub state mutex poisoned")
    }

    /// Delays the login response for `email`
    pub fn slow_login(&self, email: &str, delay: Duration) {
        self.lock().slow_logins.insert(email.to_string(), delay);
    }

    /// Makes the next request to `path` get `failure` as its response
    pub fn fail_next(&self, path: &str, failure: StubFailure) {
        self.lock().failures.insert(path.to_string(), failure);
    }

    pub fn user(&self, email: &str) -> Option<StubUser> {
        self.lock().users.iter().find(|u| u.email == email).cloned()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.lock().hits.get(path).copied().unwrap_or_default()
    }

    pub fn total_hits(&self) -> usize {
        self.lock().hits.values().sum()
    }

    /// File name and bytes of the last image received
    pub fn last_upload(&self) -> Option<(String, Vec<u8>)> {
        self.lock().last_upload.clone()
    }

    /// Body of the last profile update received
    pub fn last_update(&self) -> Option<serde_json::Value> {
        self.lock().last_update.clone()
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.lock().last_bearer.clone()
    }

    /// Counts the request and hands back the failure queued for `path` if any
    fn record_hit(&self, path: &str) -> Option<HttpResponse> {
        let mut inner = self.lock();
        *inner.hits.entry(path.to_string()).or_default() += 1;
        inner.failures.remove(path).map(StubFailure::into_response)
    }

    fn authenticate(&self, req: &HttpRequest) -> Option<StubUser> {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(ToString::to_string);
        let mut inner = self.lock();
        inner.last_bearer.clone_from(&bearer);
        let bearer = bearer?;
        inner.users.iter().find(|u| u.token() == bearer).cloned()
    }
}

/// Mirrors the backend's HTTP exception handler which reports
/// `"<status>: <detail>"` under the key `error http`
fn http_error<S: std::fmt::Display>(status: StatusCode, detail: S) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error http": format!("{}: {detail}", status.as_u16())
    }))
}

/// Mirrors the backend's request validation handler
fn validation_error(loc: &[&str], msg: &str) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({
        "message": "Собственный проверяльщик ошибок валидации",
        "errors": [{ "type": "value_error", "loc": loc, "msg": msg }],
    }))
}

fn unauthorized() -> HttpResponse {
    http_error(StatusCode::UNAUTHORIZED, "Could not validate credentials")
}

/// Reports form data that could not be read the same way as other validation
/// failures
pub fn form_error(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    warn!(?err, "unable to read form");
    let response = validation_error(&["body"], &err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

#[derive(MultipartForm)]
pub struct LoginForm {
    email: Text<String>,
    password: Text<String>,
}

#[tracing::instrument(skip_all)]
pub async fn login(
    MultipartForm(form): MultipartForm<LoginForm>,
    state: web::Data<StubState>,
) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_AUTH_LOGIN.path) {
        return failure;
    }
    let email = form.email.into_inner();
    let password = form.password.into_inner();

    let delay = state.lock().slow_logins.get(&email).copied();
    if let Some(delay) = delay {
        actix_web::rt::time::sleep(delay).await;
    }

    match state.user(&email) {
        Some(user) if user.password == password => {
            info!(?email, "stub login succeeded");
            HttpResponse::Ok().json(json!({
                "access_token": user.token(),
                "refresh_token": null,
                "token_type": "Bearer",
            }))
        }
        _ => http_error(StatusCode::UNAUTHORIZED, "Invalid username or password"),
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct RegisterBody {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[tracing::instrument(skip_all)]
pub async fn register(
    body: web::Json<RegisterBody>,
    state: web::Data<StubState>,
) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_AUTH_REGISTER.path) {
        return failure;
    }
    let body = body.into_inner();
    if body.password != body.confirm_password {
        return validation_error(&["body", "confirm_password"], "Passwords do not match");
    }
    let mut inner = state.lock();
    if inner.users.iter().any(|u| u.email == body.email) {
        drop(inner);
        return http_error(StatusCode::CONFLICT, "Email already registered");
    }
    let id = inner.users.iter().map(|u| u.id).max().unwrap_or_default() + 1;
    inner.users.push(StubUser {
        id,
        name: body.name,
        email: body.email,
        password: body.password,
        is_admin: false,
        is_active: true,
    });
    HttpResponse::Created().json(json!({ "id": id }))
}

#[tracing::instrument(skip_all)]
pub async fn current_user(req: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_AUTH_USER_ME.path) {
        return failure;
    }
    let Some(user) = state.authenticate(&req) else {
        return unauthorized();
    };
    HttpResponse::Ok().json(json!({
        "email": user.email,
        "name": user.name,
        "is_admin": user.is_admin,
    }))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateBody {
    new_email: Option<String>,
    new_name: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn update_user(
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
    state: web::Data<StubState>,
) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_AUTH_USER_ME_UPDATE.path) {
        return failure;
    }
    let Some(user) = state.authenticate(&req) else {
        return unauthorized();
    };
    let raw = body.into_inner();
    let update: UpdateBody = match serde_json::from_value(raw.clone()) {
        Ok(update) => update,
        Err(e) => return validation_error(&["body"], &e.to_string()),
    };
    let mut inner = state.lock();
    inner.last_update = Some(raw);
    if let Some(stored) = inner.users.iter_mut().find(|u| u.id == user.id) {
        if let Some(email) = update.new_email {
            stored.email = email;
        }
        if let Some(name) = update.new_name {
            stored.name = name;
        }
    }
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[tracing::instrument(skip_all)]
pub async fn list_users(req: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_ADMIN_USERS.path) {
        return failure;
    }
    let Some(user) = state.authenticate(&req) else {
        return unauthorized();
    };
    if !user.is_admin {
        return http_error(StatusCode::FORBIDDEN, "У вас недостаточно прав");
    }
    let rows: Vec<_> = state
        .lock()
        .users
        .iter()
        .map(|u| {
            json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
                "is_active": u.is_active,
                "roles_name": u.role_name(),
            })
        })
        .collect();
    HttpResponse::Ok().json(rows)
}

#[derive(MultipartForm)]
pub struct PredictForm {
    file: Option<FormBytes>,
}

#[tracing::instrument(skip_all)]
pub async fn predict(
    req: HttpRequest,
    MultipartForm(form): MultipartForm<PredictForm>,
    state: web::Data<StubState>,
) -> HttpResponse {
    if let Some(failure) = state.record_hit(PATH_PREDICTIONS_PREDICT.path) {
        return failure;
    }
    if state.authenticate(&req).is_none() {
        return unauthorized();
    }
    let Some(file) = form.file else {
        return validation_error(&["body", "file"], "Field required");
    };
    state.lock().last_upload = Some((file.file_name.unwrap_or_default(), file.data.to_vec()));
    HttpResponse::Ok().json(json!({
        "detections": stub_detections(),
        "processed_image": STUB_PROCESSED_IMAGE,
    }))
}
