#![warn(unused_crate_dependencies)]

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use detect_shared::{
    const_config::path::{
        PATH_ADMIN_USERS, PATH_AUTH_LOGIN, PATH_AUTH_REGISTER, PATH_AUTH_USER_ME,
        PATH_AUTH_USER_ME_UPDATE, PATH_PREDICTIONS_PREDICT,
    },
    telemetry::{self, get_subscriber, init_subscriber},
};
use std::fmt::Debug;
use std::future::Future;
use std::net::TcpListener;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

mod stub;

pub use stub::{stub_detections, StubFailure, StubState, StubUser, STUB_PROCESSED_IMAGE};

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// A stub backend listening on a random local port
pub struct TestBackend {
    pub address: String,
    pub state: web::Data<StubState>,
}

impl Debug for TestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestBackend")
            .field("address", &self.address)
            .finish()
    }
}

impl TestBackend {
    /// Number of requests received for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.state.hits(path)
    }

    pub fn total_hits(&self) -> usize {
        self.state.total_hits()
    }
}

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

pub fn port_to_test_address(application_port: u16) -> String {
    format!("http://127.0.0.1:{application_port}")
}

/// Starts a stub backend seeded with [`StubUser::admin`] and
/// [`StubUser::normal`]
pub async fn spawn_backend() -> TestBackend {
    spawn_backend_with(StubState::seeded()).await
}

pub async fn spawn_backend_with(state: StubState) -> TestBackend {
    start_tracing();
    let state = web::Data::new(state);
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let application_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    let server_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .app_data(MultipartFormConfig::default().error_handler(stub::form_error))
            .route(PATH_AUTH_LOGIN.path, web::post().to(stub::login))
            .route(PATH_AUTH_REGISTER.path, web::post().to(stub::register))
            .route(PATH_AUTH_USER_ME.path, web::get().to(stub::current_user))
            .route(PATH_AUTH_USER_ME_UPDATE.path, web::put().to(stub::update_user))
            .route(PATH_ADMIN_USERS.path, web::get().to(stub::list_users))
            .route(PATH_PREDICTIONS_PREDICT.path, web::post().to(stub::predict))
    })
    .workers(1)
    .listen(listener)
    .expect("failed to listen on bound port")
    .run();

    // Leak the handle so the server keeps running until the test ends
    let _ = tokio::spawn(server);

    TestBackend {
        address: port_to_test_address(application_port),
        state,
    }
}

fn start_tracing() {
    let msg = LazyLock::force(&TRACING);
    tracing::debug!(msg);
}

/// Calls `poll` until `is_done` returns true
///
/// # Panics
/// If it doesn't finish within the timeout
pub async fn wait_until<S, P, D>(subject: &mut S, mut poll: P, mut is_done: D)
where
    P: FnMut(&mut S),
    D: FnMut(&S) -> bool,
{
    let start = Instant::now();
    loop {
        poll(subject);
        if is_done(subject) {
            return;
        }
        assert!(
            start.elapsed() < WAIT_TIMEOUT,
            "condition not met within {WAIT_TIMEOUT:?}"
        );
        tokio::time::sleep(WAIT_POLL_INTERVAL).await;
    }
}

/// Awaits `fut` or panics if it takes longer than the timeout
pub async fn with_timeout<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(WAIT_TIMEOUT, fut)
        .await
        .expect("timed out waiting for response")
}
