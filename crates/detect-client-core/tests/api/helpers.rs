use detect_client_core::{controller::UiController, Client, MemoryTokenStore, Session};
use secrecy::SecretString;

pub use detect_test_helper::{
    no_cb, spawn_backend, stub_detections, wait_until, with_timeout, StubFailure, StubUser,
    TestBackend, STUB_PROCESSED_IMAGE,
};

pub struct TestApp {
    pub backend: TestBackend,
    pub store: MemoryTokenStore,
    pub controller: UiController,
}

/// Starts a stub backend and a controller with nothing persisted
pub async fn spawn_app() -> TestApp {
    let backend = spawn_backend().await;
    build_app(backend, MemoryTokenStore::default())
}

/// Starts a stub backend and a controller as if `token` had been persisted by
/// an earlier run
pub async fn spawn_app_with_token(token: &str) -> TestApp {
    let backend = spawn_backend().await;
    build_app(backend, MemoryTokenStore::with_token(token))
}

fn build_app(backend: TestBackend, store: MemoryTokenStore) -> TestApp {
    let controller = UiController::without_wake(
        Client::new(backend.address.clone()),
        Session::restore(store.clone()),
    );
    TestApp {
        backend,
        store,
        controller,
    }
}

impl TestApp {
    pub fn client(&self) -> Client {
        Client::new(self.backend.address.clone())
    }

    /// Polls until every request sent so far has been answered
    pub async fn settle(&mut self) {
        wait_until(
            &mut self.controller,
            |c| {
                c.poll();
            },
            |c| !c.has_pending_requests(),
        )
        .await;
    }

    pub fn fill_login(&mut self, user: &StubUser) {
        self.controller.forms.login.email = user.email.clone();
        self.controller.forms.login.password = SecretString::from(user.password.clone());
    }

    /// Logs in through the login form and waits for the profile to load
    pub async fn login_as(&mut self, user: &StubUser) {
        self.controller.click_login();
        self.fill_login(user);
        self.controller.submit_login();
        self.settle().await;
        assert!(
            self.controller.is_authenticated(),
            "login failed: {:?}",
            self.controller.take_notifications()
        );
    }

    /// Builds a new controller from what is persisted, like reloading the page
    pub async fn reload(&mut self) {
        self.controller = UiController::without_wake(
            self.client(),
            Session::restore(self.store.clone()),
        );
        self.settle().await;
    }
}
