//! Headless controller for the pages of the app
//!
//! Holds the UI state, the session and the outcome of the latest requests.
//! The UI layer only reads from it, edits [`Forms`] and calls the `click_*` /
//! `submit_*` methods. Responses are picked up by calling [`UiController::poll`]
//! (usually once per frame).

use detect_shared::{
    const_config::msg::{
        MSG_INSUFFICIENT_RIGHTS, MSG_LOGIN_FAILED, MSG_LOGIN_REQUIRED, MSG_NO_IMAGE_SELECTED,
        MSG_PREDICT_FAILED, MSG_PROFILE_LOAD_FAILED, MSG_PROFILE_UPDATED,
        MSG_PROFILE_UPDATE_FAILED, MSG_REGISTER_FAILED, MSG_REGISTER_SUCCESS, MSG_SESSION_EXPIRED,
        MSG_USERS_LOAD_FAILED,
    },
    prediction::{Detection, PredictionResponse},
    uac::{UserListRow, UserProfile},
};
use secrecy::SecretString;
use std::{collections::VecDeque, sync::Arc};
use tracing::{debug, info, instrument, warn};

use crate::{Client, Session};

mod forms;
mod generation;
mod in_flight;
mod navigation;
mod notification;
mod sections;

pub use forms::{Forms, LoginForm, PredictForm, ProfileForm, RegisterForm};
pub use generation::{Generation, GenerationCounter, RequestKind};
pub use navigation::Navigation;
pub use notification::{Notification, NotificationLevel};
pub use sections::{Section, SectionVisibility, UiState};

use generation::RequestGenerations;
use in_flight::{Completed, InFlight, PendingResponse};

/// Called when a response arrives so the UI knows to poll
pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

/// What the predict page shows after a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    /// Detections as indented JSON
    pub detections_text: String,
    /// `data:` URI of the processed image
    pub image_src: String,
    /// Base64 JPEG as received
    pub processed_image: String,
    /// Present when the detections have the known shape
    pub detections: Option<Vec<Detection>>,
}

impl From<PredictionResponse> for PredictionView {
    fn from(value: PredictionResponse) -> Self {
        let detections = match value.typed_detections() {
            Ok(detections) => Some(detections),
            Err(e) => {
                debug!(?e, "showing detections as raw json only");
                None
            }
        };
        Self {
            detections_text: value.detections_pretty(),
            image_src: value.image_data_uri(),
            detections,
            processed_image: value.processed_image,
        }
    }
}

pub struct UiController {
    client: Client,
    session: Session,
    state: UiState,
    /// `None` until the backend has told us
    is_admin: Option<bool>,
    pub forms: Forms,
    profile: Option<UserProfile>,
    users: Vec<UserListRow>,
    prediction: Option<PredictionView>,
    notifications: VecDeque<Notification>,
    generations: RequestGenerations,
    session_epoch: GenerationCounter,
    in_flight: Vec<InFlight>,
    wake: WakeFn,
}

impl UiController {
    /// Runs the startup sequence: a restored session goes straight to the
    /// predict page and the current user is fetched to learn the admin status
    #[instrument(skip(wake))]
    pub fn new(client: Client, session: Session, wake: WakeFn) -> Self {
        let mut result = Self {
            client,
            session,
            state: UiState::LoggedOut,
            is_admin: None,
            forms: Default::default(),
            profile: None,
            users: Vec::new(),
            prediction: None,
            notifications: VecDeque::new(),
            generations: Default::default(),
            session_epoch: Default::default(),
            in_flight: Vec::new(),
            wake,
        };
        if result.session.is_authenticated() {
            info!("Restored session found, showing predict page");
            result.click_predict();
            result.load_profile();
        } else {
            info!("No session, showing login page");
        }
        result
    }

    /// Convenience constructor for when no wake up is needed (e.g. tests that
    /// poll in a loop)
    pub fn without_wake(client: Client, session: Session) -> Self {
        Self::new(client, session, Arc::new(|| {}))
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn sections(&self) -> SectionVisibility {
        self.state.render()
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::new(self.is_authenticated(), self.is_admin())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    pub fn is_admin_known(&self) -> bool {
        self.is_admin.is_some()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn users(&self) -> &[UserListRow] {
        &self.users
    }

    pub fn prediction(&self) -> Option<&PredictionView> {
        self.prediction.as_ref()
    }

    pub fn is_result_visible(&self) -> bool {
        self.prediction.is_some()
    }

    /// Returns `true` if a request of this kind is still waiting for a response
    pub fn is_awaiting(&self, kind: RequestKind) -> bool {
        self.in_flight
            .iter()
            .any(|in_flight| in_flight.response.kind() == kind)
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Removes and returns the notifications queued since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn click_login(&mut self) {
        self.set_state(UiState::Login);
    }

    pub fn click_register(&mut self) {
        self.set_state(UiState::Register);
    }

    /// Returns `false` if the page could not be shown
    pub fn click_predict(&mut self) -> bool {
        if !self.require_session() {
            return false;
        }
        self.set_state(UiState::Predict);
        true
    }

    pub fn click_profile(&mut self) -> bool {
        if !self.require_session() {
            return false;
        }
        self.set_state(UiState::Profile);
        self.load_profile();
        true
    }

    pub fn click_admin(&mut self) -> bool {
        if !self.require_session() {
            return false;
        }
        if !self.is_admin() {
            self.notify(Notification::error(MSG_INSUFFICIENT_RIGHTS));
            return false;
        }
        self.set_state(UiState::Admin);
        self.load_users();
        true
    }

    #[instrument(skip(self))]
    pub fn submit_login(&mut self) {
        let args = self.forms.login.to_req_args();
        let rx = self.client.login(args, self.wake_fn());
        self.track(PendingResponse::Login(rx));
    }

    #[instrument(skip(self))]
    pub fn submit_register(&mut self) {
        let args = self.forms.register.to_req_args();
        let rx = self.client.register(&args, self.wake_fn());
        self.track(PendingResponse::Register(rx));
    }

    /// Forgets the session (including the persisted token) and everything that
    /// was loaded with it
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.end_session();
        self.set_state(UiState::LoggedOut);
    }

    /// Fetches the current user (also how the admin status is learned)
    #[instrument(skip(self))]
    pub fn load_profile(&mut self) {
        let rx = self.client.current_user(&self.session, self.wake_fn());
        self.track(PendingResponse::CurrentUser(rx));
    }

    #[instrument(skip(self))]
    pub fn submit_profile_update(&mut self) {
        let args = self.forms.profile.to_req_args();
        let rx = self.client.update_user(&self.session, &args, self.wake_fn());
        self.track(PendingResponse::UpdateUser(rx));
    }

    #[instrument(skip(self))]
    pub fn load_users(&mut self) {
        let rx = self.client.list_users(&self.session, self.wake_fn());
        self.track(PendingResponse::Users(rx));
    }

    /// Sends the selected image. Nothing is sent if no image is selected
    #[instrument(skip(self))]
    pub fn upload(&mut self) {
        let Some(upload) = self.forms.predict.selected.clone() else {
            self.notify(Notification::error(MSG_NO_IMAGE_SELECTED));
            return;
        };
        let rx = self.client.predict(&self.session, upload, self.wake_fn());
        self.track(PendingResponse::Predict(rx));
    }

    /// Applies any responses that have arrived. Returns `true` if any did
    /// (including stale ones that were dropped)
    pub fn poll(&mut self) -> bool {
        let mut completed = Vec::new();
        self.in_flight.retain_mut(|in_flight| {
            match in_flight.response.try_complete() {
                Some(outcome) => {
                    completed.push((in_flight.generation, in_flight.epoch, outcome));
                    false
                }
                None => true,
            }
        });
        let has_changes = !completed.is_empty();
        for (generation, epoch, outcome) in completed {
            let kind = outcome.kind();
            if !self.generations.is_current(kind, generation) {
                debug!(?kind, ?generation, "dropping response superseded by a newer request");
                continue;
            }
            if kind.is_session_bound() && epoch != self.session_epoch.latest() {
                debug!(?kind, ?epoch, "dropping response issued under another session");
                continue;
            }
            self.apply(outcome);
        }
        has_changes
    }

    fn apply(&mut self, outcome: Completed) {
        match outcome {
            Completed::Login(Ok(token_info)) => {
                info!("Login succeeded");
                self.end_session();
                self.session.set_token(token_info.access_token.into());
                self.forms.login.password = SecretString::from("");
                self.set_state(UiState::Predict);
                self.load_profile();
            }
            Completed::Login(Err(e)) => self.notify_failure(&e, MSG_LOGIN_FAILED),
            Completed::Register(Ok(())) => {
                self.forms.register = Default::default();
                self.notify(Notification::info(MSG_REGISTER_SUCCESS));
                self.set_state(UiState::Login);
            }
            Completed::Register(Err(e)) => self.notify_failure(&e, MSG_REGISTER_FAILED),
            Completed::CurrentUser(Ok(profile)) => {
                self.is_admin = Some(profile.is_admin);
                self.profile = Some(profile);
                if self.state == UiState::Admin && !self.is_admin() {
                    self.set_state(UiState::Predict);
                }
            }
            Completed::CurrentUser(Err(e)) if e.is_unauthorized() => {
                warn!(?e, "token rejected, ending session");
                self.end_session();
                self.set_state(UiState::LoggedOut);
                self.notify(Notification::error(e.user_message(MSG_SESSION_EXPIRED)));
            }
            Completed::CurrentUser(Err(e)) => self.notify_failure(&e, MSG_PROFILE_LOAD_FAILED),
            Completed::UpdateUser(Ok(())) => {
                self.notify(Notification::info(MSG_PROFILE_UPDATED));
                self.forms.profile = Default::default();
                self.load_profile();
            }
            Completed::UpdateUser(Err(e)) => self.notify_failure(&e, MSG_PROFILE_UPDATE_FAILED),
            Completed::Users(Ok(users)) => self.users = users,
            Completed::Users(Err(e)) => self.notify_failure(&e, MSG_USERS_LOAD_FAILED),
            Completed::Predict(Ok(response)) => self.prediction = Some(response.into()),
            Completed::Predict(Err(e)) => self.notify_failure(&e, MSG_PREDICT_FAILED),
        }
    }

    /// Clears the session and anything tied to it. Responses to requests
    /// issued before this point are dropped when they arrive
    fn end_session(&mut self) {
        self.session.clear();
        self.session_epoch.advance();
        self.is_admin = None;
        self.profile = None;
        self.users.clear();
        self.prediction = None;
        self.forms.profile = Default::default();
        self.forms.predict = Default::default();
    }

    fn require_session(&mut self) -> bool {
        if self.session.is_authenticated() {
            true
        } else {
            self.notify(Notification::error(MSG_LOGIN_REQUIRED));
            false
        }
    }

    fn set_state(&mut self, state: UiState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "ui state changed");
        }
        self.state = state;
    }

    fn track(&mut self, response: PendingResponse) {
        let generation = self.generations.advance(response.kind());
        self.in_flight.push(InFlight {
            generation,
            epoch: self.session_epoch.latest(),
            response,
        });
    }

    fn notify(&mut self, notification: Notification) {
        info!(?notification);
        self.notifications.push_back(notification);
    }

    fn notify_failure(&mut self, error: &crate::ClientError, fallback: &str) {
        warn!(?error, "request failed");
        self.notify(Notification::error(error.user_message(fallback)));
    }

    fn wake_fn(&self) -> impl crate::UiCallBack {
        let wake = Arc::clone(&self.wake);
        move || wake()
    }
}

impl std::fmt::Debug for UiController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiController")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("is_admin", &self.is_admin)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}
