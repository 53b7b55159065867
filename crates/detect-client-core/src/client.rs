use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use detect_shared::{
    const_config::{client::CLIENT_DEFAULT_SERVER_ADDRESS, path::PathSpec},
    errors::{ErrorBody, NotLoggedInError},
};
use futures::channel::oneshot;
use reqwest::RequestBuilder;
use std::fmt::Debug;
use tracing::{debug, info, warn};

use crate::{ClientError, Session};

pub mod api;

pub type ClientResult<T> = Result<T, ClientError>;

/// Issues the requests to the backend
///
/// Every call returns right away with a receiver that gets the outcome once
/// the response arrives and `ui_notify` is called so the UI can wake up and
/// check for it
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    server_address: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_SERVER_ADDRESS.to_string())
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String) -> Self {
        Self {
            api_client: reqwest::Client::new(),
            server_address: server_address.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, path_spec: PathSpec) -> RequestBuilder {
        self.api_client
            .request(path_spec.method, self.path_to_url(path_spec.path))
    }

    /// Builds a request carrying the session's bearer token
    fn authenticated_request(
        &self,
        path_spec: PathSpec,
        session: &Session,
    ) -> ClientResult<RequestBuilder> {
        let token = session.token().ok_or(NotLoggedInError)?;
        Ok(self.request(path_spec).bearer_auth(token.bearer()))
    }

    fn initiate_request<F, O>(&self, request: RequestBuilder, on_done: F)
    where
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<F, U>(
        &self,
        request: RequestBuilder,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<U>>
    where
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        self.initiate_request(request, on_done);
        rx
    }

    fn send_request_expect_empty<F>(
        &self,
        request: RequestBuilder,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<()>>
    where
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_empty(resp).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        self.initiate_request(request, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", self.server_address)
    }
}

/// Resolves a request without sending it (for example because it needs a
/// token and there is none)
fn resolved<T, F>(outcome: ClientResult<T>, ui_notify: F) -> oneshot::Receiver<ClientResult<T>>
where
    F: UiCallBack,
    T: Debug,
{
    let (tx, rx) = oneshot::channel();
    send_outcome(tx, outcome);
    ui_notify();
    rx
}

fn send_outcome<T: Debug>(tx: oneshot::Sender<ClientResult<T>>, msg: ClientResult<T>) {
    if let Err(msg) = tx.send(msg) {
        // Happens when the caller is no longer interested (e.g. a newer request replaced it)
        debug!(?msg, "receiver dropped before the outcome was delivered");
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> ClientResult<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> ClientResult<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    } else {
        Err(handle_error(response).await)
    }
}

/// Converts a non-2xx response into an error carrying the backend's `detail`
/// if it sent one
#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let detail = match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => error_body.message(),
            Err(e) => {
                warn!(?e, ?body, "error response body is not the expected json");
                None
            }
        },
        Err(e) => {
            warn!(?e, "failed to get response body");
            None
        }
    };
    ClientError::Server {
        status: status.as_u16(),
        detail,
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> ClientResult<(reqwest::Response, reqwest::StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.map_err(|e| ClientError::Network(e.to_string()))?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_not_doubled() {
        let client = Client::new("http://example.com/".to_string());
        assert_eq!(
            client.path_to_url("/auth/login/"),
            "http://example.com/auth/login/"
        );
    }

    #[test]
    fn authenticated_request_requires_token() {
        let client = Client::default();
        let session = Session::in_memory();
        let result = client.authenticated_request(
            detect_shared::const_config::path::PATH_AUTH_USER_ME,
            &session,
        );
        assert!(matches!(result, Err(ClientError::NotLoggedIn(_))));
    }
}
