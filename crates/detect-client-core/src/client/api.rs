use detect_shared::{
    const_config::path::{
        PATH_AUTH_LOGIN, PATH_AUTH_REGISTER, PATH_AUTH_USER_ME, PATH_AUTH_USER_ME_UPDATE,
    },
    req_args::{LoginReqArgs, RegisterReqArgs, UpdateUserReqArgs},
    uac::{TokenInfo, UserProfile},
};
use futures::channel::oneshot;
use reqwest::multipart::Form;
use secrecy::ExposeSecret as _;

use super::{resolved, ClientResult};
use crate::{client::UiCallBack, Client, Session};

pub mod admin;
pub mod predict;

impl Client {
    /// Sends the credentials as form fields. The caller decides what to do
    /// with the token (see [`Session::set_token`])
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<TokenInfo>> {
        let form = Form::new()
            .text("email", args.email)
            .text("password", args.password.expose_secret().to_string());
        let request = self.request(PATH_AUTH_LOGIN).multipart(form);
        self.send_request_expect_json(request, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: &RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<()>> {
        let request = self.request(PATH_AUTH_REGISTER).json(&args.to_json());
        self.send_request_expect_empty(request, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn current_user<F: UiCallBack>(
        &self,
        session: &Session,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<UserProfile>> {
        match self.authenticated_request(PATH_AUTH_USER_ME, session) {
            Ok(request) => self.send_request_expect_json(request, ui_notify),
            Err(e) => resolved(Err(e), ui_notify),
        }
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user<F: UiCallBack>(
        &self,
        session: &Session,
        args: &UpdateUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<()>> {
        match self.authenticated_request(PATH_AUTH_USER_ME_UPDATE, session) {
            Ok(request) => self.send_request_expect_empty(request.json(args), ui_notify),
            Err(e) => resolved(Err(e), ui_notify),
        }
    }
}
