use detect_shared::{const_config::path::PATH_ADMIN_USERS, uac::UserListRow};
use futures::channel::oneshot;

use crate::{
    client::{resolved, ClientResult, UiCallBack},
    Client, Session,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        session: &Session,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<Vec<UserListRow>>> {
        match self.authenticated_request(PATH_ADMIN_USERS, session) {
            Ok(request) => self.send_request_expect_json(request, ui_notify),
            Err(e) => resolved(Err(e), ui_notify),
        }
    }
}
