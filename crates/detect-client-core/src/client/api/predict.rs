use detect_shared::{
    const_config::path::PATH_PREDICTIONS_PREDICT, prediction::PredictionResponse,
    req_args::ImageUpload,
};
use futures::channel::oneshot;
use reqwest::multipart::{Form, Part};

use crate::{
    client::{resolved, ClientResult, UiCallBack},
    Client, ClientError, Session,
};

impl Client {
    /// Uploads the image as the multipart field `file`
    #[tracing::instrument(skip(ui_notify))]
    pub fn predict<F: UiCallBack>(
        &self,
        session: &Session,
        upload: ImageUpload,
        ui_notify: F,
    ) -> oneshot::Receiver<ClientResult<PredictionResponse>> {
        let request = match self.authenticated_request(PATH_PREDICTIONS_PREDICT, session) {
            Ok(request) => request,
            Err(e) => return resolved(Err(e), ui_notify),
        };
        let mime_type = upload.mime_type();
        let part = match Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(mime_type)
        {
            Ok(part) => part,
            Err(e) => return resolved(Err(ClientError::InvalidRequest(e.to_string())), ui_notify),
        };
        let form = Form::new().part("file", part);
        self.send_request_expect_json(request.multipart(form), ui_notify)
    }
}
