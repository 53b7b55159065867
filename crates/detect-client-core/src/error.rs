use detect_shared::errors::NotLoggedInError;

/// Categorized failure of a request to the backend
///
/// Kept `Clone` so the same failure can be both logged and shown to the user
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never got a response (connection refused, DNS, CORS etc.)
    #[error("failed to send request: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("{}", server_error_text(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    /// A 2xx response whose body could not be understood
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The request could not be built
    #[error("failed to build request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    NotLoggedIn(#[from] NotLoggedInError),

    #[error("request was dropped before a response arrived")]
    Canceled,
}

fn server_error_text(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("request failed with status code: {status}"),
    }
}

impl ClientError {
    /// Text to show the user. Server provided details are shown as is, failures
    /// that have no meaningful text for the user get `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::NotLoggedIn(e) => e.to_string(),
            ClientError::Server { detail: None, .. }
            | ClientError::Network(_)
            | ClientError::Parse(_)
            | ClientError::InvalidRequest(_)
            | ClientError::Canceled => fallback.to_string(),
        }
    }

    /// Returns `true` if the backend rejected the credentials (HTTP 401)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status: 401, .. })
    }
}
