use secrecy::{ExposeSecret as _, SecretString};
use std::fmt::Debug;

/// Bearer token issued by the backend on login
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Value to pass to the `Authorization: Bearer` header
    pub fn bearer(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

impl From<&str> for AuthToken {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.bearer() == other.bearer()
    }
}

impl Eq for AuthToken {}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}
