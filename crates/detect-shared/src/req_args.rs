//! This module stores the expected format of the arguments for the requests.
//! Secrets are held as [`SecretString`] and only exposed when the request body
//! is built

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

/// Credentials sent as form fields to the login endpoint
#[derive(Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Clone)]
pub struct RegisterReqArgs {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegisterReqArgs {
    /// The JSON body expected by the backend
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "password": self.password.expose_secret(),
            "confirm_password": self.confirm_password.expose_secret(),
        })
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field(
                "has_confirm_password",
                &!self.confirm_password.expose_secret().is_empty(),
            )
            .finish()
    }
}

/// Changes to the current user. `None` leaves the value unchanged on the
/// backend and is sent as `null`
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UpdateUserReqArgs {
    pub new_email: Option<String>,
    pub new_name: Option<String>,
}

impl UpdateUserReqArgs {
    /// Builds the args from raw form input where a blank field means "no change"
    pub fn from_form_fields(email: &str, name: &str) -> Self {
        Self {
            new_email: non_blank(email),
            new_name: non_blank(name),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An image picked by the user to send for prediction
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new<S: Into<String>>(file_name: S, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Best effort guess of the content type from the file extension
    pub fn mime_type(&self) -> &'static str {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("bmp") => "image/bmp",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

impl Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
