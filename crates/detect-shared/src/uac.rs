//! Shared items related to user accounts

use crate::const_config::msg::{MSG_STATUS_ACTIVE, MSG_STATUS_INACTIVE};

/// Returned by the login endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// The currently logged in user
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// One row of the admin user list
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserListRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles_name: Option<String>,
}

impl UserListRow {
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            MSG_STATUS_ACTIVE
        } else {
            MSG_STATUS_INACTIVE
        }
    }
}
