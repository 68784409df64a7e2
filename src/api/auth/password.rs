use reqwest::Method;
use serde::de::IgnoredAny;
use serde::Serialize;

use super::Auth;
use crate::error::RequestError;

/// Current and new password of the logged in user.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub(crate) current_password: String,
    pub(crate) new_password: String,
}

impl PasswordChange {
    /// Creates a password change request.
    pub fn new(current_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

impl Auth<'_> {
    /// Change the current user's password.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), RequestError> {
        let request = self
            .client
            .request_json(Method::PUT, "/auth/change-password", change);

        self.client.send::<IgnoredAny>(request).await?;

        Ok(())
    }
}
