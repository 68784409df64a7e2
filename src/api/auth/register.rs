use reqwest::Method;
use serde::Serialize;

use super::{grant_from, Auth};
use crate::error::RequestError;
use crate::models::{AuthGrant, UserData};

/// A validated sign-up request.
///
/// Usually obtained from [`RegistrationForm::validate`](crate::RegistrationForm::validate).
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) phone: Option<String>,
}

impl Registration {
    /// Creates a registration without validating it.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            phone: None,
        }
    }

    /// Adds a phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// The display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .field("phone", &self.phone)
            .finish()
    }
}

impl Auth<'_> {
    /// Create an account. The response is an implicit login: it carries a
    /// token and the new user.
    pub async fn register(&self, registration: &Registration) -> Result<AuthGrant, RequestError> {
        let request = self
            .client
            .request_json(Method::POST, "/auth/register", registration);

        let envelope = self.client.send::<UserData>(request).await?;

        grant_from(envelope)
    }
}
