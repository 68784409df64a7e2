use reqwest::Method;
use serde::Serialize;

use super::{grant_from, Auth};
use crate::error::RequestError;
use crate::models::{AuthGrant, UserData};

/// Email and password of an account.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The login identifier.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

impl Auth<'_> {
    /// Authenticate with **email** and **password**.
    ///
    /// This only performs the request. [`SessionStore::login`](crate::SessionStore::login)
    /// also stores the returned session.
    ///
    /// # Example
    /// ```rust,ignore
    /// let grant = client
    ///     .auth()
    ///     .login(&Credentials::new("YOUR_EMAIL", "YOUR_PASSWORD"))
    ///     .await?;
    ///
    /// println!("Logged in as {}", grant.user.full_name);
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, RequestError> {
        let request = self
            .client
            .request_json(Method::POST, "/auth/login", credentials);

        let envelope = self.client.send::<UserData>(request).await?;

        grant_from(envelope)
    }
}
