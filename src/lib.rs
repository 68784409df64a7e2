//! `reefstars-client` is the session store and API client of the `ReefStars`
//! coral-conservation platform.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::error::Error;
//!
//! use reefstars_client::{ClientConfig, Credentials, FileStorage, ReefStars};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct ReefStar {
//!     name: String,
//!     region: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let client = ReefStars::new(
//!         ClientConfig::from_env()?,
//!         FileStorage::open("session.json"),
//!     )?;
//!
//!     let session = client.session_store();
//!     if !session.restore_and_verify().await {
//!         let outcome = session
//!             .login(&Credentials::new("YOUR_EMAIL", "YOUR_PASSWORD"))
//!             .await;
//!         println!("{outcome:?}");
//!     }
//!
//!     let reef_star: ReefStar = client.reef_stars().get_by_qr("RS4F2K9A").await?;
//!     println!("{} lives in {}", reef_star.name, reef_star.region);
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

use std::sync::{Arc, Mutex};

pub use api::auth::{Auth, Credentials, PasswordChange, ProfileUpdate, Registration};
pub use api::list::ListRequest;
pub use api::resources::{
    CompaniesApi, CoralUpdatesApi, ReefStarsApi, StatsApi, StatsFilter, UploadsApi,
};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::*;
pub use models::{AuthGrant, Listing, User};
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier};
pub use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
pub use session::{AuthOutcome, Session, SessionStore};
use session::{SessionAction, SharedSession};
pub use storage::{load_session, FileStorage, MemoryStorage, SessionStorage, StoredSession};
pub use validation::{
    password_strength, PasswordChangeForm, PasswordChecks, PasswordStrength, ProfileForm,
    RegistrationForm,
};

use crate::models::Envelope;

pub(crate) mod api;
pub mod config;
pub mod error;
pub(crate) mod models;
pub mod notify;
pub(crate) mod session;
pub mod storage;
pub mod validation;

/// A `ReefStars` API client: the single gateway every request goes through.
///
/// Every request built by the client carries the bearer token found in durable
/// storage at dispatch time. Every response goes through one interceptor: a
/// 401 clears the session, asks the [`Notifier`] to redirect to the login page
/// and surfaces a "session expired" notice; any other failure is surfaced as a
/// notice with the server's message. In both cases the caller still gets the
/// error back.
///
/// Cloning is cheap and clones share the same session and storage.
///
/// The `Debug` implementation for this struct redacts the session to prevent
/// accidental exposure of the token in logs.
#[derive(Clone)]
pub struct ReefStars {
    pub(crate) config: ClientConfig,
    pub(crate) storage: Arc<dyn SessionStorage>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) session: SharedSession,
    pub(crate) reqwest_client: reqwest::Client,
}

impl std::fmt::Debug for ReefStars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReefStars")
            .field("config", &self.config)
            .field("session", &"***REDACTED***")
            .field("storage", &"SessionStorage")
            .field("reqwest_client", &"Client")
            .finish()
    }
}

impl ReefStars {
    /// Creates a new client from its configuration and the durable storage
    /// holding the session.
    ///
    /// # Example
    /// ```rust
    /// use reefstars_client::{ClientConfig, MemoryStorage, ReefStars};
    ///
    /// let config = ClientConfig::builder()
    ///     .base_url("http://localhost:5000/api")
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ReefStars::new(config, MemoryStorage::new()).unwrap();
    /// assert!(!client.session().is_authenticated());
    /// ```
    pub fn new(
        config: ClientConfig,
        storage: impl SessionStorage + 'static,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self::new_with_client(config, storage, client))
    }

    /// Creates a new client with a custom reqwest client.
    ///
    /// The configured timeouts are not applied to `client`; set them on it.
    #[must_use]
    pub fn new_with_client(
        config: ClientConfig,
        storage: impl SessionStorage + 'static,
        client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            storage: Arc::new(storage),
            notifier: Arc::new(LogNotifier),
            session: Arc::new(Mutex::new(Session::default())),
            reqwest_client: client,
        }
    }

    /// Replaces the [`Notifier`] receiving notices and login redirects.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The durable storage backing the session.
    #[must_use]
    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    /// A snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        session::lock(&self.session).clone()
    }

    /// The session store operating on this client's session.
    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.clone())
    }

    /// Resolves an image reference returned by the API into a URL.
    ///
    /// Absolute URLs are returned unchanged; anything else is a path under the
    /// server's `/uploads` directory.
    ///
    /// # Example
    /// ```rust
    /// use reefstars_client::{ClientConfig, MemoryStorage, ReefStars};
    ///
    /// let client = ReefStars::new(ClientConfig::default(), MemoryStorage::new()).unwrap();
    ///
    /// assert_eq!(
    ///     client.image_url(Some("corals/a.jpg")).as_deref(),
    ///     Some("http://localhost:5000/uploads/corals/a.jpg")
    /// );
    /// assert_eq!(client.image_url(None), None);
    /// ```
    #[must_use]
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        let path = path.filter(|path| !path.is_empty())?;

        if path.starts_with("http") {
            return Some(path.to_string());
        }

        Some(format!(
            "{}/uploads/{}",
            self.config.uploads_origin(),
            path.trim_start_matches('/')
        ))
    }

    /// Bearer token currently in durable storage, if any.
    pub(crate) fn stored_token(&self) -> Option<String> {
        self.storage
            .get(storage::TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }
}

impl ReefStars {
    /// Adds the authorization token to the request, if one is stored.
    ///
    /// The token is read from storage on every call, so a token written by the
    /// session store is used by the very next request.
    pub(crate) fn with_authorization_token(
        &self,
        request_builder: RequestBuilder,
    ) -> RequestBuilder {
        if let Some(token) = self.stored_token() {
            request_builder.bearer_auth(token)
        } else {
            request_builder
        }
    }

    /// Creates a request builder for `path`, relative to the base URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_builder = self
            .reqwest_client
            .request(method, self.endpoint(path))
            .header("Accept", "application/json");

        self.with_authorization_token(request_builder)
    }

    /// Creates a GET request builder with optional query parameters.
    pub(crate) fn request_get(&self, path: &str, query: &[(String, String)]) -> RequestBuilder {
        let request_builder = self.request(Method::GET, path);

        if query.is_empty() {
            request_builder
        } else {
            request_builder.query(query)
        }
    }

    /// Creates a request builder with a JSON body.
    pub(crate) fn request_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    /// Creates a request builder with a multipart form body.
    pub(crate) fn request_form(&self, method: Method, path: &str, form: Form) -> RequestBuilder {
        self.request(method, path).multipart(form)
    }

    /// Dispatches a request and runs the response interceptor.
    ///
    /// Returns the decoded envelope of a successful (2xx, `success: true`)
    /// response. Every other outcome is mapped to a [`RequestError`] after the
    /// interceptor has handled it.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<Envelope<T>, RequestError> {
        let request = request_builder
            .build()
            .map_err(|error| self.intercept(RequestError::from_transport(&error)))?;

        tracing::debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let response = match self.reqwest_client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "request failed before a response was received");
                return Err(self.intercept(RequestError::from_transport(&error)));
            }
        };

        let status = response.status();

        if !status.is_success() {
            tracing::warn!(%status, url = %response.url(), "request rejected by the API");

            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());

            return Err(self.intercept(RequestError::from_status(status, message)));
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|error| self.intercept(RequestError::from_transport(&error)))?;

        if !envelope.success {
            return Err(self.intercept(RequestError::Rejected(envelope.message)));
        }

        Ok(envelope)
    }

    /// Dispatches a request and returns the envelope's `data`.
    pub(crate) async fn send_data<T: DeserializeOwned>(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<T, RequestError> {
        self.send::<T>(request_builder)
            .await?
            .data
            .ok_or_else(|| {
                self.intercept(RequestError::ParseError("response has no data".to_string()))
            })
    }

    /// The response interceptor. Handles the failure globally, then hands it
    /// back so the caller's own error path still runs.
    fn intercept(&self, error: RequestError) -> RequestError {
        if matches!(error, RequestError::Unauthorized(_)) {
            self.expire_session();
        } else {
            self.notifier.notify(&Notice::error(error.display_message()));
        }

        error
    }

    /// Forced logout after a 401.
    fn expire_session(&self) {
        {
            let mut session = session::lock(&self.session);
            storage::clear_session(self.storage.as_ref());
            session.apply(SessionAction::LoggedOut);
        }

        tracing::info!("session expired, stored credentials cleared");

        self.notifier.redirect_to_login(self.config.login_path());
        self.notifier.notify(&Notice::error(SESSION_EXPIRED_MESSAGE));
    }
}
