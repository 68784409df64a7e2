use super::state::{dispatch, lock, Session, SessionAction};
use crate::api::auth::{Credentials, PasswordChange, ProfileUpdate, Registration};
use crate::error::RequestError;
use crate::models::{AuthGrant, User};
use crate::notify::Notice;
use crate::storage::{self, StoredSession};
use crate::ReefStars;

const PERSIST_FAILED_MESSAGE: &str = "Could not persist the session";
const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Result of a session operation.
///
/// Operations never panic and never return `Err`: a failure carries the
/// message to render next to the form that triggered it.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The operation went through.
    Success,
    /// The operation failed. The same message is stored as the session error.
    Failure {
        /// Server supplied message, or a fallback naming the operation.
        error: String,
    },
}

impl AuthOutcome {
    /// Whether the operation went through.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error.as_str()),
        }
    }
}

/// The single source of truth for who is logged in.
///
/// Every credential-bearing operation goes through here so that the
/// in-memory [`Session`] and durable storage stay in agreement. All stores
/// built from the same [`ReefStars`] client share one session; so does the
/// client's 401 interceptor.
///
/// `loading` is set while an operation is in flight. It is meant to gate
/// resubmission in the UI and is not a lock: when two mutations race, the
/// last response wins.
///
/// # Example
/// ```rust,ignore
/// let store = client.session_store();
///
/// if !store.restore_and_verify().await {
///     let outcome = store
///         .login(&Credentials::new("YOUR_EMAIL", "YOUR_PASSWORD"))
///         .await;
///
///     if let Some(error) = outcome.error() {
///         eprintln!("{error}");
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SessionStore {
    client: ReefStars,
}

impl SessionStore {
    /// Creates a store over the session of `client`.
    #[must_use]
    pub const fn new(client: ReefStars) -> Self {
        Self { client }
    }

    /// A snapshot of the session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        lock(&self.client.session).clone()
    }

    /// True iff a user and a non-empty token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        lock(&self.client.session).is_authenticated()
    }

    /// The logged in user.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        lock(&self.client.session).user.clone()
    }

    /// The bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        lock(&self.client.session).token.clone()
    }

    /// Whether an operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.client.session).loading
    }

    /// Last error message.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        lock(&self.client.session).error.clone()
    }

    fn dispatch(&self, action: SessionAction) {
        dispatch(&self.client.session, action);
    }

    /// Loads the session left in durable storage by a previous run.
    ///
    /// A valid snapshot is trusted optimistically: the session is authenticated
    /// right away and should then be checked with [`verify`](Self::verify). A
    /// corrupt or half-written snapshot is wiped, in memory and in storage.
    /// No request is sent.
    ///
    /// Returns whether a session was restored.
    pub fn restore(&self) -> bool {
        match storage::load_session(self.client.storage()) {
            StoredSession::Valid { token, user } => {
                tracing::info!(user_id = %user.id, "session restored from storage");
                self.dispatch(SessionAction::Authenticated { user, token });
                true
            }
            StoredSession::Empty => false,
            StoredSession::Corrupt | StoredSession::Partial => {
                tracing::warn!("discarding unusable stored session");
                self.clear();
                false
            }
        }
    }

    /// [`restore`](Self::restore), then [`verify`](Self::verify) if anything
    /// was restored.
    ///
    /// Returns whether the session is authenticated once both are done.
    pub async fn restore_and_verify(&self) -> bool {
        if self.restore() {
            if let AuthOutcome::Failure { error } = self.verify().await {
                tracing::debug!(%error, "restored session did not verify");
            }
        }

        self.is_authenticated()
    }

    /// Checks the current token against the server and refreshes the user.
    ///
    /// A definitive refusal (401, 403, 404, a rejected or unreadable answer)
    /// logs out. A transient failure (network, timeout, 429, 5xx) keeps the
    /// session unless
    /// [`logout_on_transient_verify_failure`](crate::ClientConfigBuilder::logout_on_transient_verify_failure)
    /// is enabled.
    pub async fn verify(&self) -> AuthOutcome {
        if self.token().is_none() {
            return AuthOutcome::Failure {
                error: NOT_AUTHENTICATED_MESSAGE.to_string(),
            };
        }

        match self.client.auth().profile().await {
            Ok(user) => match self.refresh_user(user) {
                Ok(()) => AuthOutcome::Success,
                Err(error) => AuthOutcome::Failure {
                    error: error.to_string(),
                },
            },
            Err(error)
                if error.is_transient()
                    && !self.client.config.logout_on_transient_verify_failure() =>
            {
                tracing::warn!(%error, "could not verify the session, keeping it");
                AuthOutcome::Failure {
                    error: error.display_message(),
                }
            }
            Err(error) => {
                tracing::info!(%error, "session failed verification");
                self.clear();
                AuthOutcome::Failure {
                    error: error.display_message(),
                }
            }
        }
    }

    /// Logs in with email and password.
    ///
    /// On success the token and user are written to storage, then the session
    /// becomes authenticated. On failure only `error` changes.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        self.dispatch(SessionAction::Loading);

        match self.client.auth().login(credentials).await {
            Ok(grant) => self.establish(grant, "Welcome back to ReefStars!"),
            Err(error) => self.fail(&error, "Login failed"),
        }
    }

    /// Creates an account. A successful registration is an implicit login.
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        self.dispatch(SessionAction::Loading);

        match self.client.auth().register(registration).await {
            Ok(grant) => self.establish(grant, "Welcome to ReefStars!"),
            Err(error) => self.fail(&error, "Registration failed"),
        }
    }

    /// Ends the session. Never fails and sends nothing the caller waits for.
    ///
    /// Both storage keys are removed together and the session is reset. When
    /// enabled, the server is told in the background.
    pub fn logout(&self) {
        let token = self.token().or_else(|| self.client.stored_token());
        let had_session = token.is_some() || self.user().is_some();

        self.clear();

        if had_session {
            tracing::info!("logged out");
            self.client
                .notifier
                .notify(&Notice::success("Logged out successfully"));
        }

        if let Some(token) = token.filter(|_| self.client.config.notify_server_on_logout()) {
            self.client.auth().notify_logout(token);
        }
    }

    /// Updates the profile of the logged in user.
    ///
    /// On failure the session is left as it was, apart from `error`. The
    /// update also fails when the refreshed user cannot be written to storage
    /// or the session was closed while the request was in flight.
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthOutcome {
        self.dispatch(SessionAction::Loading);

        match self.client.auth().update_profile(update).await {
            Ok(user) => {
                if let Err(error) = self.refresh_user(user) {
                    self.dispatch(SessionAction::Failed(error.to_string()));
                    return AuthOutcome::Failure {
                        error: error.to_string(),
                    };
                }
                self.dispatch(SessionAction::Settled);
                self.client
                    .notifier
                    .notify(&Notice::success("Profile updated successfully"));
                AuthOutcome::Success
            }
            Err(error) => self.fail(&error, "Profile update failed"),
        }
    }

    /// Changes the password of the logged in user. Token and user are untouched.
    pub async fn change_password(&self, change: &PasswordChange) -> AuthOutcome {
        self.dispatch(SessionAction::Loading);

        match self.client.auth().change_password(change).await {
            Ok(()) => {
                self.dispatch(SessionAction::Settled);
                self.client
                    .notifier
                    .notify(&Notice::success("Password changed successfully"));
                AuthOutcome::Success
            }
            Err(error) => self.fail(&error, "Password change failed"),
        }
    }

    /// Forgets the last error.
    pub fn clear_error(&self) {
        self.dispatch(SessionAction::ClearError);
    }

    /// Writes a new session through to storage, then to memory.
    fn establish(&self, grant: AuthGrant, welcome: &str) -> AuthOutcome {
        let AuthGrant { token, user } = grant;

        {
            let mut session = lock(&self.client.session);

            if let Err(error) = storage::persist_session(self.client.storage(), &token, &user) {
                tracing::warn!(%error, "failed to persist the new session");
                storage::clear_session(self.client.storage());
                session.apply(SessionAction::Failed(PERSIST_FAILED_MESSAGE.to_string()));
                return AuthOutcome::Failure {
                    error: PERSIST_FAILED_MESSAGE.to_string(),
                };
            }

            tracing::info!(user_id = %user.id, "session established");
            session.apply(SessionAction::Authenticated { user, token });
        }

        self.client.notifier.notify(&Notice::success(welcome));

        AuthOutcome::Success
    }

    /// Merges a fresher user into storage, then into the session.
    ///
    /// Nothing changes when the session was closed while the request was in
    /// flight, or when storage refuses the merged user.
    fn refresh_user(&self, user: User) -> Result<(), &'static str> {
        let mut session = lock(&self.client.session);

        let Some(mut merged) = session.user.clone().filter(|_| session.is_authenticated()) else {
            tracing::debug!("session closed meanwhile, dropping user refresh");
            return Err(NOT_AUTHENTICATED_MESSAGE);
        };
        merged.merge(user);

        if let Err(error) = storage::persist_user(self.client.storage(), &merged) {
            tracing::warn!(%error, "failed to persist the refreshed user");
            return Err(PERSIST_FAILED_MESSAGE);
        }

        session.apply(SessionAction::UserUpdated(merged));
        Ok(())
    }

    fn fail(&self, error: &RequestError, fallback: &str) -> AuthOutcome {
        let message = error.server_message().unwrap_or(fallback).to_string();

        self.dispatch(SessionAction::Failed(message.clone()));

        AuthOutcome::Failure { error: message }
    }

    /// Wipes the session in storage and memory, without notice.
    fn clear(&self) {
        let mut session = lock(&self.client.session);
        storage::clear_session(self.client.storage());
        session.apply(SessionAction::LoggedOut);
    }
}
