use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::User;

/// In-memory authentication state.
///
/// `user` and `token` are replaced together on login and cleared together on
/// logout. `loading` and `error` are an overlay driven by in-flight operations.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) user: Option<User>,
    pub(crate) token: Option<String>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "***REDACTED***"))
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl Session {
    /// True iff a non-empty token and a user are both present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// The logged in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether an operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last error message, until cleared.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Loading => {
                self.loading = true;
                self.error = None;
            }
            SessionAction::Authenticated { user, token } => {
                self.user = Some(user);
                self.token = Some(token);
                self.loading = false;
                self.error = None;
            }
            SessionAction::LoggedOut => *self = Self::default(),
            SessionAction::UserUpdated(newer) => {
                if let Some(user) = self.user.as_mut() {
                    user.merge(newer);
                }
            }
            SessionAction::Settled => self.loading = false,
            SessionAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            SessionAction::ClearError => self.error = None,
        }
    }
}

/// Every transition the session can go through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SessionAction {
    Loading,
    Authenticated { user: User, token: String },
    LoggedOut,
    /// Ignored while nobody is logged in.
    UserUpdated(User),
    Settled,
    Failed(String),
    ClearError,
}

/// The single session shared by a client, its stores and its interceptor.
pub(crate) type SharedSession = Arc<Mutex<Session>>;

pub(crate) fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn dispatch(session: &SharedSession, action: SessionAction) {
    lock(session).apply(action);
}
