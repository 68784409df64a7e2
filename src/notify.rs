//! Hooks through which the client talks back to the user interface.

/// Kind of a user-visible notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something went well.
    Success,
    /// Something failed.
    Error,
}

/// A transient, user-visible message (a toast, a status line, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Success or error.
    pub kind: NoticeKind,
    /// The text to show.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Receives notices and navigation requests from the client.
///
/// Implemented by the embedding UI. Both methods are called synchronously from
/// inside client operations and must not block.
pub trait Notifier: Send + Sync {
    /// Shows a transient notice.
    fn notify(&self, notice: &Notice);

    /// Navigates to the login entry point. Called when the session expired.
    fn redirect_to_login(&self, login_path: &str);
}

/// Default notifier: everything goes to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeKind::Error => tracing::warn!(message = %notice.message, "notice"),
        }
    }

    fn redirect_to_login(&self, login_path: &str) {
        tracing::info!(login_path, "redirect to login requested");
    }
}
