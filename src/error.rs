//! Various errors module.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub use crate::validation::{FieldError, ValidationErrors};

/// Message surfaced when the server gives no usable explanation for a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Message surfaced when a request is rejected with a 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Body of an error response returned by the `ReefStars` API.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorResponse {
    /// Human readable explanation, when the server provides one.
    pub message: Option<String>,
}

/// Represents errors when interacting with the `ReefStars` API.
///
/// Every failure that goes through the gateway client ends up as one of these
/// variants, after the response interceptor has had its say.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Communication with the API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    ///
    /// Also used for requests refused locally before being sent.
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Communication with the API was successful,
    /// but returned a [401 Unauthorized]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401") HTTP error response.
    ///
    /// Carries the message of the response body, if any. The session has
    /// already been cleared by the time this is returned.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("the session is invalid or has expired."))]
    Unauthorized(Option<String>),
    /// Communication with the API was successful,
    /// but returned a [403 Forbidden]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403") HTTP error response.
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Communication with the API was successful,
    /// but returned a [404 Not Found]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404") HTTP error response.
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Too many requests were sent to the API.
    ///
    /// The server is rate limiting requests. Wait before retrying.
    #[error("Too Many Requests: The server is rate limiting requests. Please wait before retrying.")]
    TooManyRequests,
    /// The API failed with a 5xx status.
    #[error("Server Error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response, or a generic fallback.
        message: String,
    },
    /// Any other non-success status.
    #[error("Unexpected Status ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response, or a generic fallback.
        message: String,
    },
    /// The API answered 2xx but flagged the request as unsuccessful (`success: false`).
    #[error("Rejected: {}", .0.as_deref().unwrap_or("the request was not successful"))]
    Rejected(Option<String>),
    /// The request did not complete within the configured timeout.
    #[error("Timeout: the API did not answer in time.")]
    Timeout,
    /// Communication with the API failed.
    ///
    /// This could be caused by an internet outage, a wrong base URL and similar errors.
    #[error("Unreachable: {0}")]
    Unreachable(String),
    /// The response could not be parsed into the expected data structure.
    #[error("Parse Error: Could not parse response into the expected data structure. {0}")]
    ParseError(String),
}

impl RequestError {
    /// Builds the error matching a non-success HTTP status, given the message
    /// extracted from the response body, if any.
    pub(crate) fn from_status(status: StatusCode, server_message: Option<String>) -> Self {
        let message = || {
            server_message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
        };

        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message()),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(server_message.clone()),
            StatusCode::FORBIDDEN => Self::Forbidden(message()),
            StatusCode::NOT_FOUND => Self::NotFound(message()),
            StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests,
            status if status.is_server_error() => Self::Server {
                status: status.as_u16(),
                message: message(),
            },
            status => Self::Status {
                status: status.as_u16(),
                message: message(),
            },
        }
    }

    /// Maps a transport level `reqwest` failure.
    pub(crate) fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Unreachable("Failed to connect to server".to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::Unreachable(error.to_string())
        }
    }

    /// The explanation supplied by the server, if the failure carries one.
    ///
    /// Locally produced fallbacks (`An error occurred`, transport errors, ...)
    /// are not server messages.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Server { message, .. }
            | Self::Status { message, .. } => message.as_str(),
            Self::Rejected(message) | Self::Unauthorized(message) => message.as_deref()?,
            Self::TooManyRequests
            | Self::Timeout
            | Self::Unreachable(_)
            | Self::ParseError(_) => return None,
        };

        (message != GENERIC_ERROR_MESSAGE).then_some(message)
    }

    /// The message to show the user for this failure.
    ///
    /// A 401 always reads as an expired session, whatever the server said.
    #[must_use]
    pub fn display_message(&self) -> String {
        if matches!(self, Self::Unauthorized(_)) {
            return SESSION_EXPIRED_MESSAGE.to_string();
        }

        if let Some(message) = self.server_message() {
            return message.to_string();
        }

        match self {
            Self::TooManyRequests => "Too many requests, please wait before retrying".to_string(),
            Self::Timeout => "The request timed out".to_string(),
            Self::Unreachable(message) => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the failure says nothing definitive about the request itself:
    /// the network, a timeout, rate limiting or a server-side error.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Unreachable(_) | Self::TooManyRequests | Self::Server { .. }
        )
    }
}

/// Errors raised by a [`SessionStorage`](crate::SessionStorage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A value could not be serialized for storage.
    #[error("Could not serialize session data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while building a [`ClientConfig`](crate::ClientConfig) or the client itself.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base URL does not start with `http://` or `https://`.
    #[error("Invalid base_url '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),
    /// The request timeout is zero or could not be parsed.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_keeps_server_message() {
        let error = RequestError::from_status(StatusCode::BAD_REQUEST, Some("Email taken".into()));
        assert!(matches!(error, RequestError::BadRequest(ref m) if m == "Email taken"));
        assert_eq!(error.server_message(), Some("Email taken"));

        let error = RequestError::from_status(StatusCode::BAD_GATEWAY, None);
        assert!(matches!(error, RequestError::Server { status: 502, .. }));
        assert_eq!(error.server_message(), None);
        assert_eq!(error.display_message(), GENERIC_ERROR_MESSAGE);
        assert!(error.is_transient());
    }

    #[test]
    fn unauthorized_displays_session_expired() {
        let error = RequestError::from_status(StatusCode::UNAUTHORIZED, Some("jwt expired".into()));
        assert!(matches!(error, RequestError::Unauthorized(Some(ref m)) if m == "jwt expired"));
        assert_eq!(error.server_message(), Some("jwt expired"));
        assert_eq!(error.display_message(), SESSION_EXPIRED_MESSAGE);

        let error = RequestError::from_status(StatusCode::UNAUTHORIZED, None);
        assert_eq!(error.server_message(), None);
        assert!(!error.is_transient());
    }

    #[test]
    fn rejected_without_message_has_no_server_message() {
        assert_eq!(RequestError::Rejected(None).server_message(), None);
        assert_eq!(
            RequestError::Rejected(Some("Nope".into())).server_message(),
            Some("Nope")
        );
    }
}
