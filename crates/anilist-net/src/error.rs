//! Error types shared by the transport and the client facade.

use std::fmt;
use std::time::Duration;

use anilist_core::MappingError;

use crate::response::{GraphQLError, join_messages};

/// Every failure an AniList call can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a usable HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with GraphQL errors or a non-success status.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The operation needs a bearer token and none is attached.
    #[error("`{operation}` requires an authenticated client")]
    AuthenticationRequired { operation: String },

    /// A single-entity lookup matched nothing.
    #[error("{entity} `{key}` not found")]
    NotFound { entity: &'static str, key: String },

    /// The response did not fit the expected types.
    #[error("failed to map response: {0}")]
    Mapping(#[from] MappingError),

    /// Invalid endpoint, header or other client setting.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Network-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request failed: {0}")]
    Request(String),
    /// The body could not be read or is not a GraphQL response.
    #[error("invalid response body: {0}")]
    Body(String),
}

/// Errors reported by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// HTTP status, when it was not a success.
    pub status: Option<u16>,
    /// GraphQL errors from the response body; may be empty for bare HTTP
    /// failures.
    pub errors: Vec<GraphQLError>,
    /// `Retry-After` advertised alongside the failure.
    pub retry_after: Option<Duration>,
}

impl RemoteError {
    /// All error messages joined with `"; "`.
    pub fn message(&self) -> String {
        join_messages(&self.errors)
    }

    /// Status from the HTTP response or, failing that, the first GraphQL
    /// error that carries one.
    pub fn status(&self) -> Option<u16> {
        self.status
            .or_else(|| self.errors.iter().find_map(|error| error.status))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.errors.is_empty()) {
            (Some(status), true) => write!(f, "remote service returned HTTP {status}"),
            (Some(status), false) => write!(f, "remote error (HTTP {status}): {}", self.message()),
            (None, _) => write!(f, "remote error: {}", self.message()),
        }
    }
}

impl std::error::Error for RemoteError {}

impl Error {
    /// Create a not-found error.
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Create an authentication-required error.
    pub fn authentication_required(operation: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            operation: operation.into(),
        }
    }

    /// HTTP or GraphQL status of a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote(remote) => remote.status(),
            _ => None,
        }
    }

    /// Whether the entity does not exist, either locally detected or
    /// reported by the service.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Remote(remote) => remote.is_not_found(),
            _ => false,
        }
    }

    /// How long the service asked callers to wait, for rate-limited calls.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Remote(remote) => remote.retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::from(err))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid endpoint URL: {err}"))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::Config(format!("invalid header name: {err}"))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::Config(format!("invalid header value: {err}"))
    }
}

/// A specialized Result type for AniList operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: Option<u16>, messages: &[&str]) -> RemoteError {
        RemoteError {
            status,
            errors: messages.iter().map(|m| GraphQLError::new(*m)).collect(),
            retry_after: None,
        }
    }

    #[test]
    fn test_remote_display() {
        assert_eq!(
            remote(None, &["not found"]).to_string(),
            "remote error: not found"
        );
        assert_eq!(
            remote(Some(500), &[]).to_string(),
            "remote service returned HTTP 500"
        );
        assert_eq!(
            remote(Some(400), &["a", "b"]).to_string(),
            "remote error (HTTP 400): a; b"
        );
    }

    #[test]
    fn test_status_falls_back_to_graphql_error() {
        let mut error = remote(None, &["Not Found."]);
        error.errors[0].status = Some(404);
        assert!(Error::Remote(error).is_not_found());
    }

    #[test]
    fn test_retry_after() {
        let error = Error::Remote(RemoteError {
            status: Some(429),
            errors: Vec::new(),
            retry_after: Some(Duration::from_secs(30)),
        });
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(error.status(), Some(429));
        assert_eq!(Error::not_found("Media", 1).retry_after(), None);
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(Error::not_found("Media", 7).to_string(), "Media `7` not found");
    }
}
