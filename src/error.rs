//! Error types for decoding and remote game operations.

use derive_more::{Display, Error, From};
use strum::Display as StrumDisplay;
use tracing::{debug, instrument};

/// Message used when a game payload is missing or mistyping a field.
pub const INCOMPLETE_PAYLOAD: &str = "JSON data incomplete";

/// Message used for a 400 response that carries no `error` field.
pub const UNKNOWN_DOMAIN_ERROR: &str = "Unknown error";

/// A response body that could not be turned into game snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Decode error: {} at {}:{}", message, file, line)]
pub struct DecodeError {
    /// Human-readable message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DecodeError {
    /// Creates a new decode error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        debug!(error_message = %message, "Decode error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error for a payload that failed entity-shape validation.
    #[track_caller]
    pub fn incomplete() -> Self {
        Self::new(INCOMPLETE_PAYLOAD)
    }

    /// The stable, user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for DecodeError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Invalid JSON: {}", err))
    }
}

/// The server understood a request and refused it (HTTP 400).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Request rejected ({}): {}", status, message)]
pub struct DomainError {
    /// Server-supplied reason, or [`UNKNOWN_DOMAIN_ERROR`].
    pub message: String,
    /// HTTP status the rejection arrived with.
    pub status: u16,
}

impl DomainError {
    /// Creates a domain error, falling back to the generic message.
    pub fn new(message: Option<String>, status: u16) -> Self {
        Self {
            message: message.unwrap_or_else(|| UNKNOWN_DOMAIN_ERROR.to_string()),
            status,
        }
    }

    /// The message to show the player.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum ClientErrorKind {
    /// The request never completed.
    Transport,
    /// The body was unusable.
    Decode,
    /// The server refused the action.
    Domain,
}

/// Failure of a single remote game operation.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// Connectivity, DNS, timeout or body-read failure.
    #[display("Transport error: {}", _0)]
    Transport(reqwest::Error),

    /// Malformed JSON or a payload that is not a valid game.
    #[display("{}", _0)]
    Decode(DecodeError),

    /// Semantic rejection by the server.
    #[display("{}", _0)]
    Domain(DomainError),
}

impl ClientError {
    /// Which of the three failure kinds this is.
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Transport(_) => ClientErrorKind::Transport,
            ClientError::Decode(_) => ClientErrorKind::Decode,
            ClientError::Domain(_) => ClientErrorKind::Domain,
        }
    }

    /// Message suitable for showing verbatim to a player.
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(err) => err.to_string(),
            ClientError::Decode(err) => err.message().to_string(),
            ClientError::Domain(err) => err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_fallback() {
        let err = DomainError::new(None, 400);
        assert_eq!(err.message(), UNKNOWN_DOMAIN_ERROR);
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_decode_error_records_location() {
        let err = DecodeError::incomplete();
        assert_eq!(err.message(), INCOMPLETE_PAYLOAD);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains(INCOMPLETE_PAYLOAD));
    }

    #[test]
    fn test_client_error_kind_and_message() {
        let err = ClientError::from(DomainError::new(Some("letter already guessed".into()), 400));
        assert_eq!(err.kind(), ClientErrorKind::Domain);
        assert_eq!(err.message(), "letter already guessed");

        let err = ClientError::from(DecodeError::incomplete());
        assert_eq!(err.kind(), ClientErrorKind::Decode);
        assert_eq!(err.message(), INCOMPLETE_PAYLOAD);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ClientErrorKind::Transport.to_string(), "Transport");
        assert_eq!(ClientErrorKind::Decode.to_string(), "Decode");
        assert_eq!(ClientErrorKind::Domain.to_string(), "Domain");
    }
}
