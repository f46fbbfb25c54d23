//! Domain error types
//!
//! This module defines the error hierarchy for the ChessERP client.
//! Errors carry plain strings and status codes so that no third-party HTTP
//! or parser types leak through the public API.

use thiserror::Error;

/// Main error type
///
/// `Auth` and `Api` are the two outcomes a collaborator has to react to
/// when a domain fetch fails. Per-item schema violations never show up
/// here; they are reported through [`crate::core::parser::ParseReport`].
#[derive(Debug, Error)]
pub enum ChessError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Login failed, the token was missing, or re-authentication failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success response, connection failure, or malformed critical envelope field
    #[error("API error [{}]: {message}{}", display_status(.status), display_detail(.detail))]
    Api {
        /// HTTP status, absent when the request never reached the server
        status: Option<u16>,
        /// Short description of the failed call
        message: String,
        /// Response body or transport detail
        detail: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Output file writing errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ChessError {
    /// Builds an [`ChessError::Api`] from a status, message and optional detail
    pub fn api(status: Option<u16>, message: impl Into<String>, detail: Option<String>) -> Self {
        ChessError::Api {
            status,
            message: message.into(),
            detail,
        }
    }

    /// HTTP status carried by an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ChessError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error is an authentication failure
    pub fn is_auth(&self) -> bool {
        matches!(self, ChessError::Auth(_))
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no response".to_string(),
    }
}

fn display_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(" - {d}"),
        _ => String::new(),
    }
}

/// Failure of the HTTP call primitive itself
///
/// Raised when a request could not be sent or its body could not be read.
/// The session layer decides whether it becomes an auth or an API error.
#[derive(Debug, Clone, Error)]
#[error("Transport failure calling {url}: {reason}")]
pub struct TransportError {
    /// Target URL of the failed request
    pub url: String,
    /// Underlying cause
    pub reason: String,
}

impl TransportError {
    /// Creates a new transport error
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ChessError {
    fn from(err: std::io::Error) -> Self {
        ChessError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ChessError {
    fn from(err: serde_json::Error) -> Self {
        ChessError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ChessError {
    fn from(err: toml::de::Error) -> Self {
        ChessError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for ChessError {
    fn from(err: csv::Error) -> Self {
        ChessError::Export(format!("CSV write error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chess_error_display() {
        let err = ChessError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_api_error_display_with_status_and_detail() {
        let err = ChessError::api(
            Some(503),
            "request to ventas/ failed",
            Some("maintenance".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "API error [status 503]: request to ventas/ failed - maintenance"
        );
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_api_error_display_without_status() {
        let err = ChessError::api(None, "connection refused", None);
        assert_eq!(err.to_string(), "API error [no response]: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_auth_error_is_auth() {
        let err = ChessError::Auth("No sessionId returned".to_string());
        assert!(err.is_auth());
        assert!(!ChessError::Io("x".to_string()).is_auth());
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::new("http://erp/login", "connection reset");
        assert_eq!(
            err.to_string(),
            "Transport failure calling http://erp/login: connection reset"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ChessError = io_err.into();
        assert!(matches!(err, ChessError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ChessError = json_err.into();
        assert!(matches!(err, ChessError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ChessError = toml_err.into();
        assert!(matches!(err, ChessError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_chess_error_implements_std_error() {
        let err = ChessError::Auth("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
