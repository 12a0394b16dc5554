//! # CLI Error Type
//!
//! Unified error type for startup and session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in cart-ledger                            │
//! │                                                                         │
//! │  Startup (fatal)                      Session line (recoverable)        │
//! │  ───────────────                      ──────────────────────────        │
//! │  config.toml unreadable ──┐           "pay abc" ──► PARSE_ERROR         │
//! │  catalog.json invalid ────┼─► exit 1  "frobnicate" ► UNKNOWN_COMMAND    │
//! │  script file missing ─────┘                 │                           │
//! │                                             ▼                           │
//! │                                   "line 3: [PARSE_ERROR] ..." on stderr │
//! │                                   session continues                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `code` is machine-readable and is what JSON output reports.

use std::fmt;
use std::path::Path;

use ledger_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Error reported by the CLI.
///
/// ## Serialization
/// ```json
/// { "code": "PARSE_ERROR", "message": "amount has invalid format: ..." }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Config file unreadable or invalid
    ConfigError,

    /// Catalog data rejected
    CatalogError,

    /// File or terminal I/O failed
    IoError,

    /// Session command arguments malformed
    ParseError,

    /// Session command not recognized
    UnknownCommand,

    /// Output could not be produced
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::UnknownCommand => "UNKNOWN_COMMAND",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::CatalogError, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ParseError, message)
    }

    pub fn unknown_command(name: &str) -> Self {
        CliError::new(
            ErrorCode::UnknownCommand,
            format!("unknown command '{}' (try 'help')", name),
        )
    }

    /// I/O failure tied to a file.
    pub fn file(path: &Path, err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, format!("{}: {}", path.display(), err))
    }
}

/// Core errors only surface while building the catalog.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::catalog(err.to_string())
    }
}

/// Validation errors surface while parsing session arguments.
impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::parse(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to encode output: {}", err);
        CliError::new(ErrorCode::Internal, "Failed to encode output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::unknown_command("frobnicate");
        assert_eq!(
            err.to_string(),
            "[UNKNOWN_COMMAND] unknown command 'frobnicate' (try 'help')"
        );
    }

    #[test]
    fn test_serializes_code_and_message() {
        let err = CliError::parse("bad amount");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"PARSE_ERROR","message":"bad amount"}"#);
    }

    #[test]
    fn test_core_error_maps_to_catalog_code() {
        let core = CoreError::Validation(ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "1".to_string(),
        });
        let err: CliError = core.into();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(err.message.contains("product id '1' already exists"));
    }

    #[test]
    fn test_validation_error_maps_to_parse_code() {
        let err: CliError = ValidationError::Required {
            field: "amount".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ParseError);
        assert_eq!(err.message, "amount is required");
    }
}
