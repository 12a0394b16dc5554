//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledger-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog construction / config decoding          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  ledger-cli errors (app crate)                                          │
//! │  └── CliError         - What the terminal sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! Cart operations and `pay` are infallible. Unknown product ids are silent
//! no-ops and every tendered amount is accepted. Errors only arise while
//! building a catalog or parsing text input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while assembling ledger inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog JSON could not be decoded.
    #[error("Invalid catalog data: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// A catalog product failed validation.
    ///
    /// ## When This Occurs
    /// ```text
    /// catalog.json
    ///   { "id": 3, "name": "", ... }
    ///      │
    ///      ▼
    /// InvalidProduct { id: 3, source: Required { field: "name" } }
    ///      │
    ///      ▼
    /// CLI shows: "Product 3 is invalid: name is required"
    /// ```
    #[error("Product {id} is invalid: {source}")]
    InvalidProduct {
        id: u32,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
