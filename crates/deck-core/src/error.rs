//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Validation violations themselves are data, not errors: they are
//! returned as lists by `deck-schema`. `DeckError` covers the operational
//! failures around them (unreadable input, rejected documents surfaced to
//! a caller that wants a single error value).

use thiserror::Error;

/// Top-level error type for presentation document handling.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The document was rejected by the validation engine.
    #[error("document rejected: {0}")]
    SchemaValidation(String),

    /// A color string is not `#` followed by 3 or 6 hex digits.
    #[error("invalid hex color '{0}': expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
