//! # Violation Model
//!
//! The shape of a single contract breach ([`ValidationError`]) and the
//! error type returned by the loading and acceptance helpers
//! ([`SchemaValidationError`]).
//!
//! Violations are plain data. They serialize with camelCase keys
//! (`instancePath`, `keyword`, `params`, ...) so UI callers can map
//! `instancePath` straight onto form fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The rule category that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Keyword {
    Type,
    Required,
    Pattern,
    Minimum,
    Maximum,
    MinLength,
    MaxLength,
    MinItems,
    Enum,
    AdditionalProperties,
}

impl Keyword {
    /// Wire name, as it appears in serialized violations.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Type => "type",
            Keyword::Required => "required",
            Keyword::Pattern => "pattern",
            Keyword::Minimum => "minimum",
            Keyword::Maximum => "maximum",
            Keyword::MinLength => "minLength",
            Keyword::MaxLength => "maxLength",
            Keyword::MinItems => "minItems",
            Keyword::Enum => "enum",
            Keyword::AdditionalProperties => "additionalProperties",
        }
    }

    /// Taxonomy bucket for this keyword.
    pub fn kind(self) -> ViolationKind {
        match self {
            Keyword::Type => ViolationKind::TypeMismatch,
            Keyword::Required => ViolationKind::RequiredMissing,
            Keyword::Pattern => ViolationKind::PatternMismatch,
            Keyword::Minimum | Keyword::Maximum => ViolationKind::RangeViolation,
            Keyword::MinLength | Keyword::MaxLength | Keyword::MinItems => {
                ViolationKind::LengthViolation
            }
            Keyword::Enum => ViolationKind::EnumViolation,
            Keyword::AdditionalProperties => ViolationKind::UnexpectedProperty,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of violations, used by callers to assign severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    TypeMismatch,
    RequiredMissing,
    PatternMismatch,
    RangeViolation,
    LengthViolation,
    EnumViolation,
    UnexpectedProperty,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::TypeMismatch => "type-mismatch",
            ViolationKind::RequiredMissing => "required-missing",
            ViolationKind::PatternMismatch => "pattern-mismatch",
            ViolationKind::RangeViolation => "range-violation",
            ViolationKind::LengthViolation => "length-violation",
            ViolationKind::EnumViolation => "enum-violation",
            ViolationKind::UnexpectedProperty => "unexpected-property",
        }
    }
}

/// Keyword-specific detail attached to a violation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorParams {
    /// Expected type, for `type` violations.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
    /// Violated bound, for range and length violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    /// Permitted values, for `enum` violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Absent field name, for `required` violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_property: Option<String>,
    /// Unrecognized field name, for `additionalProperties` violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_property: Option<String>,
}

impl ErrorParams {
    pub fn is_empty(&self) -> bool {
        self == &ErrorParams::default()
    }
}

/// A single violation found during one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// JSON Pointer to the violating value; empty for the document root.
    pub instance_path: String,
    pub keyword: Keyword,
    /// Caller-supplied message. The validator never fills this in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "ErrorParams::is_empty")]
    pub params: ErrorParams,
    /// The offending value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ValidationError {
    pub fn new(instance_path: impl Into<String>, keyword: Keyword) -> Self {
        Self {
            instance_path: instance_path.into(),
            keyword,
            message: None,
            params: ErrorParams::default(),
            data: None,
        }
    }

    pub fn with_params(mut self, params: ErrorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_data(mut self, data: &Value) -> Self {
        self.data = Some(data.clone());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(&self) -> ViolationKind {
        self.keyword.kind()
    }

    /// True when the violation addresses the document root rather than a field.
    pub fn is_root(&self) -> bool {
        self.instance_path.is_empty()
    }
}

/// Collection of violations from one run, in discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationViolations {
    violations: Vec<ValidationError>,
}

impl ValidationViolations {
    pub fn new(violations: Vec<ValidationError>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.violations
    }
}

impl From<Vec<ValidationError>> for ValidationViolations {
    fn from(violations: Vec<ValidationError>) -> Self {
        Self::new(violations)
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", crate::report::render_message(v))?;
        }
        Ok(())
    }
}

/// Error returned by the loading, acceptance and export helpers.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the rule set.
    #[error("validation failed against rule set '{rule_set}':\n{violations}")]
    ValidationFailed {
        /// Name of the rule set that was validated against.
        rule_set: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The report policy could not be loaded or parsed.
    #[error("policy load error for '{path}': {reason}")]
    PolicyLoadError { path: String, reason: String },

    /// The exported JSON Schema could not be compiled.
    #[error("export error for rule set '{rule_set}': {reason}")]
    ExportError { rule_set: String, reason: String },

    /// A valid document could not be mapped onto the typed model.
    #[error("model error: {0}")]
    Model(#[from] deck_core::DeckError),

    /// IO error reading a document or policy.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaValidationError {
    /// The violations carried by a `ValidationFailed` error.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            SchemaValidationError::ValidationFailed { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

impl From<SchemaValidationError> for deck_core::DeckError {
    fn from(err: SchemaValidationError) -> Self {
        match err {
            SchemaValidationError::Model(inner) => inner,
            SchemaValidationError::Io(inner) => deck_core::DeckError::Io(inner),
            other => deck_core::DeckError::SchemaValidation(other.to_string()),
        }
    }
}
