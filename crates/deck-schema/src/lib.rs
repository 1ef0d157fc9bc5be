//! # deck-schema — Presentation Document Validation
//!
//! Enforces the presentation document contract before documents are
//! persisted or rendered.
//!
//! ## Components
//!
//! - [`registry`] — the immutable rule trees (`document`, `slide-array`,
//!   `selected-ids`), built once per process.
//! - [`validate`] — the structural validator. Pure, synchronous and total:
//!   it returns every violation and never fails.
//! - [`report`] — accept/reject decision and human-readable messages.
//! - [`policy`] — caller-side severity configuration.
//! - [`load`] — JSON/YAML loading and the typed acceptance gate.
//! - [`export`] — JSON Schema rendering of the rule trees.
//!
//! ## Crate Policy
//!
//! - Depends only on `deck-core` internally.
//! - Validation is a trust boundary: invalid documents are rejected with
//!   structured, path-addressed violations.
//! - Only [`report`] produces natural-language text.

pub mod error;
pub mod export;
pub mod load;
pub mod policy;
pub mod registry;
pub mod report;
pub mod validate;

pub use error::{
    ErrorParams, Keyword, SchemaValidationError, ValidationError, ValidationViolations,
    ViolationKind,
};
pub use load::{accept_presentation, load_document, validate_document, validate_file};
pub use policy::ReportPolicy;
pub use registry::{Rule, RuleRegistry, RuleSetName};
pub use report::{render_message, summarize, summarize_with_policy, Summary};
pub use validate::{validate, validate_rule_set};
