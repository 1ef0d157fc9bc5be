//! # deck-cli — Presentation Document Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — validate JSON/YAML documents against a rule set
//! - `schema` — print a rule set as JSON Schema
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `deck-schema`; no validation logic here.
//! - Handlers write to a caller-supplied `Write` so output is testable.
//!
//! ## Exit Codes
//!
//! - `0` — every document is valid
//! - `1` — operational error (unreadable file, bad policy)
//! - `2` — at least one document was rejected

pub mod schema;
pub mod validate;

use clap::ValueEnum;
use deck_schema::RuleSetName;

/// Exit code for a run where at least one document was rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Rule set selector shared by subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RulesArg {
    #[default]
    Document,
    SlideArray,
    SelectedIds,
}

impl From<RulesArg> for RuleSetName {
    fn from(arg: RulesArg) -> Self {
        match arg {
            RulesArg::Document => RuleSetName::Document,
            RulesArg::SlideArray => RuleSetName::SlideArray,
            RulesArg::SelectedIds => RuleSetName::SelectedIds,
        }
    }
}
