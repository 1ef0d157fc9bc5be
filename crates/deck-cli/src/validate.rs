//! # Validate Subcommand
//!
//! Validates one or more presentation documents and prints a report per
//! file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use deck_schema::{
    load_document, summarize_with_policy, validate_rule_set, ReportPolicy, RuleSetName,
};
use serde::Serialize;

use crate::{RulesArg, EXIT_REJECTED};

/// Output format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per violation.
    #[default]
    Text,
    /// Raw violation records as JSON.
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Documents to validate (`.json`, `.yaml` or `.yml`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Rule set to validate against.
    #[arg(long, value_enum, default_value_t = RulesArg::Document)]
    pub rules: RulesArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport<'a> {
    file: String,
    valid: bool,
    errors: &'a [deck_schema::ValidationError],
}

/// Run the validate subcommand, writing reports to `out`.
///
/// Returns `0` when every document passes the policy, [`EXIT_REJECTED`]
/// otherwise.
pub fn run_validate(
    args: &ValidateArgs,
    policy: &ReportPolicy,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let rule_set: RuleSetName = args.rules.into();
    let mut rejected = 0usize;

    for path in &args.files {
        let document = load_document(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let errors = validate_rule_set(rule_set, &document);
        let summary = summarize_with_policy(&errors, policy);

        tracing::info!(
            file = %path.display(),
            rule_set = %rule_set,
            valid = summary.valid,
            violations = errors.len(),
            "validated document"
        );

        if !summary.valid {
            rejected += 1;
        }

        match args.format {
            OutputFormat::Text => {
                let status = if summary.valid { "OK" } else { "FAILED" };
                writeln!(out, "{status} {}", path.display())?;
                for message in &summary.messages {
                    writeln!(out, "  error: {message}")?;
                }
                for warning in &summary.warnings {
                    writeln!(out, "  warning: {warning}")?;
                }
            }
            OutputFormat::Json => {
                let report = FileReport {
                    file: path.display().to_string(),
                    valid: summary.valid,
                    errors: &errors,
                };
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            }
        }
    }

    if rejected > 0 {
        tracing::warn!(rejected, total = args.files.len(), "documents rejected");
        Ok(EXIT_REJECTED)
    } else {
        Ok(0)
    }
}
