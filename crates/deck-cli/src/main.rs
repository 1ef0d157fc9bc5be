//! # deck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deck_cli::schema::{run_schema, SchemaArgs};
use deck_cli::validate::{run_validate, ValidateArgs};
use deck_schema::ReportPolicy;

/// Presentation document toolchain.
///
/// Validates presentation documents against the document contract and
/// exports the contract as JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "deck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a report policy file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate presentation documents.
    Validate(ValidateArgs),

    /// Print a rule set as JSON Schema.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("deck CLI starting");

    let policy = match &cli.config {
        Some(path) => match ReportPolicy::load(path) {
            Ok(policy) => policy,
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::from(1);
            }
        },
        None => ReportPolicy::default(),
    };

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &policy, &mut stdout),
        Commands::Schema(args) => run_schema(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_cli::validate::OutputFormat;
    use deck_cli::RulesArg;

    #[test]
    fn cli_parse_validate_defaults() {
        let cli = Cli::try_parse_from(["deck", "validate", "deck.json"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.files, vec![PathBuf::from("deck.json")]);
                assert_eq!(args.rules, RulesArg::Document);
                assert_eq!(args.format, OutputFormat::Text);
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_validate_options() {
        let cli = Cli::try_parse_from([
            "deck",
            "-vv",
            "--config",
            "policy.yaml",
            "validate",
            "--rules",
            "slide-array",
            "--format",
            "json",
            "a.json",
            "b.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("policy.yaml")));
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.rules, RulesArg::SlideArray);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_validate_requires_a_file() {
        assert!(Cli::try_parse_from(["deck", "validate"]).is_err());
    }

    #[test]
    fn cli_parse_schema() {
        let cli = Cli::try_parse_from(["deck", "schema", "--rules", "selected-ids", "--compact"])
            .unwrap();
        match cli.command {
            Commands::Schema(args) => {
                assert_eq!(args.rules, RulesArg::SelectedIds);
                assert!(args.compact);
            }
            other => panic!("expected schema, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_rule_set() {
        assert!(Cli::try_parse_from(["deck", "validate", "--rules", "slides", "a.json"]).is_err());
    }
}
