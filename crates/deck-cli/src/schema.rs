//! # Schema Subcommand
//!
//! Prints a rule set as a JSON Schema document after checking that it
//! compiles.

use std::io::Write;

use clap::Args;
use deck_schema::export::{compile, rule_set_schema};
use deck_schema::RuleSetName;

use crate::RulesArg;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Rule set to export.
    #[arg(long, value_enum, default_value_t = RulesArg::Document)]
    pub rules: RulesArg,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

pub fn run_schema(args: &SchemaArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let name: RuleSetName = args.rules.into();
    compile(name)?;
    let schema = rule_set_schema(name);
    if args.compact {
        serde_json::to_writer(&mut *out, &schema)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &schema)?;
    }
    writeln!(out)?;
    tracing::debug!(rule_set = %name, "exported schema");
    Ok(0)
}
