//! Integration test: run the validate subcommand over the checked-in
//! fixture documents.

use deck_cli::validate::{run_validate, OutputFormat, ValidateArgs};
use deck_cli::{RulesArg, EXIT_REJECTED};
use deck_schema::ReportPolicy;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir.join("fixtures").join("presentations").join(name)
}

fn run(files: &[&str], policy: &ReportPolicy) -> (u8, String) {
    let args = ValidateArgs {
        files: files.iter().map(|f| fixture(f)).collect(),
        rules: RulesArg::Document,
        format: OutputFormat::Text,
    };
    let mut out = Vec::new();
    let code = run_validate(&args, policy, &mut out).expect("fixtures load");
    (code, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn valid_fixtures_pass() {
    let (code, out) = run(
        &["quarterly-review.json", "legacy-collapsed.json"],
        &ReportPolicy::default(),
    );
    assert_eq!(code, 0, "{out}");
    assert_eq!(out.lines().filter(|l| l.starts_with("OK ")).count(), 2);
}

#[test]
fn broken_fixture_is_rejected_even_with_lenient_policy() {
    let policy = ReportPolicy::load(&fixture("policy.yaml")).unwrap();
    let (code, out) = run(&["quarterly-review.json", "broken-deck.yaml"], &policy);
    assert_eq!(code, EXIT_REJECTED);
    assert!(out.contains("document root: [required] missing required field 'ownerName'"));
    assert!(out.contains("/slides/0/elements/0/fontColor: [pattern] must be a valid hex color"));
    assert!(out.contains("/slides/0/elements/1/shapeType: [enum] must be one of: rectangle, circle, triangle"));
    assert!(out.contains("warning: /slides/0/elements/3: [additionalProperties] unexpected field 'rotation'"));
}
