//! # Document Loading & Acceptance
//!
//! File-facing helpers around the validator: load JSON or YAML documents,
//! turn violation lists into `Result`s, and gate conversion into the typed
//! [`Presentation`] model on a clean validation run.

use std::path::Path;

use deck_core::{DeckError, Presentation};
use serde_json::Value;

use crate::error::{SchemaValidationError, ValidationViolations};
use crate::registry::RuleSetName;
use crate::validate::{escape_pointer_segment, validate_rule_set};

/// Load a JSON or YAML document from disk.
///
/// The format is chosen by extension: `.yaml`/`.yml` are parsed as YAML
/// and converted to JSON values; everything else is parsed as JSON.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or parsed.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
                SchemaValidationError::DocumentLoadError {
                    path: path.display().to_string(),
                    reason: format!("invalid YAML: {e}"),
                }
            })?;
            yaml_to_json_value(&yaml_value).map_err(|e| SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("YAML-to-JSON conversion failed: {e}"),
            })
        }
        _ => serde_json::from_str(&content).map_err(|e| SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Validate a parsed value against a named rule set.
///
/// # Errors
///
/// Returns `SchemaValidationError::ValidationFailed` with every violation
/// if the value is invalid.
pub fn validate_document(value: &Value, rule_set: RuleSetName) -> Result<(), SchemaValidationError> {
    let violations = validate_rule_set(rule_set, value);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed {
            rule_set: rule_set.to_string(),
            violations: ValidationViolations::new(violations),
        })
    }
}

/// Load a document from disk and validate it against a named rule set.
pub fn validate_file(path: &Path, rule_set: RuleSetName) -> Result<(), SchemaValidationError> {
    let value = load_document(path)?;
    validate_document(&value, rule_set).map_err(|e| match e {
        SchemaValidationError::ValidationFailed { violations, .. } => {
            SchemaValidationError::ValidationFailed {
                rule_set: format!("{rule_set} ({})", path.display()),
                violations,
            }
        }
        other => other,
    })
}

/// Validate a candidate presentation and, only if it is clean, convert it
/// into the typed model.
///
/// This is the gate a persistence layer calls before writing a document.
pub fn accept_presentation(value: &Value) -> Result<Presentation, SchemaValidationError> {
    validate_document(value, RuleSetName::Document)?;
    let presentation: Presentation =
        serde_json::from_value(value.clone()).map_err(DeckError::from)?;

    if let Some(slides) = presentation.expanded_slides() {
        for element in slides.iter().flat_map(|s| s.elements.iter()) {
            let foreign = element.foreign_fields();
            if !foreign.is_empty() {
                tracing::debug!(
                    element = %element.id,
                    kind = element.kind().as_str(),
                    fields = ?foreign,
                    "element carries fields of another kind"
                );
            }
        }
    }

    Ok(presentation)
}

/// Convert a parsed YAML tree into the JSON value the validator walks.
///
/// Scalar mapping keys are stringified; YAML-only shapes (collection keys,
/// `.nan`/`.inf`) are refused with the JSON Pointer where they occur. Tags
/// are dropped.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    yaml_node_to_json(yaml, &mut String::new())
}

fn yaml_node_to_json(node: &serde_yaml::Value, at: &mut String) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    match node {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::String(s) => Ok(Value::String(s.clone())),
        Yaml::Number(n) => yaml_number(n).ok_or_else(|| {
            let at = pointer_label(at.as_str());
            format!("{at}: YAML number {n} has no JSON representation")
        }),
        Yaml::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let mark = at.len();
                at.push('/');
                at.push_str(&index.to_string());
                out.push(yaml_node_to_json(item, at)?);
                at.truncate(mark);
            }
            Ok(Value::Array(out))
        }
        Yaml::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Tagged(tagged) => match &tagged.value {
                        Yaml::String(s) => s.clone(),
                        _ => return Err(bad_key(at, "tagged non-string")),
                    },
                    Yaml::Null => return Err(bad_key(at, "null")),
                    Yaml::Sequence(_) => return Err(bad_key(at, "sequence")),
                    Yaml::Mapping(_) => return Err(bad_key(at, "mapping")),
                };
                let mark = at.len();
                at.push('/');
                at.push_str(&escape_pointer_segment(&key));
                let converted = yaml_node_to_json(item, at)?;
                at.truncate(mark);
                out.insert(key, converted);
            }
            Ok(Value::Object(out))
        }
        Yaml::Tagged(tagged) => yaml_node_to_json(&tagged.value, at),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        Some(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Value::from(u))
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
    }
}

fn bad_key(at: &str, found: &str) -> String {
    format!(
        "{}: mapping keys must be scalars, found a {found} key",
        pointer_label(at)
    )
}

fn pointer_label(at: &str) -> &str {
    if at.is_empty() {
        crate::report::ROOT_LABEL
    } else {
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Keyword;
    use serde_json::json;
    use std::io::Write;

    fn valid_doc() -> Value {
        json!({
            "title": "Roadmap",
            "slides": [{
                "id": "s1",
                "background": {"type": "gradient", "value": "linear(#000, #fff)"},
                "elements": [{"id": "e1", "type": "image", "url": "logo.png", "width": 100, "height": 40}]
            }],
            "ownerId": "u1",
            "ownerName": "Ada"
        })
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn yaml_to_json_conversion() {
        let yaml_str = r#"
title: Roadmap
count: 42
ratio: 0.5
enabled: true
items:
  - one
  - two
"#;
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();

        assert_eq!(json_value["title"], "Roadmap");
        assert_eq!(json_value["count"], 42);
        assert_eq!(json_value["ratio"], 0.5);
        assert_eq!(json_value["enabled"], true);
        assert_eq!(json_value["items"][1], "two");
    }

    #[test]
    fn yaml_collection_key_names_its_location() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("slides:\n  - id: s1\n    ? [a, b]\n    : x\n").unwrap();
        let err = yaml_to_json_value(&yaml).unwrap_err();
        assert_eq!(err, "/slides/0: mapping keys must be scalars, found a sequence key");
    }

    #[test]
    fn yaml_nan_is_refused() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("title: t\nratio: .nan\n").unwrap();
        let err = yaml_to_json_value(&yaml).unwrap_err();
        assert!(err.starts_with("/ratio: YAML number"), "{err}");
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let json_value = yaml_to_json_value(&yaml).unwrap();
        assert_eq!(json_value["1"], "one");
        assert_eq!(json_value["true"], "yes");
    }

    #[test]
    fn yaml_with_collection_key_is_load_error() {
        let f = write_temp(".yml", "title: t\n? {a: 1}\n: x\n");
        match load_document(f.path()).unwrap_err() {
            SchemaValidationError::DocumentLoadError { reason, .. } => {
                assert!(reason.contains("document root: mapping keys must be scalars"), "{reason}");
            }
            other => panic!("expected DocumentLoadError, got: {other}"),
        }
    }

    #[test]
    fn loads_yaml_by_extension() {
        let f = write_temp(
            ".yaml",
            "title: t\nslides: \"[]\"\nownerId: u1\nownerName: A\n",
        );
        let value = load_document(f.path()).unwrap();
        assert_eq!(value["slides"], "[]");
        validate_file(f.path(), RuleSetName::Document).unwrap();
    }

    #[test]
    fn invalid_json_is_load_error() {
        let f = write_temp(".json", "{\"title\": ");
        let err = load_document(f.path()).unwrap_err();
        assert!(matches!(err, SchemaValidationError::DocumentLoadError { .. }));
    }

    #[test]
    fn validate_file_names_path_in_rule_set() {
        let f = write_temp(".json", r#"{"title": "t", "ownerId": "u1", "ownerName": "A"}"#);
        let err = validate_file(f.path(), RuleSetName::Document).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { rule_set, violations } => {
                assert!(rule_set.starts_with("document ("));
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.violations()[0].keyword, Keyword::Required);
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn accept_returns_typed_model() {
        let p = accept_presentation(&valid_doc()).unwrap();
        assert_eq!(p.owner_name, "Ada");
        let slides = p.expanded_slides().unwrap();
        assert_eq!(slides[0].elements[0].width, Some(100.0));
    }

    #[test]
    fn accept_rejects_invalid_document() {
        let mut doc = valid_doc();
        doc["slides"][0]["elements"][0]["fillColor"] = json!("#12G456");
        let err = accept_presentation(&doc).unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.violations()[0].instance_path,
            "/slides/0/elements/0/fillColor"
        );
    }
}
