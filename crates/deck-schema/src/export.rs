//! # JSON Schema Export
//!
//! Renders registry rule trees as Draft 2020-12 JSON Schema documents so
//! that clients outside this workspace (form builders, other services) can
//! validate against the same contract. The export is compiled with the
//! `jsonschema` crate to prove it is a well-formed schema.
//!
//! The exported schema accepts and rejects exactly the documents the
//! native validator does. Violation reporting differs: `jsonschema`
//! reports every failing `anyOf` branch, the native validator only the
//! most informative one.

use jsonschema::Validator;
use serde_json::{json, Map, Value};

use crate::error::SchemaValidationError;
use crate::registry::{AdditionalProperties, Rule, RuleRegistry, RuleSetName};

/// Base URI for exported schema `$id`s.
pub const SCHEMA_ID_PREFIX: &str = "https://schemas.deck.dev/presentation/";

/// Render a rule tree as a JSON Schema value.
pub fn to_json_schema(rule: &Rule) -> Value {
    match rule {
        Rule::String(r) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("string"));
            if let Some(n) = r.min_length {
                out.insert("minLength".into(), json!(n));
            }
            if let Some(n) = r.max_length {
                out.insert("maxLength".into(), json!(n));
            }
            if let Some(p) = &r.pattern {
                out.insert("pattern".into(), json!(p.source()));
            }
            if let Some(allowed) = r.allowed {
                out.insert("enum".into(), json!(allowed));
            }
            Value::Object(out)
        }
        Rule::Number(r) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("number"));
            if let Some(n) = r.minimum {
                out.insert("minimum".into(), number(n));
            }
            if let Some(n) = r.maximum {
                out.insert("maximum".into(), number(n));
            }
            Value::Object(out)
        }
        Rule::Boolean => json!({"type": "boolean"}),
        Rule::Array(r) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("array"));
            if let Some(n) = r.min_items {
                out.insert("minItems".into(), json!(n));
            }
            if let Some(items) = r.items.as_deref() {
                out.insert("items".into(), to_json_schema(items));
            }
            Value::Object(out)
        }
        Rule::Object(r) => {
            let properties: Map<String, Value> = r
                .properties
                .iter()
                .map(|(name, rule)| ((*name).to_string(), to_json_schema(rule)))
                .collect();
            let mut out = Map::new();
            out.insert("type".into(), json!("object"));
            if !r.required.is_empty() {
                out.insert("required".into(), json!(r.required));
            }
            out.insert("properties".into(), Value::Object(properties));
            out.insert(
                "additionalProperties".into(),
                json!(r.additional == AdditionalProperties::Allowed),
            );
            Value::Object(out)
        }
        Rule::AnyOf(branches) => json!({
            "anyOf": branches.iter().map(to_json_schema).collect::<Vec<_>>()
        }),
    }
}

/// Export a named rule set as a standalone schema document.
pub fn rule_set_schema(name: RuleSetName) -> Value {
    let mut schema = to_json_schema(RuleRegistry::global().get(name));
    if let Value::Object(map) = &mut schema {
        map.insert(
            "$schema".into(),
            json!("https://json-schema.org/draft/2020-12/schema"),
        );
        map.insert(
            "$id".into(),
            json!(format!("{SCHEMA_ID_PREFIX}{name}.schema.json")),
        );
        map.insert("title".into(), json!(name.as_str()));
    }
    schema
}

/// Compile the exported schema for a named rule set.
///
/// # Errors
///
/// Returns `SchemaValidationError::ExportError` if `jsonschema` rejects
/// the exported document.
pub fn compile(name: RuleSetName) -> Result<Validator, SchemaValidationError> {
    let schema = rule_set_schema(name);
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(&schema)
        .map_err(|e| SchemaValidationError::ExportError {
            rule_set: name.to_string(),
            reason: e.to_string(),
        })
}

fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_schema_shape() {
        let schema = rule_set_schema(RuleSetName::Document);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], true);
        assert_eq!(
            schema["required"],
            json!(["title", "slides", "ownerId", "ownerName"])
        );
        assert_eq!(schema["properties"]["title"]["maxLength"], 255);
        assert!(schema["properties"]["slides"]["anyOf"].is_array());
        assert_eq!(
            schema["$id"],
            "https://schemas.deck.dev/presentation/document.schema.json"
        );
    }

    #[test]
    fn element_schema_is_closed_with_color_pattern() {
        let schema = rule_set_schema(RuleSetName::SlideArray);
        let element = schema
            .pointer("/anyOf/1/items/properties/elements/items")
            .unwrap();
        assert_eq!(element["additionalProperties"], false);
        assert_eq!(
            element["properties"]["fontColor"]["pattern"],
            deck_core::HEX_COLOR_PATTERN
        );
        assert_eq!(element["properties"]["width"]["minimum"], 1);
        assert_eq!(
            element["properties"]["shapeType"]["enum"],
            json!(["rectangle", "circle", "triangle"])
        );
    }

    #[test]
    fn all_rule_sets_compile() {
        for name in RuleSetName::ALL {
            assert!(compile(name).is_ok(), "{name} failed to compile");
        }
    }
}
