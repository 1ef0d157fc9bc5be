//! # Structural Validator
//!
//! Recursive descent of a candidate document against a [`Rule`] tree.
//!
//! ## Contract
//!
//! [`validate`] is total: malformed input of any shape is reported as
//! violations, never as a panic or an `Err`. Every run returns the complete
//! list of violations in discovery order. A failing value never hides
//! problems in its siblings; a value of the wrong type is not descended
//! into.
//!
//! ## Unions
//!
//! A union is satisfied when any branch yields no violations. Otherwise the
//! violations of a single branch are reported: the branch whose declared
//! type matches the candidate's runtime type, preferring structured
//! (array/object) branches on ties. A malformed slide list therefore
//! reports its per-slide problems rather than "expected a string".

use serde_json::{Map, Value};

use crate::error::{ErrorParams, Keyword, ValidationError};
use crate::registry::{
    finite_number, ArrayRule, JsonType, NumberRule, ObjectRule, Rule, RuleRegistry, RuleSetName,
    StringRule,
};

/// Validate `candidate` against `rule`, returning every violation found.
pub fn validate(rule: &Rule, candidate: &Value) -> Vec<ValidationError> {
    let mut walker = Walker::default();
    walker.check(rule, candidate);
    tracing::debug!(violations = walker.errors.len(), "validation run complete");
    walker.errors
}

/// Validate `candidate` against a named rule set from the global registry.
pub fn validate_rule_set(name: RuleSetName, candidate: &Value) -> Vec<ValidationError> {
    tracing::trace!(rule_set = %name, "validating against rule set");
    validate(RuleRegistry::global().get(name), candidate)
}

/// Escape a key for use as a JSON Pointer segment.
pub fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[derive(Default)]
struct Walker {
    segments: Vec<String>,
    errors: Vec<ValidationError>,
}

impl Walker {
    fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&escape_pointer_segment(segment));
        }
        out
    }

    fn emit(&mut self, keyword: Keyword, params: ErrorParams, data: Option<&Value>) {
        let mut error = ValidationError::new(self.path(), keyword).with_params(params);
        if let Some(data) = data {
            error = error.with_data(data);
        }
        self.errors.push(error);
    }

    fn type_mismatch(&mut self, expected: JsonType, value: &Value) {
        let params = ErrorParams {
            expected_type: Some(expected.as_str().to_string()),
            ..ErrorParams::default()
        };
        self.emit(Keyword::Type, params, Some(value));
    }

    fn limit(&mut self, keyword: Keyword, limit: f64, value: &Value) {
        let params = ErrorParams {
            limit: Some(limit),
            ..ErrorParams::default()
        };
        self.emit(keyword, params, Some(value));
    }

    fn descend(&mut self, segment: String, rule: &Rule, value: &Value) {
        self.segments.push(segment);
        self.check(rule, value);
        self.segments.pop();
    }

    fn check(&mut self, rule: &Rule, value: &Value) {
        match rule {
            Rule::AnyOf(branches) => self.check_any_of(branches, value),
            Rule::String(r) => match value.as_str() {
                Some(s) => self.check_string(r, s, value),
                None => self.type_mismatch(JsonType::String, value),
            },
            Rule::Number(r) => match finite_number(value) {
                Some(n) => self.check_number(r, n, value),
                None => self.type_mismatch(JsonType::Number, value),
            },
            Rule::Boolean => {
                if !value.is_boolean() {
                    self.type_mismatch(JsonType::Boolean, value);
                }
            }
            Rule::Array(r) => match value.as_array() {
                Some(items) => self.check_array(r, items, value),
                None => self.type_mismatch(JsonType::Array, value),
            },
            Rule::Object(r) => match value.as_object() {
                Some(map) => self.check_object(r, map),
                None => self.type_mismatch(JsonType::Object, value),
            },
        }
    }

    fn check_any_of(&mut self, branches: &[Rule], value: &Value) {
        let mut best: Option<((bool, bool), Vec<ValidationError>)> = None;

        for branch in branches {
            let mut scratch = Walker {
                segments: self.segments.clone(),
                errors: Vec::new(),
            };
            scratch.check(branch, value);
            if scratch.errors.is_empty() {
                return;
            }

            let rank = (branch.accepts_type_of(value), branch.is_structured());
            let better = match &best {
                Some((best_rank, _)) => rank >= *best_rank,
                None => true,
            };
            if better {
                best = Some((rank, scratch.errors));
            }
        }

        if let Some((_, errors)) = best {
            self.errors.extend(errors);
        }
    }

    fn check_string(&mut self, rule: &StringRule, s: &str, value: &Value) {
        let len = s.chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                self.limit(Keyword::MinLength, min as f64, value);
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                self.limit(Keyword::MaxLength, max as f64, value);
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(s) {
                self.emit(Keyword::Pattern, ErrorParams::default(), Some(value));
            }
        }
        if let Some(allowed) = rule.allowed {
            if !allowed.iter().any(|v| *v == s) {
                let params = ErrorParams {
                    allowed_values: Some(allowed.iter().map(|v| v.to_string()).collect()),
                    ..ErrorParams::default()
                };
                self.emit(Keyword::Enum, params, Some(value));
            }
        }
    }

    fn check_number(&mut self, rule: &NumberRule, n: f64, value: &Value) {
        if let Some(min) = rule.minimum {
            if n < min {
                self.limit(Keyword::Minimum, min, value);
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                self.limit(Keyword::Maximum, max, value);
            }
        }
    }

    fn check_array(&mut self, rule: &ArrayRule, items: &[Value], value: &Value) {
        if let Some(min) = rule.min_items {
            if items.len() < min {
                self.limit(Keyword::MinItems, min as f64, value);
            }
        }
        if let Some(item_rule) = rule.items.as_deref() {
            for (index, item) in items.iter().enumerate() {
                self.descend(index.to_string(), item_rule, item);
            }
        }
    }

    fn check_object(&mut self, rule: &ObjectRule, map: &Map<String, Value>) {
        for name in &rule.required {
            if !map.contains_key(*name) {
                let params = ErrorParams {
                    missing_property: Some((*name).to_string()),
                    ..ErrorParams::default()
                };
                self.emit(Keyword::Required, params, None);
            }
        }

        for (key, child) in map {
            match rule.property_rule(key) {
                Some(child_rule) => self.descend(key.clone(), child_rule, child),
                None if rule.is_closed() => {
                    let params = ErrorParams {
                        additional_property: Some(key.clone()),
                        ..ErrorParams::default()
                    };
                    self.emit(Keyword::AdditionalProperties, params, Some(child));
                }
                None => {}
            }
        }
    }
}
