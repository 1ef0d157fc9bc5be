//! # Result Reporter
//!
//! Turns a violation list into an accept/reject decision plus one
//! human-readable line per violation. This is the only module that
//! produces natural-language text; the validator emits structured data
//! only.

use serde::Serialize;

use crate::error::{Keyword, ValidationError};
use crate::policy::ReportPolicy;

/// Location label for violations addressed to the document itself.
pub const ROOT_LABEL: &str = "document root";

/// Outcome of one validation run, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// True iff no blocking violation was found.
    pub valid: bool,
    /// One rendered line per blocking violation.
    pub messages: Vec<String>,
    /// One rendered line per violation downgraded by policy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Summarize violations with every violation blocking.
pub fn summarize(errors: &[ValidationError]) -> Summary {
    Summary {
        valid: errors.is_empty(),
        messages: errors.iter().map(render_message).collect(),
        warnings: Vec::new(),
    }
}

/// Summarize violations, downgrading keywords the policy marks as warnings.
pub fn summarize_with_policy(errors: &[ValidationError], policy: &ReportPolicy) -> Summary {
    let (warned, blocking): (Vec<&ValidationError>, Vec<&ValidationError>) = errors
        .iter()
        .partition(|e| policy.is_warning(e.keyword));
    Summary {
        valid: blocking.is_empty(),
        messages: blocking.into_iter().map(render_message).collect(),
        warnings: warned.into_iter().map(render_message).collect(),
    }
}

/// Render one violation as `<location>: [<keyword>] <phrase>`.
///
/// A caller-supplied `message` replaces the default phrase.
pub fn render_message(error: &ValidationError) -> String {
    let location = if error.is_root() {
        ROOT_LABEL
    } else {
        error.instance_path.as_str()
    };
    let phrase = match &error.message {
        Some(message) => message.clone(),
        None => default_phrase(error),
    };
    format!("{location}: [{}] {phrase}", error.keyword)
}

/// The keyword-specific phrase used when a violation carries no message.
pub fn default_phrase(error: &ValidationError) -> String {
    let params = &error.params;
    let limit = params.limit.map(format_limit).unwrap_or_else(|| "?".to_string());
    match error.keyword {
        Keyword::Type => match &params.expected_type {
            Some(t) => format!("must be of type {t}"),
            None => "has the wrong type".to_string(),
        },
        Keyword::Required => format!(
            "missing required field '{}'",
            params.missing_property.as_deref().unwrap_or("?")
        ),
        Keyword::Pattern => {
            if field_name(&error.instance_path).ends_with("Color") {
                "must be a valid hex color".to_string()
            } else {
                "does not match the required format".to_string()
            }
        }
        Keyword::Minimum => format!("must be greater than or equal to {limit}"),
        Keyword::Maximum => format!("must be less than or equal to {limit}"),
        Keyword::MinLength if params.limit == Some(1.0) => "must not be empty".to_string(),
        Keyword::MinLength => format!("must be at least {limit} characters long"),
        Keyword::MaxLength => format!("must be at most {limit} characters long"),
        Keyword::MinItems => format!("must contain at least {limit} item(s)"),
        Keyword::Enum => match &params.allowed_values {
            Some(values) => format!("must be one of: {}", values.join(", ")),
            None => "is not an allowed value".to_string(),
        },
        Keyword::AdditionalProperties => format!(
            "unexpected field '{}'",
            params.additional_property.as_deref().unwrap_or("?")
        ),
    }
}

/// Last segment of a JSON Pointer, unescaped.
fn field_name(pointer: &str) -> String {
    pointer
        .rsplit('/')
        .next()
        .unwrap_or("")
        .replace("~1", "/")
        .replace("~0", "~")
}

fn format_limit(limit: f64) -> String {
    if limit.fract() == 0.0 && limit.abs() < 1e15 {
        format!("{}", limit as i64)
    } else {
        format!("{limit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorParams;
    use std::collections::BTreeSet;

    fn required(name: &str) -> ValidationError {
        ValidationError::new("", Keyword::Required).with_params(ErrorParams {
            missing_property: Some(name.to_string()),
            ..ErrorParams::default()
        })
    }

    #[test]
    fn empty_list_is_valid() {
        let s = summarize(&[]);
        assert!(s.valid);
        assert!(s.messages.is_empty());
    }

    #[test]
    fn root_required_message() {
        let s = summarize(&[required("title")]);
        assert!(!s.valid);
        assert_eq!(
            s.messages,
            vec!["document root: [required] missing required field 'title'"]
        );
    }

    #[test]
    fn color_pattern_phrase() {
        let e = ValidationError::new("/slides/0/elements/1/fillColor", Keyword::Pattern);
        assert_eq!(
            render_message(&e),
            "/slides/0/elements/1/fillColor: [pattern] must be a valid hex color"
        );
        let other = ValidationError::new("/code", Keyword::Pattern);
        assert!(render_message(&other).ends_with("does not match the required format"));
    }

    #[test]
    fn supplied_message_wins() {
        let e = required("ownerId").with_message("sign in again");
        assert_eq!(render_message(&e), "document root: [required] sign in again");
    }

    #[test]
    fn limits_render_without_fraction() {
        let e = ValidationError::new("/slides/0/elements/0/width", Keyword::Minimum).with_params(
            ErrorParams {
                limit: Some(1.0),
                ..ErrorParams::default()
            },
        );
        assert!(render_message(&e).ends_with("must be greater than or equal to 1"));
        assert_eq!(format_limit(0.5), "0.5");
    }

    #[test]
    fn enum_phrase_lists_values() {
        let e = ValidationError::new("/shapeType", Keyword::Enum).with_params(ErrorParams {
            allowed_values: Some(vec!["rectangle".into(), "circle".into(), "triangle".into()]),
            ..ErrorParams::default()
        });
        assert!(render_message(&e).ends_with("must be one of: rectangle, circle, triangle"));
    }

    #[test]
    fn policy_downgrades_keywords() {
        let extra = ValidationError::new("/slides/0", Keyword::AdditionalProperties).with_params(
            ErrorParams {
                additional_property: Some("notes".to_string()),
                ..ErrorParams::default()
            },
        );
        let policy = ReportPolicy {
            warn_keywords: BTreeSet::from([Keyword::AdditionalProperties]),
        };

        let s = summarize_with_policy(std::slice::from_ref(&extra), &policy);
        assert!(s.valid);
        assert!(s.messages.is_empty());
        assert_eq!(s.warnings, vec!["/slides/0: [additionalProperties] unexpected field 'notes'"]);

        let s = summarize_with_policy(&[extra, required("title")], &policy);
        assert!(!s.valid);
        assert_eq!(s.messages.len(), 1);
        assert_eq!(s.warnings.len(), 1);
    }

    #[test]
    fn default_policy_matches_plain_summary() {
        let errors = vec![required("slides")];
        assert_eq!(
            summarize_with_policy(&errors, &ReportPolicy::default()),
            summarize(&errors)
        );
    }
}
