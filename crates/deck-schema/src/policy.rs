//! # Report Policy
//!
//! Caller-side severity configuration. The engine reports every breach;
//! a policy decides which keywords block acceptance and which are only
//! surfaced as warnings.
//!
//! ```yaml
//! warn_keywords:
//!   - additionalProperties
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Keyword, SchemaValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportPolicy {
    /// Keywords whose violations do not block acceptance.
    #[serde(default)]
    pub warn_keywords: BTreeSet<Keyword>,
}

impl ReportPolicy {
    /// A policy that only warns about unknown fields on closed objects.
    pub fn tolerate_unknown_fields() -> Self {
        Self {
            warn_keywords: BTreeSet::from([Keyword::AdditionalProperties]),
        }
    }

    pub fn is_warning(&self, keyword: Keyword) -> bool {
        self.warn_keywords.contains(&keyword)
    }

    /// Parse a policy from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load a policy file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::PolicyLoadError` if the file cannot
    /// be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, SchemaValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::PolicyLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        let policy = Self::from_yaml_str(&content).map_err(|e| {
            SchemaValidationError::PolicyLoadError {
                path: path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            }
        })?;
        tracing::debug!(
            path = %path.display(),
            warn_keywords = policy.warn_keywords.len(),
            "loaded report policy"
        );
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_keyword_list() {
        let p = ReportPolicy::from_yaml_str("warn_keywords:\n  - additionalProperties\n  - minItems\n")
            .unwrap();
        assert!(p.is_warning(Keyword::AdditionalProperties));
        assert!(p.is_warning(Keyword::MinItems));
        assert!(!p.is_warning(Keyword::Required));
    }

    #[test]
    fn empty_mapping_is_default() {
        let p = ReportPolicy::from_yaml_str("{}").unwrap();
        assert_eq!(p, ReportPolicy::default());
    }

    #[test]
    fn rejects_unknown_keyword_and_field() {
        assert!(ReportPolicy::from_yaml_str("warn_keywords: [oneOf]").is_err());
        assert!(ReportPolicy::from_yaml_str("block_keywords: [type]").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "warn_keywords: [additionalProperties]").unwrap();
        let p = ReportPolicy::load(f.path()).unwrap();
        assert_eq!(p, ReportPolicy::tolerate_unknown_fields());
    }

    #[test]
    fn load_missing_file_is_policy_error() {
        let err = ReportPolicy::load(Path::new("/nonexistent/policy.yaml")).unwrap_err();
        assert!(matches!(err, SchemaValidationError::PolicyLoadError { .. }));
    }
}
