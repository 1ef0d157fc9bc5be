//! # Rule Registry
//!
//! Declarative description of every field of a presentation document.
//! The registry holds three named rule sets:
//!
//! - `document` — the whole presentation.
//! - `slide-array` — the `slides` field (collapsed string or slide list).
//! - `selected-ids` — the `selectedSlideIds` field (collapsed string or id list).
//!
//! The registry is built once on first use and never mutated afterwards;
//! [`RuleRegistry::global`] hands out a `&'static` reference that can be
//! shared freely across threads.
//!
//! Object rules are open (unknown keys ignored) unless marked
//! [`AdditionalProperties::Denied`]. Slide, background and element objects
//! are closed; the document root and the legacy `position`/`size` objects
//! are open.

use std::fmt;
use std::str::FromStr;

use deck_core::HEX_COLOR_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static REGISTRY: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::build);
static HEX_COLOR: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(HEX_COLOR_PATTERN).expect("hex color regex"));

/// Longest accepted value for titles, owner fields and slide ids.
pub const MAX_TEXT_FIELD_LEN: usize = 255;

/// Allowed values of `background.type`.
pub const BACKGROUND_TYPES: &[&str] = &["color", "image", "gradient"];

/// Allowed values of an element's `type`.
pub const ELEMENT_TYPES: &[&str] = &["text", "image", "shape", "line"];

/// Allowed values of `shapeType`.
pub const SHAPE_TYPES: &[&str] = &["rectangle", "circle", "triangle"];

/// Runtime JSON types a rule can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
        }
    }

    /// Whether `value` has this runtime type. Non-finite numbers never
    /// count as numbers.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::Object => value.is_object(),
            JsonType::Array => value.is_array(),
            JsonType::String => value.is_string(),
            JsonType::Number => finite_number(value).is_some(),
            JsonType::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value of `value`, if it is a finite number.
pub(crate) fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// A compiled string pattern together with its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: &'static str,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns the `regex` compile error for malformed sources.
    pub fn new(source: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            source,
            regex: Regex::new(source)?,
        })
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

/// Whether an object rule tolerates keys outside its declared properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalProperties {
    #[default]
    Allowed,
    Denied,
}

/// Constraints on a string value.
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
    pub allowed: Option<&'static [&'static str]>,
}

impl StringRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

/// Constraints on a numeric value.
#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl NumberRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum(mut self, n: f64) -> Self {
        self.minimum = Some(n);
        self
    }

    pub fn maximum(mut self, n: f64) -> Self {
        self.maximum = Some(n);
        self
    }
}

/// Constraints on an array value.
#[derive(Debug, Clone, Default)]
pub struct ArrayRule {
    pub min_items: Option<usize>,
    pub items: Option<Box<Rule>>,
}

impl ArrayRule {
    pub fn of(items: impl Into<Rule>) -> Self {
        Self {
            min_items: None,
            items: Some(Box::new(items.into())),
        }
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }
}

/// Constraints on an object value.
///
/// Properties keep their declaration order; lookups are linear since no
/// object in the document shape declares more than a few dozen keys.
#[derive(Debug, Clone, Default)]
pub struct ObjectRule {
    pub required: Vec<&'static str>,
    pub properties: Vec<(&'static str, Rule)>,
    pub additional: AdditionalProperties,
}

impl ObjectRule {
    /// An object that tolerates undeclared keys.
    pub fn open() -> Self {
        Self::default()
    }

    /// An object restricted to its declared keys.
    pub fn closed() -> Self {
        Self {
            additional: AdditionalProperties::Denied,
            ..Self::default()
        }
    }

    pub fn require(mut self, names: &[&'static str]) -> Self {
        self.required.extend_from_slice(names);
        self
    }

    pub fn property(mut self, name: &'static str, rule: impl Into<Rule>) -> Self {
        self.properties.push((name, rule.into()));
        self
    }

    /// Rule declared for `name`, if any.
    pub fn property_rule(&self, name: &str) -> Option<&Rule> {
        self.properties
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|(_, rule)| rule)
    }

    pub fn is_closed(&self) -> bool {
        self.additional == AdditionalProperties::Denied
    }
}

/// A node of the rule tree.
#[derive(Debug, Clone)]
pub enum Rule {
    String(StringRule),
    Number(NumberRule),
    Boolean,
    Array(ArrayRule),
    Object(ObjectRule),
    /// Union: a value is valid if any branch accepts it.
    AnyOf(Vec<Rule>),
}

impl Rule {
    /// The runtime type this rule demands; `None` for unions.
    pub fn expected_type(&self) -> Option<JsonType> {
        match self {
            Rule::String(_) => Some(JsonType::String),
            Rule::Number(_) => Some(JsonType::Number),
            Rule::Boolean => Some(JsonType::Boolean),
            Rule::Array(_) => Some(JsonType::Array),
            Rule::Object(_) => Some(JsonType::Object),
            Rule::AnyOf(_) => None,
        }
    }

    /// Whether `value` has the runtime type this rule demands.
    pub fn accepts_type_of(&self, value: &Value) -> bool {
        match self {
            Rule::AnyOf(branches) => branches.iter().any(|b| b.accepts_type_of(value)),
            other => other
                .expected_type()
                .is_some_and(|expected| expected.matches(value)),
        }
    }

    /// Arrays and objects carry nested structure; leaves do not.
    pub fn is_structured(&self) -> bool {
        matches!(self, Rule::Array(_) | Rule::Object(_))
    }
}

impl From<StringRule> for Rule {
    fn from(rule: StringRule) -> Self {
        Rule::String(rule)
    }
}

impl From<NumberRule> for Rule {
    fn from(rule: NumberRule) -> Self {
        Rule::Number(rule)
    }
}

impl From<ArrayRule> for Rule {
    fn from(rule: ArrayRule) -> Self {
        Rule::Array(rule)
    }
}

impl From<ObjectRule> for Rule {
    fn from(rule: ObjectRule) -> Self {
        Rule::Object(rule)
    }
}

/// Names of the rule sets held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSetName {
    Document,
    SlideArray,
    SelectedIds,
}

impl RuleSetName {
    pub const ALL: [RuleSetName; 3] = [
        RuleSetName::Document,
        RuleSetName::SlideArray,
        RuleSetName::SelectedIds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleSetName::Document => "document",
            RuleSetName::SlideArray => "slide-array",
            RuleSetName::SelectedIds => "selected-ids",
        }
    }
}

impl fmt::Display for RuleSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleSetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSetName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                format!("unknown rule set '{s}'; expected document, slide-array or selected-ids")
            })
    }
}

/// The immutable set of rule trees for presentation documents.
#[derive(Debug)]
pub struct RuleRegistry {
    document: Rule,
    slide_array: Rule,
    selected_ids: Rule,
}

impl RuleRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static RuleRegistry {
        &REGISTRY
    }

    pub fn get(&self, name: RuleSetName) -> &Rule {
        match name {
            RuleSetName::Document => &self.document,
            RuleSetName::SlideArray => &self.slide_array,
            RuleSetName::SelectedIds => &self.selected_ids,
        }
    }

    pub fn document(&self) -> &Rule {
        &self.document
    }

    pub fn slide_array(&self) -> &Rule {
        &self.slide_array
    }

    pub fn selected_ids(&self) -> &Rule {
        &self.selected_ids
    }

    fn build() -> Self {
        let slide_array = slide_array_rule();
        let selected_ids = selected_ids_rule();
        let document = document_rule(slide_array.clone(), selected_ids.clone());
        Self {
            document,
            slide_array,
            selected_ids,
        }
    }
}

fn bounded_text() -> StringRule {
    StringRule::new().min_length(1).max_length(MAX_TEXT_FIELD_LEN)
}

fn non_empty_text() -> StringRule {
    StringRule::new().min_length(1)
}

fn hex_color() -> StringRule {
    StringRule::new().pattern(HEX_COLOR.clone())
}

fn document_rule(slide_array: Rule, selected_ids: Rule) -> Rule {
    ObjectRule::open()
        .require(&["title", "slides", "ownerId", "ownerName"])
        .property("title", bounded_text())
        .property("slides", slide_array)
        .property(
            "currentSlideId",
            StringRule::new().max_length(MAX_TEXT_FIELD_LEN),
        )
        .property("selectedSlideIds", selected_ids)
        .property("ownerId", bounded_text())
        .property("ownerName", bounded_text())
        .property("$id", StringRule::new())
        .property("$createdAt", StringRule::new())
        .property("$updatedAt", StringRule::new())
        .property("$permissions", ArrayRule::of(StringRule::new()))
        .property("$collectionId", StringRule::new())
        .property("$databaseId", StringRule::new())
        .into()
}

fn slide_array_rule() -> Rule {
    Rule::AnyOf(vec![
        StringRule::new().min_length(2).into(),
        ArrayRule::of(slide_rule()).min_items(1).into(),
    ])
}

fn selected_ids_rule() -> Rule {
    Rule::AnyOf(vec![
        StringRule::new().min_length(2).into(),
        ArrayRule::of(non_empty_text()).into(),
    ])
}

fn slide_rule() -> Rule {
    ObjectRule::closed()
        .require(&["id", "background", "elements"])
        .property("id", non_empty_text())
        .property("background", background_rule())
        .property("elements", ArrayRule::of(element_rule()))
        .into()
}

fn background_rule() -> Rule {
    ObjectRule::closed()
        .require(&["type", "value"])
        .property("type", StringRule::new().one_of(BACKGROUND_TYPES))
        .property("value", non_empty_text())
        .into()
}

fn element_rule() -> Rule {
    let position = ObjectRule::open()
        .property("x", NumberRule::new())
        .property("y", NumberRule::new());
    let size = ObjectRule::open()
        .property("width", NumberRule::new())
        .property("height", NumberRule::new());

    ObjectRule::closed()
        .require(&["id", "type"])
        .property("id", non_empty_text())
        .property("type", StringRule::new().one_of(ELEMENT_TYPES))
        .property("x", NumberRule::new().minimum(0.0))
        .property("y", NumberRule::new().minimum(0.0))
        .property("width", NumberRule::new().minimum(1.0))
        .property("height", NumberRule::new().minimum(1.0))
        .property("position", position)
        .property("size", size)
        .property("text", StringRule::new())
        .property("content", StringRule::new())
        .property("placeholder", StringRule::new())
        .property("fontSize", NumberRule::new().minimum(1.0))
        .property("fontFamily", StringRule::new())
        .property("font", StringRule::new())
        .property("fontColor", hex_color())
        .property("color", StringRule::new())
        .property("align", StringRule::new())
        .property("verticalAlign", StringRule::new())
        .property("url", StringRule::new())
        .property("shapeType", StringRule::new().one_of(SHAPE_TYPES))
        .property("fillColor", hex_color())
        .property("strokeColor", hex_color())
        .property("strokeWidth", NumberRule::new().minimum(0.0))
        .into()
}
