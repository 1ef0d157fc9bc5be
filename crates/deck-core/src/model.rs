//! # Presentation Document Model
//!
//! Typed representation of a presentation document that has passed
//! validation. Field names follow the wire format (camelCase) via serde
//! renames.
//!
//! Slide, background and element objects reject unknown keys; the document
//! root keeps them in [`Presentation::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::HexColor;

/// A complete presentation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub slides: SlidesField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_slide_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_slide_ids: Option<SelectedSlideIds>,
    pub owner_id: String,
    pub owner_name: String,

    /// Storage-assigned document identifier.
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "$permissions", default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(rename = "$collectionId", default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(rename = "$databaseId", default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,

    /// Fields not declared above. The document root is open-world.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Presentation {
    /// Slides in expanded form, or `None` when the document carries the
    /// collapsed string encoding.
    pub fn expanded_slides(&self) -> Option<&[Slide]> {
        match &self.slides {
            SlidesField::Expanded(slides) => Some(slides),
            SlidesField::Collapsed(_) => None,
        }
    }

    /// Look up the slide named by `currentSlideId`, if both are available.
    pub fn current_slide(&self) -> Option<&Slide> {
        let id = self.current_slide_id.as_deref()?;
        self.expanded_slides()?.iter().find(|s| s.id == id)
    }
}

/// The two historical encodings of the `slides` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlidesField {
    /// Serialized form kept as a single opaque string.
    Collapsed(String),
    /// Ordered list of slides.
    Expanded(Vec<Slide>),
}

/// The two historical encodings of the `selectedSlideIds` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectedSlideIds {
    Collapsed(String),
    Expanded(Vec<String>),
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub id: String,
    pub background: Background,
    pub elements: Vec<SlideElement>,
}

/// Slide background specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Image,
    Gradient,
}

/// Discriminant of a [`SlideElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Line,
}

impl ElementKind {
    /// All element kinds, in declaration order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Shape,
        ElementKind::Line,
    ];

    /// Wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Shape => "shape",
            ElementKind::Line => "line",
        }
    }

    /// Optional fields that carry meaning for this kind, beyond the
    /// geometry fields every element shares.
    pub fn specific_fields(self) -> &'static [&'static str] {
        match self {
            ElementKind::Text => &[
                "text",
                "content",
                "placeholder",
                "fontSize",
                "fontFamily",
                "font",
                "fontColor",
                "color",
                "align",
                "verticalAlign",
            ],
            ElementKind::Image => &["url"],
            ElementKind::Shape => &["shapeType", "fillColor", "strokeColor", "strokeWidth"],
            ElementKind::Line => &["strokeColor", "strokeWidth"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
}

/// Legacy nested position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Legacy nested size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// A positioned element on a slide.
///
/// Every field other than `id` and `kind` is optional. Fields belonging to
/// another kind are tolerated; see [`SlideElement::foreign_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlideElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl SlideElement {
    /// Create a bare element of the given kind.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            x: None,
            y: None,
            width: None,
            height: None,
            position: None,
            size: None,
            text: None,
            content: None,
            placeholder: None,
            font_size: None,
            font_family: None,
            font: None,
            font_color: None,
            color: None,
            align: None,
            vertical_align: None,
            url: None,
            shape_type: None,
            fill_color: None,
            stroke_color: None,
            stroke_width: None,
        }
    }

    /// The element's discriminant.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Wire names of populated kind-specific fields that belong to a
    /// different kind than this element's.
    pub fn foreign_fields(&self) -> Vec<&'static str> {
        let populated: [(&'static str, bool); 15] = [
            ("text", self.text.is_some()),
            ("content", self.content.is_some()),
            ("placeholder", self.placeholder.is_some()),
            ("fontSize", self.font_size.is_some()),
            ("fontFamily", self.font_family.is_some()),
            ("font", self.font.is_some()),
            ("fontColor", self.font_color.is_some()),
            ("color", self.color.is_some()),
            ("align", self.align.is_some()),
            ("verticalAlign", self.vertical_align.is_some()),
            ("url", self.url.is_some()),
            ("shapeType", self.shape_type.is_some()),
            ("fillColor", self.fill_color.is_some()),
            ("strokeColor", self.stroke_color.is_some()),
            ("strokeWidth", self.stroke_width.is_some()),
        ];
        let allowed = self.kind.specific_fields();
        populated
            .iter()
            .filter(|(name, set)| *set && !allowed.contains(name))
            .map(|(name, _)| *name)
            .collect()
    }
}
