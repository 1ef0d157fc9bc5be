//! # deck-core — Foundational Types for Presentation Documents
//!
//! Leaf crate of the workspace. Defines the typed shape of an accepted
//! presentation document and the primitives shared by the validation
//! engine and its callers.
//!
//! ## Key Design Principles
//!
//! 1. **Sum types for historical encodings.** `slides` and `selectedSlideIds`
//!    arrive either collapsed into a single string or expanded into a list.
//!    Both are modelled as explicit `Collapsed | Expanded` enums.
//!
//! 2. **Discriminant-carrying elements.** Every `SlideElement` carries an
//!    `ElementKind`. Cross-kind fields are tolerated, not rejected.
//!
//! 3. **`HexColor` newtype.** Color fields hold a validated `#RGB` or
//!    `#RRGGBB` string, never a bare `String`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `deck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod color;
pub mod error;
pub mod model;

pub use color::{HexColor, HEX_COLOR_PATTERN};
pub use error::DeckError;
pub use model::{
    Background, BackgroundKind, ElementKind, Position, Presentation, SelectedSlideIds, ShapeType,
    Size, Slide, SlideElement, SlidesField,
};
