//! # Hex Color Newtype
//!
//! Color fields on slide elements (`fontColor`, `fillColor`, `strokeColor`)
//! accept `#` followed by exactly 3 or 6 hexadecimal digits, in any case.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Regular expression accepted by every color field.
///
/// The validation engine compiles this pattern into its rule registry;
/// [`HexColor::parse`] applies the same grammar without a regex engine.
pub const HEX_COLOR_PATTERN: &str = "^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

/// A validated `#RGB` or `#RRGGBB` color string.
///
/// The original spelling (including case) is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse and validate a color string.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidColor`] unless the input is `#` followed
    /// by exactly 3 or 6 ASCII hex digits.
    pub fn parse(s: &str) -> Result<Self, DeckError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| DeckError::InvalidColor(s.to_string()))?;
        let well_formed = matches!(digits.len(), 3 | 6)
            && digits.bytes().all(|b| b.is_ascii_hexdigit());
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(DeckError::InvalidColor(s.to_string()))
        }
    }

    /// Access the color as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the shorthand form to `#rrggbb`, lowercased.
    pub fn to_long_form(&self) -> String {
        let digits = &self.0[1..];
        if digits.len() == 3 {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in digits.chars() {
                let c = c.to_ascii_lowercase();
                out.push(c);
                out.push(c);
            }
            out
        } else {
            self.0.to_ascii_lowercase()
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = DeckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_short_and_long_forms() {
        assert!(HexColor::parse("#1a2").is_ok());
        assert!(HexColor::parse("#1A2b3C").is_ok());
        assert!(HexColor::parse("#FFF").is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["#12G456", "123456", "#1234", "#", "", "#12345", "#1234567", "red"] {
            assert!(
                matches!(HexColor::parse(bad), Err(DeckError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn long_form_expands_shorthand() {
        let c = HexColor::parse("#A1f").unwrap();
        assert_eq!(c.to_long_form(), "#aa11ff");
        let c = HexColor::parse("#00FF7a").unwrap();
        assert_eq!(c.to_long_form(), "#00ff7a");
        assert_eq!(c.as_str(), "#00FF7a");
    }

    #[test]
    fn serde_rejects_invalid_color() {
        let ok: Result<HexColor, _> = serde_json::from_str("\"#abc\"");
        assert!(ok.is_ok());
        let bad: Result<HexColor, _> = serde_json::from_str("\"#abz\"");
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn any_six_hex_digits_parse(digits in "[0-9a-fA-F]{6}") {
            let s = format!("#{digits}");
            prop_assert!(HexColor::parse(&s).is_ok());
        }

        #[test]
        fn wrong_length_never_parses(digits in "[0-9a-f]{0,10}".prop_filter("len", |d| d.len() != 3 && d.len() != 6)) {
            let s = format!("#{digits}");
            prop_assert!(HexColor::parse(&s).is_err());
        }
    }
}
