//! Hex color type for product tints.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ColorHex`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorHexError {
    /// The input does not start with `#`.
    #[error("color must start with '#'")]
    MissingHash,
    /// The input is not 7 characters long (`#` + 6 hex digits).
    #[error("color must be 7 characters (#rrggbb), got {got}")]
    BadLength {
        /// Actual length of the input.
        got: usize,
    },
    /// A character outside `[0-9a-fA-F]` appeared after the `#`.
    #[error("color contains a non-hex digit")]
    NonHexDigit,
}

/// A CSS-style `#rrggbb` color.
///
/// Product tints and light colors travel through the system as hex strings
/// (the catalog, the store rows, and the scene description all use this
/// form). Parsing validates the shape once so malformed colors fail fast
/// instead of propagating to the renderer.
///
/// Values are normalized to lowercase so equality is textual.
///
/// ## Examples
///
/// ```
/// use solstice_core::ColorHex;
///
/// let c = ColorHex::parse("#A855F7").unwrap();
/// assert_eq!(c.as_str(), "#a855f7");
///
/// assert!(ColorHex::parse("a855f7").is_err());   // missing '#'
/// assert!(ColorHex::parse("#a855f").is_err());   // too short
/// assert!(ColorHex::parse("#a855fg").is_err());  // 'g' is not hex
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorHex(String);

impl ColorHex {
    /// Parse a `ColorHex` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly `#` followed by six
    /// hex digits.
    pub fn parse(s: &str) -> Result<Self, ColorHexError> {
        if !s.starts_with('#') {
            return Err(ColorHexError::MissingHash);
        }
        if s.len() != 7 {
            return Err(ColorHexError::BadLength { got: s.len() });
        }
        if !s.chars().skip(1).all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorHexError::NonHexDigit);
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Build a color from RGB components. Infallible.
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Returns the color as a `#rrggbb` string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ColorHex {
    type Error = ColorHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ColorHex> for String {
    fn from(c: ColorHex) -> Self {
        c.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let c = ColorHex::parse("#00d9ff").unwrap();
        assert_eq!(c.as_str(), "#00d9ff");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let a = ColorHex::parse("#A855F7").unwrap();
        let b = ColorHex::parse("#a855f7").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_missing_hash() {
        assert_eq!(
            ColorHex::parse("a855f7").unwrap_err(),
            ColorHexError::MissingHash
        );
    }

    #[test]
    fn test_parse_bad_length() {
        assert!(matches!(
            ColorHex::parse("#fff").unwrap_err(),
            ColorHexError::BadLength { got: 4 }
        ));
    }

    #[test]
    fn test_parse_non_hex_digit() {
        assert_eq!(
            ColorHex::parse("#zzzzzz").unwrap_err(),
            ColorHexError::NonHexDigit
        );
    }

    #[test]
    fn test_from_rgb() {
        assert_eq!(ColorHex::from_rgb(168, 85, 247).as_str(), "#a855f7");
        assert_eq!(ColorHex::from_rgb(255, 255, 255).as_str(), "#ffffff");
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let ok: Result<ColorHex, _> = serde_json::from_str("\"#ff006e\"");
        assert!(ok.is_ok());
        let bad: Result<ColorHex, _> = serde_json::from_str("\"not-a-color\"");
        assert!(bad.is_err());
    }
}
