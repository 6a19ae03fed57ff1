//! 8-bit RGB colors and their CSS string forms.
//!
//! The canvas API takes colors as CSS strings, so particles carry an [`Rgb`]
//! and the draw pass formats it with [`Rgb::to_css`] / [`Rgb::to_css_alpha`].

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default accent used when no theme color is available.
    pub const ACCENT: Rgb = Rgb::new(0x6c, 0x63, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (case insensitive,
    /// surrounding whitespace ignored, as returned by `getPropertyValue`).
    pub fn from_hex(input: &str) -> Result<Rgb, FieldError> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || FieldError::InvalidColor(trimmed.to_owned());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc expands to #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgb(r, g, b)`
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, alpha)` with `alpha` written as-is. The canvas clamps
    /// out-of-range alpha itself.
    pub fn to_css_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::ACCENT
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#6c63ff").unwrap(), Rgb::ACCENT);
        assert_eq!(Rgb::from_hex("6C63FF").unwrap(), Rgb::ACCENT);
    }

    #[test]
    fn parses_css_variable_with_whitespace() {
        // getPropertyValue keeps the leading space after the colon
        assert_eq!(Rgb::from_hex(" #ff8800 ").unwrap(), Rgb::new(255, 136, 0));
    }

    #[test]
    fn expands_short_hex() {
        assert_eq!(Rgb::from_hex("#fa0").unwrap(), Rgb::new(0xff, 0xaa, 0x00));
    }

    #[test]
    fn rejects_bad_input() {
        for bad in ["", "#", "#12345", "#gggggg", "#1234567", "rgb(1,2,3)", "#ééé"] {
            assert!(Rgb::from_hex(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn css_formatting_matches_canvas_syntax() {
        let c = Rgb::new(108, 99, 255);
        assert_eq!(c.to_css(), "rgb(108, 99, 255)");
        assert_eq!(c.to_css_alpha(0.5), "rgba(108, 99, 255, 0.5)");
        assert_eq!(c.to_hex(), "#6c63ff");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::ACCENT).unwrap();
        assert_eq!(json, "\"#6c63ff\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::ACCENT);
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
