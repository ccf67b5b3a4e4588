//! Renderer-agnostic colours, CSS colour names and the chart colour scales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown colour '{0}' (expected a CSS colour name or #rrggbb)")]
pub struct ParseColorError(pub String);

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const AQUAMARINE: Color = Color::rgb(127, 255, 212);

    /// Linear interpolation between two colours, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

const NAMED: [(&str, Color); 12] = [
    ("white", Color::WHITE),
    ("black", Color::BLACK),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("lightgray", Color::LIGHT_GRAY),
    ("lightgrey", Color::LIGHT_GRAY),
    ("lightblue", Color::LIGHT_BLUE),
    ("aquamarine", Color::AQUAMARINE),
    ("gray", Color::rgb(128, 128, 128)),
    ("orange", Color::rgb(255, 165, 0)),
    ("yellow", Color::rgb(255, 255, 0)),
];

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Some(hex) = key.strip_prefix('#') {
            return Color::from_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        NAMED
            .iter()
            .find(|(_, named)| *named == c)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| c.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from(*self))
    }
}

/// Plasma sequential scale, used when the colour column is numeric.
const PLASMA: [Color; 10] = [
    Color::rgb(0x0d, 0x08, 0x87),
    Color::rgb(0x46, 0x03, 0x9f),
    Color::rgb(0x72, 0x01, 0xa8),
    Color::rgb(0x9c, 0x17, 0x9e),
    Color::rgb(0xbd, 0x37, 0x86),
    Color::rgb(0xd8, 0x57, 0x6b),
    Color::rgb(0xed, 0x79, 0x53),
    Color::rgb(0xfb, 0x9f, 0x3a),
    Color::rgb(0xfd, 0xca, 0x26),
    Color::rgb(0xf0, 0xf9, 0x21),
];

/// Qualitative palette for categorical colour columns.
pub const PALETTE: [Color; 10] = [
    Color::rgb(0x63, 0x6e, 0xfa),
    Color::rgb(0xef, 0x55, 0x3b),
    Color::rgb(0x00, 0xcc, 0x96),
    Color::rgb(0xab, 0x63, 0xfa),
    Color::rgb(0xff, 0xa1, 0x5a),
    Color::rgb(0x19, 0xd3, 0xf3),
    Color::rgb(0xff, 0x66, 0x92),
    Color::rgb(0xb6, 0xe8, 0x80),
    Color::rgb(0xff, 0x97, 0xff),
    Color::rgb(0xfe, 0xcb, 0x52),
];

/// Sample the plasma scale at `t` in `[0, 1]`.
pub fn plasma(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (PLASMA.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(PLASMA.len() - 1);
    PLASMA[lower].lerp(PLASMA[upper], scaled - lower as f64)
}

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_names_and_hex() {
        assert_eq!("lightgray".parse::<Color>().unwrap(), Color::LIGHT_GRAY);
        assert_eq!("LightGrey".parse::<Color>().unwrap(), Color::LIGHT_GRAY);
        assert_eq!("#7fffd4".parse::<Color>().unwrap(), Color::AQUAMARINE);
        assert!("chartreuse-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn serializes_to_names_when_known() {
        let json = serde_json::to_string(&Color::AQUAMARINE).unwrap();
        assert_eq!(json, "\"aquamarine\"");
        let back: Color = serde_json::from_str("\"#010203\"").unwrap();
        assert_eq!(back, Color::rgb(1, 2, 3));
    }

    #[test]
    fn plasma_endpoints() {
        assert_eq!(plasma(0.0), Color::rgb(0x0d, 0x08, 0x87));
        assert_eq!(plasma(1.0), Color::rgb(0xf0, 0xf9, 0x21));
        assert_eq!(plasma(-3.0), plasma(0.0));
        assert_eq!(plasma(f64::NAN), plasma(0.0));
    }
}
