//! Colors, palettes and glyph sets for node rendering.
//!
//! Colors travel through configuration as CSS hex strings (`"#2563eb"`) and
//! are kept as 8-bit RGB in memory so every surface can consume them: the
//! canvas binding formats them back to CSS, the raster surface blends the
//! channels directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// Glyphs nodes are labeled with by default.
pub const DEFAULT_GLYPHS: [&str; 9] = ["∞", "Ξ", "η", "π", "φ", "λ", "μ", "θ", "Ω"];

/// Node colors used by default, saturated enough to read on a white page.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#2563eb", // Blue
    "#dc2626", // Red
    "#16a34a", // Green
    "#ca8a04", // Gold
    "#9333ea", // Purple
    "#ea580c", // Orange
    "#0891b2", // Cyan
    "#be123c", // Rose
];

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black, the canvas default shadow color.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#2563eb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as floats in `0.0..=1.0`.
    #[inline]
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Color {
    type Err = NetworkError;

    /// Parse `#rrggbb` or `#rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkError::InvalidConfig(format!("'{s}' is not a #rrggbb or #rgb color"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The default palette, parsed.
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| hex.parse().ok())
        .collect()
}

/// The default glyph alphabet as owned strings.
pub fn default_glyphs() -> Vec<String> {
    DEFAULT_GLYPHS.iter().map(|g| (*g).to_string()).collect()
}
