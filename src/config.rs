//! Network configuration.
//!
//! Every tunable of the effect lives here: node count, motion speed, glyph
//! alphabet, palette, link and glow styling, and the optional anchor node.
//! The type serializes to JSON so a page can ship its settings alongside
//! the script, and offers `with_*` builder methods for code-side setup.
//!
//! ```ignore
//! use glyphnet::prelude::*;
//!
//! let config = NetworkConfig::default()
//!     .with_node_count(40)
//!     .with_link_threshold(180.0)
//!     .without_anchor();
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::NetworkError;
use crate::visuals::{default_glyphs, default_palette, Color};

/// Upper bound on mobile nodes. Links are computed over every pair each
/// frame, so the count stays small enough for a page backdrop.
pub const MAX_NODE_COUNT: u32 = 60;

/// Inclusive range a per-node value is drawn from at spawn time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl ValueRange {
    /// Create a range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` onto the range.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    fn check(&self, name: &str) -> Result<(), NetworkError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(NetworkError::InvalidConfig(format!(
                "{name} range {}..{} is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Styling and reach of the lines drawn between nearby nodes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    /// Whether links are drawn at all.
    pub enabled: bool,
    /// Pairs closer than this (logical pixels) are linked.
    pub threshold: f32,
    /// Alpha of a link between two coincident nodes.
    pub weight: f32,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in logical pixels.
    pub width: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 150.0,
            weight: 0.15,
            color: Color::rgb(0x33, 0x33, 0x33),
            width: 1.5,
        }
    }
}

/// The two shadow-blur passes that give each glyph its glow.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlowConfig {
    /// Blur radius of the first pass.
    pub inner_blur: f32,
    /// Blur radius of the second pass.
    pub outer_blur: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            inner_blur: 8.0,
            outer_blur: 18.0,
        }
    }
}

/// The single node pinned to the surface center.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnchorConfig {
    /// Glyph drawn for the anchor; should not be part of the alphabet.
    pub glyph: String,
    /// Opacity of the anchor glyph.
    pub opacity: f32,
    /// Font size of the anchor glyph.
    pub font_size: f32,
    /// Neutral color of the anchor glyph.
    pub color: Color,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            glyph: "Ψ".into(),
            opacity: 1.0,
            font_size: 36.0,
            color: Color::rgb(0x1f, 0x29, 0x37),
        }
    }
}

/// Complete network configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of mobile nodes.
    pub node_count: u32,
    /// Per-axis velocity magnitude bound, in pixels per frame.
    pub speed: f32,
    /// Glyph alphabet mobile nodes draw their label from.
    pub glyphs: Vec<String>,
    /// Colors mobile nodes draw their tint from.
    pub palette: Vec<Color>,
    /// Opacity range of mobile nodes.
    pub opacity: ValueRange,
    /// Font size range of mobile nodes, in logical pixels.
    pub font_size: ValueRange,
    /// CSS font family used for glyphs.
    pub font_family: String,
    /// Link styling.
    pub links: LinkConfig,
    /// Glow styling.
    pub glow: GlowConfig,
    /// Optional anchor node at the surface center.
    pub anchor: Option<AnchorConfig>,
    /// Scale the backing store by the device pixel ratio (web only).
    pub hidpi: bool,
    /// Fill color behind the network. `None` leaves the surface transparent.
    pub background: Option<Color>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_count: 50,
            speed: 0.5,
            glyphs: default_glyphs(),
            palette: default_palette(),
            opacity: ValueRange::new(0.35, 0.85),
            font_size: ValueRange::new(14.0, 24.0),
            font_family: "'Times New Roman', serif".into(),
            links: LinkConfig::default(),
            glow: GlowConfig::default(),
            anchor: Some(AnchorConfig::default()),
            hidpi: true,
            background: None,
        }
    }
}

impl NetworkConfig {
    /// Set the number of mobile nodes.
    pub fn with_node_count(mut self, count: u32) -> Self {
        self.node_count = count;
        self
    }

    /// Set the per-axis speed bound.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Replace the glyph alphabet.
    pub fn with_glyphs<I, S>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.glyphs = glyphs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the link distance threshold.
    pub fn with_link_threshold(mut self, threshold: f32) -> Self {
        self.links.threshold = threshold;
        self
    }

    /// Turn link drawing on or off.
    pub fn with_links(mut self, enabled: bool) -> Self {
        self.links.enabled = enabled;
        self
    }

    /// Set the anchor node.
    pub fn with_anchor(mut self, anchor: AnchorConfig) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Drop the anchor node.
    pub fn without_anchor(mut self) -> Self {
        self.anchor = None;
        self
    }

    /// Set the background fill.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Total nodes a network built from this config holds.
    pub fn total_nodes(&self) -> usize {
        usize::try_from(self.node_count)
            .unwrap_or(usize::MAX)
            .saturating_add(usize::from(self.anchor.is_some()))
    }

    /// Check that the configuration can drive a network.
    pub fn validate(&self) -> Result<(), NetworkError> {
        let invalid = |msg: String| Err(NetworkError::InvalidConfig(msg));

        if self.node_count > MAX_NODE_COUNT {
            return invalid(format!(
                "node_count must be at most {MAX_NODE_COUNT}, got {}",
                self.node_count
            ));
        }
        if self.glyphs.is_empty() || self.glyphs.iter().any(String::is_empty) {
            return invalid("glyph alphabet must be non-empty and contain no empty glyphs".into());
        }
        if self.palette.is_empty() {
            return invalid("palette must not be empty".into());
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return invalid(format!("speed must be finite and non-negative, got {}", self.speed));
        }
        self.opacity.check("opacity")?;
        self.font_size.check("font_size")?;
        if self.opacity.min < 0.0 || self.opacity.max > 1.0 {
            return invalid("opacity must stay within 0..1".into());
        }
        if self.font_size.min <= 0.0 {
            return invalid(format!("font_size must be positive, got {}", self.font_size.min));
        }

        let links = &self.links;
        if !(links.threshold.is_finite() && links.threshold > 0.0) {
            return invalid(format!("links.threshold must be positive, got {}", links.threshold));
        }
        // A non-positive weight would make alpha grow with distance.
        if !(links.weight > 0.0 && links.weight <= 1.0) {
            return invalid(format!("links.weight must be within (0, 1], got {}", links.weight));
        }
        if !(links.width.is_finite() && links.width > 0.0) {
            return invalid(format!("links.width must be positive, got {}", links.width));
        }

        let glow = &self.glow;
        for (name, blur) in [("inner_blur", glow.inner_blur), ("outer_blur", glow.outer_blur)] {
            if !(blur.is_finite() && blur >= 0.0) {
                return invalid(format!("glow.{name} must be finite and non-negative, got {blur}"));
            }
        }
        if glow.inner_blur == glow.outer_blur {
            return invalid(format!(
                "glow passes need two different blur radii, both are {}",
                glow.inner_blur
            ));
        }

        if let Some(anchor) = &self.anchor {
            if anchor.glyph.is_empty() {
                return invalid("anchor glyph must not be empty".into());
            }
            if self.glyphs.contains(&anchor.glyph) {
                return invalid(format!(
                    "anchor glyph {:?} must not be part of the alphabet",
                    anchor.glyph
                ));
            }
            if !(0.0..=1.0).contains(&anchor.opacity) {
                return invalid(format!("anchor.opacity must be within 0..1, got {}", anchor.opacity));
            }
            if !(anchor.font_size.is_finite() && anchor.font_size > 0.0) {
                return invalid(format!("anchor.font_size must be positive, got {}", anchor.font_size));
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty JSON.
    pub fn to_json(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NetworkError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = NetworkConfig::default();
        config.validate().unwrap();
        assert_eq!(config.total_nodes(), 51);
        assert!(!config.glyphs.contains(&config.anchor.as_ref().unwrap().glyph));
    }

    #[test]
    fn test_builder_chain() {
        let config = NetworkConfig::default()
            .with_node_count(40)
            .with_speed(1.0)
            .with_link_threshold(180.0)
            .with_glyphs(["a", "b"])
            .without_anchor();

        assert_eq!(config.node_count, 40);
        assert_eq!(config.links.threshold, 180.0);
        assert_eq!(config.glyphs, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.total_nodes(), 40);
    }

    #[test]
    fn test_json_round_trip() {
        let config = NetworkConfig::default()
            .with_node_count(12)
            .with_background(Color::WHITE);
        let json = config.to_json().unwrap();
        let back = NetworkConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = NetworkConfig::from_json(r##"{ "node_count": 60, "links": { "threshold": 180 } }"##)
            .unwrap();
        assert_eq!(config.node_count, 60);
        assert_eq!(config.links.threshold, 180.0);
        assert!(config.links.enabled);
        assert_eq!(config.palette, default_palette());
    }

    #[test]
    fn test_null_anchor_disables_it() {
        let config = NetworkConfig::from_json(r#"{ "anchor": null }"#).unwrap();
        assert!(config.anchor.is_none());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(NetworkConfig::default().with_glyphs(Vec::<String>::new()).validate().is_err());
        assert!(NetworkConfig::default().with_palette(Vec::new()).validate().is_err());
        assert!(NetworkConfig::default().with_link_threshold(0.0).validate().is_err());
        assert!(NetworkConfig::default().with_speed(-1.0).validate().is_err());

        let mut config = NetworkConfig::default();
        config.font_size = ValueRange::new(20.0, 10.0);
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.opacity = ValueRange::new(0.5, 1.5);
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.font_size = ValueRange::new(0.0, 10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_caps_node_count() {
        assert!(NetworkConfig::default().with_node_count(MAX_NODE_COUNT).validate().is_ok());
        assert!(NetworkConfig::default().with_node_count(MAX_NODE_COUNT + 1).validate().is_err());

        let err = NetworkConfig::from_json(r#"{ "node_count": 1000000 }"#).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(_)));

        let config = NetworkConfig::default().with_node_count(u32::MAX);
        assert!(config.total_nodes() >= u32::MAX as usize);
    }

    #[test]
    fn test_rejects_bad_link_styling() {
        for weight in [0.0, -1.0, 1.5, f32::NAN] {
            let mut config = NetworkConfig::default();
            config.links.weight = weight;
            assert!(config.validate().is_err(), "weight {weight} accepted");
        }
        for width in [0.0, -1.0, f32::INFINITY] {
            let mut config = NetworkConfig::default();
            config.links.width = width;
            assert!(config.validate().is_err(), "width {width} accepted");
        }

        let err = NetworkConfig::from_json(r#"{ "links": { "weight": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_collapsed_glow() {
        let mut config = NetworkConfig::default();
        config.glow = GlowConfig { inner_blur: 10.0, outer_blur: 10.0 };
        assert!(config.validate().is_err());

        config.glow = GlowConfig { inner_blur: -2.0, outer_blur: 18.0 };
        assert!(config.validate().is_err());

        config.glow = GlowConfig { inner_blur: 0.0, outer_blur: f32::NAN };
        assert!(config.validate().is_err());

        config.glow = GlowConfig { inner_blur: 0.0, outer_blur: 12.0 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_anchor() {
        let anchor = |f: fn(&mut AnchorConfig)| {
            let mut anchor = AnchorConfig::default();
            f(&mut anchor);
            NetworkConfig::default().with_anchor(anchor)
        };

        assert!(anchor(|a| a.glyph.clear()).validate().is_err());
        assert!(anchor(|a| a.glyph = "π".into()).validate().is_err());
        assert!(anchor(|a| a.opacity = 1.2).validate().is_err());
        assert!(anchor(|a| a.opacity = -0.1).validate().is_err());
        assert!(anchor(|a| a.font_size = 0.0).validate().is_err());
        assert!(anchor(|a| a.font_size = f32::NAN).validate().is_err());
        assert!(anchor(|_| ()).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_color_in_json() {
        let err = NetworkConfig::from_json(r#"{ "palette": ["blue"] }"#).unwrap_err();
        assert!(matches!(err, NetworkError::ConfigParse(_)));
    }

    #[test]
    fn test_value_range_lerp() {
        let range = ValueRange::new(10.0, 20.0);
        assert_eq!(range.lerp(0.0), 10.0);
        assert_eq!(range.lerp(0.5), 15.0);
    }
}
