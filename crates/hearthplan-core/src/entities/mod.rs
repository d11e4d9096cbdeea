//! Entity definitions for the floor plan.

mod feature;
mod marker;
mod room;
mod route;

pub use feature::{Feature, FeatureKind};
pub use marker::{ExitMarker, MarkerKind};
pub use room::Room;
pub use route::Route;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity for every entity on the canvas.
pub type EntityId = Uuid;

/// RGBA8 color, serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    /// Default stroke for committed evacuation routes.
    pub fn route_red() -> Self {
        Self::opaque(0xef, 0x44, 0x44)
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for RgbaColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl Serialize for RgbaColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbaColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Optional per-entity label presentation overrides.
///
/// `offset` is in the entity's unrotated local space, relative to the
/// kind-specific default anchor. Absent fields fall back to defaults at
/// render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    #[serde(rename = "labelOffsetX", skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(rename = "labelOffsetY", skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(rename = "labelFontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl LabelStyle {
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x.unwrap_or(0.0), self.offset_y.unwrap_or(0.0))
    }
}
