//! Shared value types: geographic and pixel points, colors, output formats.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{RoutelapseError, RoutelapseResult};

/// Pixel-space point. Route geometry becomes these after projection.
pub type PixelPoint = kurbo::Point;

/// A WGS84 coordinate, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> RoutelapseResult<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(RoutelapseError::validation(format!(
                "latitude must be a finite value in [-90, 90], got {}",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(RoutelapseError::validation(format!(
                "longitude must be a finite value in [-180, 180], got {}",
                self.lng
            )));
        }
        Ok(())
    }
}

/// 8-bit RGBA color, serialized as a CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`; the hash is optional and hex digits
    /// are case-insensitive.
    pub fn from_hex(s: &str) -> RoutelapseResult<Self> {
        let t = s.trim();
        let t = t.strip_prefix('#').unwrap_or(t);
        if !t.is_ascii() {
            return Err(Self::bad_hex(s));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&t[range], 16).map_err(|_| Self::bad_hex(s))
        };
        match t.len() {
            6 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, 255)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(Self::bad_hex(s)),
        }
    }

    fn bad_hex(s: &str) -> RoutelapseError {
        RoutelapseError::validation(format!(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive), got \"{s}\""
        ))
    }

    /// Lowercase hex form; the alpha pair is omitted when fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Supported export resolutions, named the way users know them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputResolution {
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "1440p")]
    Qhd1440,
    #[serde(rename = "4k")]
    Uhd4K,
}

impl OutputResolution {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Hd720 => (1280, 720),
            Self::FullHd1080 => (1920, 1080),
            Self::Qhd1440 => (2560, 1440),
            Self::Uhd4K => (3840, 2160),
        }
    }

    pub fn aspect_ratio(self) -> f64 {
        let (w, h) = self.dimensions();
        w as f64 / h as f64
    }
}

/// Supported frame rates. Serialized as the plain number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FrameRate {
    Fps24,
    #[default]
    Fps30,
    Fps60,
}

impl FrameRate {
    pub fn as_u32(self) -> u32 {
        match self {
            Self::Fps24 => 24,
            Self::Fps30 => 30,
            Self::Fps60 => 60,
        }
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = RoutelapseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            24 => Ok(Self::Fps24),
            30 => Ok(Self::Fps30),
            60 => Ok(Self::Fps60),
            other => Err(RoutelapseError::validation(format!(
                "unsupported frame rate {other} (expected 24, 30 or 60)"
            ))),
        }
    }
}

impl From<FrameRate> for u32 {
    fn from(value: FrameRate) -> Self {
        value.as_u32()
    }
}
