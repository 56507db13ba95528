//! Colors and stroke/marker parameters shared by the drawing layers.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RoutelapseError, RoutelapseResult};

/// Canvas background behind every composited frame.
pub const BACKGROUND_COLOR: Rgba8 = Rgba8::opaque(0xf5, 0xf5, 0xf5);
/// Route color used when an activity does not carry one.
pub const DEFAULT_ROUTE_COLOR: Rgba8 = Rgba8::opaque(0x33, 0x88, 0xff);
/// Gray of the static route underlay.
pub const STATIC_ROUTE_COLOR: Rgba8 = Rgba8::opaque(0x99, 0x99, 0x99);
/// Ring stroke around the position marker.
pub const MARKER_RING_COLOR: Rgba8 = Rgba8::opaque(0x33, 0x33, 0x33);
/// Debug crosshair color.
pub const DEBUG_CROSSHAIR_COLOR: Rgba8 = Rgba8::opaque(0xff, 0x00, 0x00);

/// Parameters for one polyline pass. Strokes always use round caps and
/// joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub color: Rgba8,
    pub width: f64,
    pub opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self { color: DEFAULT_ROUTE_COLOR, width: 3.0, opacity: 1.0 }
    }
}

impl RouteStyle {
    /// Underlay style for routes that are not animating.
    pub fn muted() -> Self {
        Self { color: STATIC_ROUTE_COLOR, width: 2.0, opacity: 0.5 }
    }

    /// Foreground style for an animating route: heavier and fully opaque so
    /// it reads over the underlay.
    pub fn active(color: Rgba8) -> Self {
        Self { color, width: 4.0, opacity: 1.0 }
    }
}

/// Two-layer position marker: a white disc with a dark ring, and a colored
/// disc inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgba8,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub ring_color: Rgba8,
    pub ring_width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill: DEFAULT_ROUTE_COLOR,
            outer_radius: 8.0,
            inner_radius: 5.0,
            ring_color: MARKER_RING_COLOR,
            ring_width: 2.0,
        }
    }
}

impl MarkerStyle {
    pub fn filled(fill: Rgba8) -> Self {
        Self { fill, ..Self::default() }
    }

    pub fn validate(&self) -> RoutelapseResult<()> {
        if !(self.outer_radius.is_finite() && self.inner_radius.is_finite())
            || self.outer_radius <= 0.0
            || self.inner_radius < 0.0
        {
            return Err(RoutelapseError::validation(
                "marker radii must be finite and non-negative",
            ));
        }
        if self.inner_radius > self.outer_radius {
            return Err(RoutelapseError::validation(format!(
                "marker inner radius {} exceeds outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        Ok(())
    }
}

/// Crosshair overlay used to eyeball projection accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugStyle {
    pub color: Rgba8,
    /// Crosshair arm length, center to tip.
    pub arm: f64,
    pub width: f64,
}

impl Default for DebugStyle {
    fn default() -> Self {
        Self { color: DEBUG_CROSSHAIR_COLOR, arm: 5.0, width: 1.0 }
    }
}
