//! The export frame and frame-local projection.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{GeoPoint, PixelPoint};
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::projection::oracle::MapOracle;

/// The capture rectangle, in container pixels. Frozen for a whole recording
/// session so every frame shares one coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ExportFrame {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> RoutelapseResult<Self> {
        let frame = Self { left, top, width, height };
        frame.validate()?;
        Ok(frame)
    }

    /// Largest rectangle of the given aspect ratio centered in `container`.
    pub fn centered_with_aspect(container: (u32, u32), aspect: f64) -> Self {
        let cw = container.0 as f64;
        let ch = container.1 as f64;
        let (width, height) = if cw / ch > aspect { (ch * aspect, ch) } else { (cw, cw / aspect) };
        Self { left: (cw - width) / 2.0, top: (ch - height) / 2.0, width, height }
    }

    pub fn validate(&self) -> RoutelapseResult<()> {
        for (label, v) in
            [("left", self.left), ("top", self.top), ("width", self.width), ("height", self.height)]
        {
            if !v.is_finite() {
                return Err(RoutelapseError::validation(format!(
                    "export frame {label} must be finite, got {v}"
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(RoutelapseError::validation(format!(
                "export frame must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Output raster size: rounded, at least one pixel each way.
    pub fn pixel_size(&self) -> (u32, u32) {
        ((self.width.round() as u32).max(1), (self.height.round() as u32).max(1))
    }
}

/// Frame-local position of a geographic point: the oracle's container-pixel
/// answer shifted by the frame origin. No scaling, no other correction.
pub fn project(point: GeoPoint, frame: &ExportFrame, oracle: &dyn MapOracle) -> PixelPoint {
    let p = oracle.container_point(point);
    PixelPoint::new(p.x - frame.left, p.y - frame.top)
}

/// Inclusive bounds test against a `width` x `height` surface, widened (or
/// shrunk, when negative) by `margin` on every side.
pub fn is_point_in_bounds(point: PixelPoint, width: f64, height: f64, margin: f64) -> bool {
    point.x >= -margin
        && point.x <= width + margin
        && point.y >= -margin
        && point.y <= height + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubOracle {
        scale: f64,
    }

    impl MapOracle for StubOracle {
        fn container_size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn container_point(&self, point: GeoPoint) -> PixelPoint {
            PixelPoint::new(point.lng * self.scale, point.lat * self.scale)
        }
    }

    #[test]
    fn project_subtracts_the_frame_origin_exactly() {
        let oracle = StubOracle { scale: 10.0 };
        for (left, top) in [(0.0, 0.0), (120.0, 80.0), (-35.5, 17.25)] {
            let frame = ExportFrame { left, top, width: 640.0, height: 360.0 };
            for (lat, lng) in [(0.0, 0.0), (12.5, -3.25), (-48.0, 160.0)] {
                let p = project(GeoPoint::new(lat, lng), &frame, &oracle);
                assert_eq!(p.x, lng * 10.0 - left);
                assert_eq!(p.y, lat * 10.0 - top);
            }
        }
    }

    #[test]
    fn bounds_check_is_inclusive_at_the_edges() {
        assert!(is_point_in_bounds(PixelPoint::new(0.0, 0.0), 100.0, 50.0, 0.0));
        assert!(is_point_in_bounds(PixelPoint::new(100.0, 50.0), 100.0, 50.0, 0.0));
        assert!(!is_point_in_bounds(PixelPoint::new(100.1, 25.0), 100.0, 50.0, 0.0));
        assert!(!is_point_in_bounds(PixelPoint::new(50.0, -0.1), 100.0, 50.0, 0.0));
    }

    #[test]
    fn margin_expands_and_shrinks_the_bounds() {
        assert!(is_point_in_bounds(PixelPoint::new(-10.0, 60.0), 100.0, 50.0, 10.0));
        assert!(is_point_in_bounds(PixelPoint::new(110.0, -10.0), 100.0, 50.0, 10.0));
        assert!(!is_point_in_bounds(PixelPoint::new(-10.1, 25.0), 100.0, 50.0, 10.0));
        assert!(!is_point_in_bounds(PixelPoint::new(4.9, 25.0), 100.0, 50.0, -5.0));
        assert!(is_point_in_bounds(PixelPoint::new(5.0, 25.0), 100.0, 50.0, -5.0));
    }

    #[test]
    fn centered_frames_letterbox_to_the_aspect_ratio() {
        let wide = ExportFrame::centered_with_aspect((1000, 400), 16.0 / 9.0);
        assert!((wide.height - 400.0).abs() < 1e-9);
        assert!((wide.width - 400.0 * 16.0 / 9.0).abs() < 1e-9);
        assert!(wide.top.abs() < 1e-9);
        assert!((wide.left - (1000.0 - wide.width) / 2.0).abs() < 1e-9);

        let tall = ExportFrame::centered_with_aspect((800, 2000), 16.0 / 9.0);
        assert!((tall.width - 800.0).abs() < 1e-9);
        assert!((tall.height - 800.0 * 9.0 / 16.0).abs() < 1e-9);
        assert!(tall.left.abs() < 1e-9);
    }

    #[test]
    fn validation_rejects_degenerate_rectangles() {
        assert!(ExportFrame::new(0.0, 0.0, 0.0, 100.0).is_err());
        assert!(ExportFrame::new(0.0, 0.0, 100.0, -1.0).is_err());
        assert!(ExportFrame::new(f64::NAN, 0.0, 10.0, 10.0).is_err());
        assert!(ExportFrame::new(-50.0, -20.0, 10.0, 10.0).is_ok());
    }

    #[test]
    fn pixel_size_rounds_and_stays_positive() {
        let frame = ExportFrame { left: 0.0, top: 0.0, width: 1919.6, height: 1079.4 };
        assert_eq!(frame.pixel_size(), (1920, 1079));
        let sliver = ExportFrame { left: 0.0, top: 0.0, width: 0.2, height: 0.2 };
        assert_eq!(sliver.pixel_size(), (1, 1));
    }
}
