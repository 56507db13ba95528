//! Test doubles for the drawing layers.

use crate::foundation::core::{GeoPoint, PixelPoint, Rgba8};
use crate::foundation::error::RoutelapseResult;
use crate::projection::MapOracle;
use crate::render::style::RouteStyle;
use crate::render::surface::DrawSurface;

/// Every call a compositor makes, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Clear,
    FillBackground(Rgba8),
    StrokePolyline { points: usize, color: Rgba8, width: f64, opacity: f64 },
    FillCircle { radius: f64, color: Rgba8 },
    StrokeCircle { radius: f64, width: f64, color: Rgba8 },
}

/// Records draw calls instead of rasterizing.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn polyline_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SurfaceCall::StrokePolyline { .. })).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn fill_background(&mut self, color: Rgba8) {
        self.calls.push(SurfaceCall::FillBackground(color));
    }

    fn stroke_polyline(
        &mut self,
        points: &[PixelPoint],
        style: &RouteStyle,
    ) -> RoutelapseResult<()> {
        self.calls.push(SurfaceCall::StrokePolyline {
            points: points.len(),
            color: style.color,
            width: style.width,
            opacity: style.opacity,
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        _center: PixelPoint,
        radius: f64,
        color: Rgba8,
    ) -> RoutelapseResult<()> {
        self.calls.push(SurfaceCall::FillCircle { radius, color });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        _center: PixelPoint,
        radius: f64,
        width: f64,
        color: Rgba8,
    ) -> RoutelapseResult<()> {
        self.calls.push(SurfaceCall::StrokeCircle { radius, width, color });
        Ok(())
    }
}

/// Oracle mapping longitude/latitude straight to x/y container pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlanarOracle {
    pub(crate) container: (u32, u32),
}

impl Default for PlanarOracle {
    fn default() -> Self {
        Self { container: (800, 600) }
    }
}

impl MapOracle for PlanarOracle {
    fn container_size(&self) -> (u32, u32) {
        self.container
    }

    fn container_point(&self, point: GeoPoint) -> PixelPoint {
        PixelPoint::new(point.lng, point.lat)
    }
}
