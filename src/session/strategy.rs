//! Frame production strategies.
//!
//! A [`CaptureStrategy`] turns the current animation state into raw RGBA
//! pixels for one export frame. Direct draw re-renders the scene on a CPU
//! surface every frame; snapshot capture crops frames out of an externally
//! rendered raster instead.

use crate::foundation::core::PixelPoint;
use crate::foundation::error::RoutelapseResult;
use crate::model::AnimationState;
use crate::projection::{ExportFrame, MapOracle};
use crate::render::compositor::{render_multi_route_frame, render_route_frame};
use crate::render::raster::crop_rgba8;
use crate::render::style::BACKGROUND_COLOR;
use crate::render::surface::{CpuSurface, FrameRgba};

/// Supplies ready-made rasters of the live map container.
///
/// Implementations wrap whatever already draws the map, typically a
/// compositor owned by the embedding application. Snapshots cover the map
/// content only; UI chrome layered over the container is the source's to
/// leave out.
pub trait SnapshotSource {
    /// Size of the snapshot raster, in pixels.
    fn container_size(&self) -> (u32, u32);

    /// Translation to add to container coordinates to locate them in the
    /// snapshot. A map layer translated by `(tx, ty)` reports `(-tx, -ty)`.
    fn pan_offset(&self) -> PixelPoint;

    /// Grab the current pixels of the whole container.
    fn snapshot(&mut self) -> RoutelapseResult<FrameRgba>;
}

pub(crate) trait CaptureStrategy {
    fn label(&self) -> &'static str;

    fn container_size(&self) -> (u32, u32);

    fn render_frame(
        &mut self,
        frame: &ExportFrame,
        state: &AnimationState,
    ) -> RoutelapseResult<FrameRgba>;
}

/// Re-renders the scene from scratch for every frame.
pub(crate) struct DirectDrawStrategy {
    oracle: Box<dyn MapOracle>,
}

impl DirectDrawStrategy {
    pub(crate) fn new(oracle: Box<dyn MapOracle>) -> Self {
        Self { oracle }
    }
}

impl CaptureStrategy for DirectDrawStrategy {
    fn label(&self) -> &'static str {
        "direct-draw"
    }

    fn container_size(&self) -> (u32, u32) {
        self.oracle.container_size()
    }

    fn render_frame(
        &mut self,
        frame: &ExportFrame,
        state: &AnimationState,
    ) -> RoutelapseResult<FrameRgba> {
        let (width, height) = frame.pixel_size();
        let mut surface = CpuSurface::new(width, height)?;
        if state.concurrent.is_empty() {
            render_route_frame(&mut surface, frame, self.oracle.as_ref(), state)?;
        } else {
            render_multi_route_frame(&mut surface, frame, self.oracle.as_ref(), state)?;
        }
        Ok(surface.finish())
    }
}

/// Crops export frames out of snapshots of the live container.
pub(crate) struct SnapshotStrategy {
    source: Box<dyn SnapshotSource>,
}

impl SnapshotStrategy {
    pub(crate) fn new(source: Box<dyn SnapshotSource>) -> Self {
        Self { source }
    }
}

impl CaptureStrategy for SnapshotStrategy {
    fn label(&self) -> &'static str {
        "snapshot"
    }

    fn container_size(&self) -> (u32, u32) {
        self.source.container_size()
    }

    fn render_frame(
        &mut self,
        frame: &ExportFrame,
        _state: &AnimationState,
    ) -> RoutelapseResult<FrameRgba> {
        let shot = self.source.snapshot()?;
        // Sources build FrameRgba by hand, so re-check the buffer length.
        let shot = FrameRgba::new(shot.width, shot.height, shot.data)?;
        let pan = self.source.pan_offset();
        let (width, height) = frame.pixel_size();
        Ok(crop_rgba8(&shot, frame.left + pan.x, frame.top + pan.y, width, height, BACKGROUND_COLOR))
    }
}
