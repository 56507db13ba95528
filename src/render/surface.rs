//! The raster surface abstraction and its `vello_cpu` implementation.

use kurbo::{BezPath, Cap, Circle, Join, Shape, Stroke, StrokeOpts};
use vello_cpu::{Pixmap, RenderContext};

use crate::foundation::core::{PixelPoint, Rgba8};
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::render::style::RouteStyle;

/// One finished frame: RGBA8, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> RoutelapseResult<Self> {
        if data.len() != Self::expected_len(width, height) {
            return Err(RoutelapseError::render(format!(
                "frame buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                Self::expected_len(width, height),
                width,
                height
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let mut data = vec![0; Self::expected_len(width, height)];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
        Self { width, height, data }
    }

    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }
}

/// Drawing operations the compositor needs. Implemented by the CPU raster
/// surface and by the recording double used in tests.
pub trait DrawSurface {
    fn size(&self) -> (u32, u32);

    /// Reset to fully transparent.
    fn clear(&mut self);

    fn fill_background(&mut self, color: Rgba8);

    /// Stroke an open polyline with round caps and joins. Fewer than two
    /// points, or a non-positive width, is a no-op.
    fn stroke_polyline(&mut self, points: &[PixelPoint], style: &RouteStyle)
    -> RoutelapseResult<()>;

    fn fill_circle(&mut self, center: PixelPoint, radius: f64, color: Rgba8)
    -> RoutelapseResult<()>;

    fn stroke_circle(
        &mut self,
        center: PixelPoint,
        radius: f64,
        width: f64,
        color: Rgba8,
    ) -> RoutelapseResult<()>;
}

/// `vello_cpu` surface sized to one export frame. Stroke geometry is
/// expanded to an outline and filled, so every draw goes through one fill
/// path.
pub struct CpuSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> RoutelapseResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoutelapseError::render(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        let w: u16 = width.try_into().map_err(|_| {
            RoutelapseError::render(format!("surface width {width} exceeds u16 range"))
        })?;
        let h: u16 = height.try_into().map_err(|_| {
            RoutelapseError::render(format!("surface height {height} exceeds u16 range"))
        })?;
        Ok(Self { ctx: RenderContext::new(w, h), width: w, height: h })
    }

    fn fill_path_with(&mut self, path: &BezPath, color: Rgba8, opacity: f64) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
        let opacity = opacity.clamp(0.0, 1.0) as f32;
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_path(&bezpath_to_cpu(path));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }

    /// Rasterize and take the pixels. The surface is consumed; sessions
    /// build a fresh one per frame.
    pub fn finish(mut self) -> FrameRgba {
        self.ctx.flush();
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRgba {
            width: self.width as u32,
            height: self.height as u32,
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn fill_background(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            self.width as f64,
            self.height as f64,
        ));
    }

    fn stroke_polyline(
        &mut self,
        points: &[PixelPoint],
        style: &RouteStyle,
    ) -> RoutelapseResult<()> {
        if points.len() < 2 || style.width <= 0.0 {
            return Ok(());
        }
        let mut path = BezPath::new();
        path.move_to(points[0]);
        for p in &points[1..] {
            path.line_to(*p);
        }
        let stroke = Stroke::new(style.width).with_caps(Cap::Round).with_join(Join::Round);
        let outline = kurbo::stroke(path, &stroke, &StrokeOpts::default(), 0.1);
        self.fill_path_with(&outline, style.color, style.opacity);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: PixelPoint,
        radius: f64,
        color: Rgba8,
    ) -> RoutelapseResult<()> {
        if radius <= 0.0 {
            return Ok(());
        }
        self.fill_path_with(&Circle::new(center, radius).to_path(0.1), color, 1.0);
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: PixelPoint,
        radius: f64,
        width: f64,
        color: Rgba8,
    ) -> RoutelapseResult<()> {
        if radius <= 0.0 || width <= 0.0 {
            return Ok(());
        }
        let stroke = Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round);
        let ring = Circle::new(center, radius).to_path(0.1);
        let outline = kurbo::stroke(ring, &stroke, &StrokeOpts::default(), 0.1);
        self.fill_path_with(&outline, color, 1.0);
        Ok(())
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let cv = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            kurbo::PathEl::MoveTo(p) => out.move_to(cv(p)),
            kurbo::PathEl::LineTo(p) => out.line_to(cv(p)),
            kurbo::PathEl::QuadTo(p1, p2) => out.quad_to(cv(p1), cv(p2)),
            kurbo::PathEl::CurveTo(p1, p2, p3) => out.curve_to(cv(p1), cv(p2), cv(p3)),
            kurbo::PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
