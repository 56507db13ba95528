//! Pure buffer operations on RGBA8 frames: deterministic scaling and
//! viewport cropping.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::render::surface::FrameRgba;

/// Bilinear resample to `dst_width` x `dst_height`. Samples at pixel centers
/// with edge clamping; the same input always yields the same output bytes on
/// every platform. Matching dimensions return a plain copy.
pub fn scale_rgba8(src: &FrameRgba, dst_width: u32, dst_height: u32) -> RoutelapseResult<FrameRgba> {
    if src.width == 0 || src.height == 0 {
        return Err(RoutelapseError::render("cannot scale an empty frame"));
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(RoutelapseError::render(format!(
            "scale target must be non-empty, got {dst_width}x{dst_height}"
        )));
    }
    if (src.width, src.height) == (dst_width, dst_height) {
        return Ok(src.clone());
    }

    let sw = src.width as usize;
    let sh = src.height as usize;
    let dw = dst_width as usize;
    let dh = dst_height as usize;
    let x_ratio = src.width as f64 / dst_width as f64;
    let y_ratio = src.height as f64 / dst_height as f64;
    let mut data = vec![0u8; FrameRgba::expected_len(dst_width, dst_height)];

    for dy in 0..dh {
        let sy = ((dy as f64 + 0.5) * y_ratio - 0.5).clamp(0.0, (sh - 1) as f64);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(sh - 1);
        let fy = sy - y0 as f64;
        for dx in 0..dw {
            let sx = ((dx as f64 + 0.5) * x_ratio - 0.5).clamp(0.0, (sw - 1) as f64);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(sw - 1);
            let fx = sx - x0 as f64;
            let di = (dy * dw + dx) * 4;
            for c in 0..4 {
                let p00 = src.data[(y0 * sw + x0) * 4 + c] as f64;
                let p10 = src.data[(y0 * sw + x1) * 4 + c] as f64;
                let p01 = src.data[(y1 * sw + x0) * 4 + c] as f64;
                let p11 = src.data[(y1 * sw + x1) * 4 + c] as f64;
                let top = p00 + (p10 - p00) * fx;
                let bottom = p01 + (p11 - p01) * fx;
                let v = top + (bottom - top) * fy;
                data[di + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(FrameRgba { width: dst_width, height: dst_height, data })
}

/// Copy the `width` x `height` window at (`origin_x`, `origin_y`) out of
/// `src`. The origin is rounded to whole pixels; regions outside the source
/// are filled with `fill`.
pub fn crop_rgba8(
    src: &FrameRgba,
    origin_x: f64,
    origin_y: f64,
    width: u32,
    height: u32,
    fill: Rgba8,
) -> FrameRgba {
    let mut out = FrameRgba::filled(width, height, fill);
    if width == 0 || height == 0 {
        return out;
    }
    if !origin_x.is_finite() || !origin_y.is_finite() {
        tracing::warn!(origin_x, origin_y, "non-finite crop origin; returning fill only");
        return out;
    }
    let ox = origin_x.round() as i64;
    let oy = origin_y.round() as i64;
    let src_w = src.width as i64;
    let src_h = src.height as i64;

    for dy in 0..height as i64 {
        let sy = oy + dy;
        if sy < 0 || sy >= src_h {
            continue;
        }
        let dx0 = (-ox).clamp(0, width as i64);
        let dx1 = (src_w - ox).clamp(0, width as i64);
        if dx0 >= dx1 {
            continue;
        }
        let run = (dx1 - dx0) as usize * 4;
        let src_start = ((sy * src_w + ox + dx0) * 4) as usize;
        let dst_start = ((dy * width as i64 + dx0) * 4) as usize;
        out.data[dst_start..dst_start + run].copy_from_slice(&src.data[src_start..src_start + run]);
    }
    out
}
