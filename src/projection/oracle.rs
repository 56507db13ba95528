//! Map oracles: the source of truth for where coordinates land on screen.

use std::f64::consts::PI;

use crate::foundation::core::{GeoPoint, PixelPoint};
use crate::foundation::error::{RoutelapseError, RoutelapseResult};

/// Answers where a geographic point sits inside the map container. Capture
/// code never reimplements projection math on its own; it asks the oracle
/// and offsets the result by the export frame.
pub trait MapOracle {
    /// Container dimensions in pixels.
    fn container_size(&self) -> (u32, u32);

    /// Container-pixel position of `point` under the current view.
    fn container_point(&self, point: GeoPoint) -> PixelPoint;
}

/// Side of the Mercator world square at zoom 0, in pixels.
const TILE_SIZE: f64 = 256.0;
/// Latitude where the projection is cut off.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;
const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 19.0;

/// Spherical Web-Mercator view over a fixed container, the built-in oracle
/// for headless sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorView {
    container_width: u32,
    container_height: u32,
    center: GeoPoint,
    zoom: f64,
}

impl MercatorView {
    pub fn new(container: (u32, u32), center: GeoPoint, zoom: f64) -> RoutelapseResult<Self> {
        if container.0 == 0 || container.1 == 0 {
            return Err(RoutelapseError::projection(format!(
                "container must be non-empty, got {}x{}",
                container.0, container.1
            )));
        }
        center.validate()?;
        if !zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(RoutelapseError::projection(format!(
                "zoom must be in [{MIN_ZOOM}, {MAX_ZOOM}], got {zoom}"
            )));
        }
        Ok(Self { container_width: container.0, container_height: container.1, center, zoom })
    }

    /// View that fits every point inside the container with `padding` pixels
    /// kept free on each side. A single point (or a degenerate bounding box)
    /// centers at maximum zoom.
    pub fn fit_bounds(
        container: (u32, u32),
        points: &[GeoPoint],
        padding: f64,
    ) -> RoutelapseResult<Self> {
        if points.is_empty() {
            return Err(RoutelapseError::projection("cannot fit a view around zero points"));
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(RoutelapseError::projection(format!(
                "fit padding must be a finite value >= 0, got {padding}"
            )));
        }
        let avail_w = container.0 as f64 - 2.0 * padding;
        let avail_h = container.1 as f64 - 2.0 * padding;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return Err(RoutelapseError::projection(format!(
                "padding {padding} leaves no room in a {}x{} container",
                container.0, container.1
            )));
        }
        let mut min = PixelPoint::new(f64::INFINITY, f64::INFINITY);
        let mut max = PixelPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for point in points {
            point.validate()?;
            let p = project_world(*point, TILE_SIZE);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let span_x = max.x - min.x;
        let span_y = max.y - min.y;
        let zoom_x = if span_x > 0.0 { (avail_w / span_x).log2() } else { MAX_ZOOM };
        let zoom_y = if span_y > 0.0 { (avail_h / span_y).log2() } else { MAX_ZOOM };
        let zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);
        let center = unproject_world(
            PixelPoint::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0),
            TILE_SIZE,
        );
        Self::new(container, center, zoom)
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }
}

impl MapOracle for MercatorView {
    fn container_size(&self) -> (u32, u32) {
        (self.container_width, self.container_height)
    }

    fn container_point(&self, point: GeoPoint) -> PixelPoint {
        let world = self.world_size();
        let p = project_world(point, world);
        let c = project_world(self.center, world);
        PixelPoint::new(
            p.x - c.x + self.container_width as f64 / 2.0,
            p.y - c.y + self.container_height as f64 / 2.0,
        )
    }
}

/// World-pixel position on a `world`-sized Mercator square. Latitude is
/// clamped to the projection cutoff.
fn project_world(point: GeoPoint, world: f64) -> PixelPoint {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let siny = lat.to_radians().sin();
    let x = (point.lng / 360.0 + 0.5) * world;
    let y = (0.5 - ((1.0 + siny) / (1.0 - siny)).ln() / (4.0 * PI)) * world;
    PixelPoint::new(x, y)
}

fn unproject_world(p: PixelPoint, world: f64) -> GeoPoint {
    let lng = (p.x / world - 0.5) * 360.0;
    let lat = (2.0 * PI * (0.5 - p.y / world)).tanh().asin().to_degrees();
    GeoPoint::new(lat, lng)
}
