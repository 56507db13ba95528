//! Drawing: raster surface, route primitives and frame composition.

pub mod compositor;
pub mod primitives;
pub mod raster;
pub mod style;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use compositor::{render_multi_route_frame, render_route_frame};
pub use primitives::{
    draw_debug_overlay, draw_position_marker, draw_route, draw_static_routes,
    visible_route_coordinates,
};
pub use raster::{crop_rgba8, scale_rgba8};
pub use style::{
    BACKGROUND_COLOR, DEFAULT_ROUTE_COLOR, DebugStyle, MarkerStyle, RouteStyle, STATIC_ROUTE_COLOR,
};
pub use surface::{CpuSurface, DrawSurface, FrameRgba};
