//! Frame composition: ordered layer passes over one surface.

use crate::foundation::core::GeoPoint;
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::model::AnimationState;
use crate::projection::{ExportFrame, MapOracle};
use crate::render::primitives::{
    draw_debug_overlay, draw_position_marker, draw_route, draw_static_routes,
    visible_route_coordinates,
};
use crate::render::style::{BACKGROUND_COLOR, DebugStyle, MarkerStyle, RouteStyle};
use crate::render::surface::DrawSurface;

/// Target crosshair count when the debug overlay subsamples a route.
const DEBUG_OVERLAY_POINTS: usize = 50;

/// Composite one frame of a single-route animation. Layer order is fixed:
/// clear, background, static underlay, progress-clipped active route, head
/// marker, then the optional debug overlay. Without a usable current
/// activity this warns and leaves the surface untouched.
pub fn render_route_frame(
    surface: &mut dyn DrawSurface,
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    state: &AnimationState,
) -> RoutelapseResult<()> {
    let Some(activity) = state.current_activity.as_ref() else {
        tracing::warn!("no current activity; leaving the frame untouched");
        return Ok(());
    };
    if activity.coordinates.is_empty() {
        tracing::warn!(
            activity = %activity.id,
            "current activity has no coordinates; leaving the frame untouched"
        );
        return Ok(());
    }

    surface.clear();
    surface.fill_background(BACKGROUND_COLOR);

    if state.show_static_routes && !state.static_activities.is_empty() {
        draw_static_routes(
            surface,
            &state.static_activities,
            frame,
            oracle,
            &[activity.id.as_str()],
            &RouteStyle::muted(),
        )
        .map_err(layer_error("static route underlay"))?;
    }

    let visible = visible_route_coordinates(&activity.coordinates, state.progress);
    if !visible.is_empty() {
        let color = state.selected_color.unwrap_or(activity.color);
        draw_route(surface, visible, frame, oracle, &RouteStyle::active(color))
            .map_err(layer_error("active route"))?;
        if let Some(&head) = visible.last() {
            draw_position_marker(surface, head, frame, oracle, &MarkerStyle::filled(color))
                .map_err(layer_error("position marker"))?;
        }
    }

    if state.debug {
        overlay_route(surface, &activity.coordinates, frame, oracle)?;
    }
    Ok(())
}

/// Composite one frame of a concurrent multi-route animation: each entry is
/// clipped by its own progress and gets its own head marker, and the static
/// underlay excludes every active id. An empty entry list warns and leaves
/// the surface untouched.
pub fn render_multi_route_frame(
    surface: &mut dyn DrawSurface,
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    state: &AnimationState,
) -> RoutelapseResult<()> {
    if state.concurrent.is_empty() {
        tracing::warn!("no concurrent activities; leaving the frame untouched");
        return Ok(());
    }

    surface.clear();
    surface.fill_background(BACKGROUND_COLOR);

    if state.show_static_routes && !state.static_activities.is_empty() {
        let exclude: Vec<&str> = state.concurrent.iter().map(|e| e.activity.id.as_str()).collect();
        draw_static_routes(
            surface,
            &state.static_activities,
            frame,
            oracle,
            &exclude,
            &RouteStyle::muted(),
        )
        .map_err(layer_error("static route underlay"))?;
    }

    for entry in &state.concurrent {
        let visible = visible_route_coordinates(&entry.activity.coordinates, entry.progress);
        if visible.is_empty() {
            continue;
        }
        let color = entry.activity.color;
        draw_route(surface, visible, frame, oracle, &RouteStyle::active(color))
            .map_err(layer_error("active route"))?;
        if let Some(&head) = visible.last() {
            draw_position_marker(surface, head, frame, oracle, &MarkerStyle::filled(color))
                .map_err(layer_error("position marker"))?;
        }
    }

    if state.debug {
        for entry in &state.concurrent {
            overlay_route(surface, &entry.activity.coordinates, frame, oracle)?;
        }
    }
    Ok(())
}

/// Crosshairs over the full (unclipped) route, subsampled to keep dense
/// tracks readable.
fn overlay_route(
    surface: &mut dyn DrawSurface,
    coordinates: &[GeoPoint],
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
) -> RoutelapseResult<()> {
    let step = (coordinates.len() / DEBUG_OVERLAY_POINTS).max(1);
    let sampled: Vec<GeoPoint> = coordinates.iter().copied().step_by(step).collect();
    draw_debug_overlay(surface, &sampled, frame, oracle, &DebugStyle::default())
        .map_err(layer_error("debug overlay"))
}

fn layer_error(layer: &'static str) -> impl FnOnce(RoutelapseError) -> RoutelapseError {
    move |e| RoutelapseError::render(format!("{layer} failed: {e}"))
}
