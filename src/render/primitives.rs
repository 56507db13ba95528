//! Stateless route drawing over any [`DrawSurface`].

use crate::foundation::core::{GeoPoint, PixelPoint, Rgba8};
use crate::foundation::error::RoutelapseResult;
use crate::model::Activity;
use crate::projection::{ExportFrame, MapOracle, project};
use crate::render::style::{DebugStyle, MarkerStyle, RouteStyle};
use crate::render::surface::DrawSurface;

/// Prefix of `coordinates` visible at `progress` percent of the animation:
/// `floor(progress / 100 * len)` points, never fewer than one once progress
/// is positive, the whole route at 100 and beyond. Zero (or non-finite)
/// progress shows nothing.
pub fn visible_route_coordinates(coordinates: &[GeoPoint], progress: f64) -> &[GeoPoint] {
    if coordinates.is_empty() {
        return coordinates;
    }
    let progress = if progress.is_finite() { progress.clamp(0.0, 100.0) } else { 0.0 };
    if progress <= 0.0 {
        return &coordinates[..0];
    }
    let count = ((progress / 100.0) * coordinates.len() as f64).floor() as usize;
    &coordinates[..count.clamp(1, coordinates.len())]
}

/// Project and stroke one route. Fewer than two points draws nothing.
pub fn draw_route(
    surface: &mut dyn DrawSurface,
    coordinates: &[GeoPoint],
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    style: &RouteStyle,
) -> RoutelapseResult<()> {
    if coordinates.len() < 2 {
        return Ok(());
    }
    let points: Vec<PixelPoint> = coordinates.iter().map(|&c| project(c, frame, oracle)).collect();
    surface.stroke_polyline(&points, style)
}

/// Underlay pass over every activity except the excluded ids and those with
/// no coordinates. Returns how many routes were handed to the surface.
pub fn draw_static_routes(
    surface: &mut dyn DrawSurface,
    activities: &[Activity],
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    exclude_ids: &[&str],
    style: &RouteStyle,
) -> RoutelapseResult<usize> {
    let mut drawn = 0;
    for activity in activities {
        if activity.coordinates.is_empty() || exclude_ids.contains(&activity.id.as_str()) {
            continue;
        }
        draw_route(surface, &activity.coordinates, frame, oracle, style)?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Current-position marker: white disc, dark ring, colored disc inside. The
/// inner disc is clamped to the ring radius so the layering never inverts.
pub fn draw_position_marker(
    surface: &mut dyn DrawSurface,
    position: GeoPoint,
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    style: &MarkerStyle,
) -> RoutelapseResult<()> {
    let center = project(position, frame, oracle);
    surface.fill_circle(center, style.outer_radius, Rgba8::WHITE)?;
    surface.stroke_circle(center, style.outer_radius, style.ring_width, style.ring_color)?;
    surface.fill_circle(center, style.inner_radius.min(style.outer_radius), style.fill)?;
    Ok(())
}

/// Crosshair at every supplied coordinate. Callers subsample; this draws
/// exactly what it is given.
pub fn draw_debug_overlay(
    surface: &mut dyn DrawSurface,
    coordinates: &[GeoPoint],
    frame: &ExportFrame,
    oracle: &dyn MapOracle,
    style: &DebugStyle,
) -> RoutelapseResult<()> {
    let stroke = RouteStyle { color: style.color, width: style.width, opacity: 1.0 };
    for &coordinate in coordinates {
        let p = project(coordinate, frame, oracle);
        surface.stroke_polyline(
            &[PixelPoint::new(p.x - style.arm, p.y), PixelPoint::new(p.x + style.arm, p.y)],
            &stroke,
        )?;
        surface.stroke_polyline(
            &[PixelPoint::new(p.x, p.y - style.arm), PixelPoint::new(p.x, p.y + style.arm)],
            &stroke,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::{DEFAULT_ROUTE_COLOR, MARKER_RING_COLOR};
    use crate::render::testing::{PlanarOracle, RecordingSurface, SurfaceCall};

    fn frame() -> ExportFrame {
        ExportFrame { left: 100.0, top: 50.0, width: 640.0, height: 360.0 }
    }

    fn route(n: usize) -> Vec<GeoPoint> {
        (0..n).map(|i| GeoPoint::new(200.0 + i as f64, 300.0 + i as f64 * 2.0)).collect()
    }

    fn activity(id: &str, n: usize) -> Activity {
        Activity {
            id: id.into(),
            name: String::new(),
            color: DEFAULT_ROUTE_COLOR,
            coordinates: route(n),
        }
    }

    #[test]
    fn progress_prefix_boundaries() {
        let coords = route(10);
        assert!(visible_route_coordinates(&coords, 0.0).is_empty());
        assert_eq!(visible_route_coordinates(&coords, 0.5).len(), 1);
        assert_eq!(visible_route_coordinates(&coords, 50.0).len(), 5);
        assert_eq!(visible_route_coordinates(&coords, 99.0).len(), 9);
        assert_eq!(visible_route_coordinates(&coords, 100.0).len(), 10);
        assert_eq!(visible_route_coordinates(&coords, 250.0).len(), 10);
        assert!(visible_route_coordinates(&coords, -5.0).is_empty());
        assert!(visible_route_coordinates(&coords, f64::NAN).is_empty());
        assert!(visible_route_coordinates(&[], 80.0).is_empty());
    }

    #[test]
    fn progress_prefix_is_a_view_into_the_input() {
        let coords = route(4);
        let visible = visible_route_coordinates(&coords, 75.0);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0], coords[0]);
        assert_eq!(visible.as_ptr(), coords.as_ptr());
    }

    #[test]
    fn short_routes_draw_nothing() {
        let mut surface = RecordingSurface::new();
        let oracle = PlanarOracle::default();
        draw_route(&mut surface, &[], &frame(), &oracle, &RouteStyle::default()).unwrap();
        draw_route(&mut surface, &route(1), &frame(), &oracle, &RouteStyle::default()).unwrap();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn routes_project_into_a_single_polyline() {
        let mut surface = RecordingSurface::new();
        let style = RouteStyle::active(Rgba8::opaque(9, 9, 9));
        draw_route(&mut surface, &route(5), &frame(), &PlanarOracle::default(), &style).unwrap();
        assert_eq!(
            surface.calls,
            vec![SurfaceCall::StrokePolyline {
                points: 5,
                color: style.color,
                width: 4.0,
                opacity: 1.0
            }]
        );
    }

    #[test]
    fn static_pass_skips_excluded_and_empty_activities() {
        let activities = vec![
            activity("a", 3),
            activity("b", 4),
            activity("c", 5),
            activity("d", 2),
            activity("e", 6),
        ];
        let mut surface = RecordingSurface::new();
        let drawn = draw_static_routes(
            &mut surface,
            &activities,
            &frame(),
            &PlanarOracle::default(),
            &["b"],
            &RouteStyle::muted(),
        )
        .unwrap();
        assert_eq!(drawn, 4);
        assert_eq!(surface.polyline_count(), 4);

        let mut with_empty = activities.clone();
        with_empty[2].coordinates.clear();
        let mut surface = RecordingSurface::new();
        let drawn = draw_static_routes(
            &mut surface,
            &with_empty,
            &frame(),
            &PlanarOracle::default(),
            &["b"],
            &RouteStyle::muted(),
        )
        .unwrap();
        assert_eq!(drawn, 3, "empty activities draw nothing");
        assert_eq!(surface.polyline_count(), 3);
    }

    #[test]
    fn marker_layers_in_order() {
        let mut surface = RecordingSurface::new();
        let style = MarkerStyle::filled(Rgba8::opaque(0x10, 0x20, 0x30));
        draw_position_marker(
            &mut surface,
            GeoPoint::new(120.0, 340.0),
            &frame(),
            &PlanarOracle::default(),
            &style,
        )
        .unwrap();
        assert_eq!(
            surface.calls,
            vec![
                SurfaceCall::FillCircle { radius: 8.0, color: Rgba8::WHITE },
                SurfaceCall::StrokeCircle { radius: 8.0, width: 2.0, color: MARKER_RING_COLOR },
                SurfaceCall::FillCircle { radius: 5.0, color: style.fill },
            ]
        );
    }

    #[test]
    fn marker_clamps_the_inner_disc_to_the_ring() {
        let mut surface = RecordingSurface::new();
        let style = MarkerStyle { inner_radius: 9.5, ..MarkerStyle::default() };
        draw_position_marker(
            &mut surface,
            GeoPoint::new(0.0, 0.0),
            &frame(),
            &PlanarOracle::default(),
            &style,
        )
        .unwrap();
        match surface.calls.last() {
            Some(SurfaceCall::FillCircle { radius, .. }) => assert_eq!(*radius, 8.0),
            other => panic!("unexpected final call: {other:?}"),
        }
    }

    #[test]
    fn debug_overlay_draws_two_arms_per_point() {
        let mut surface = RecordingSurface::new();
        draw_debug_overlay(
            &mut surface,
            &route(4),
            &frame(),
            &PlanarOracle::default(),
            &DebugStyle::default(),
        )
        .unwrap();
        assert_eq!(surface.polyline_count(), 8);
        match surface.calls.first() {
            Some(SurfaceCall::StrokePolyline { points, width, .. }) => {
                assert_eq!(*points, 2);
                assert_eq!(*width, 1.0);
            }
            other => panic!("unexpected first call: {other:?}"),
        }
    }
}
