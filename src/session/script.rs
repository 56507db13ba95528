//! Scripted sessions: drive a whole recording from a [`RecordingDoc`].
//!
//! This is the headless entry point used by the CLI. Interactive embedders
//! drive a [`Recorder`] by hand instead.

use crate::export::packager::ExportArtifact;
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::model::{ActivityProgress, AnimationState, RecordingDoc, StateUpdate};
use crate::projection::ExportFrame;
use crate::render::compositor::{render_multi_route_frame, render_route_frame};
use crate::render::raster::scale_rgba8;
use crate::render::surface::{CpuSurface, FrameRgba};
use crate::session::recorder::Recorder;

/// Run `doc` as a complete capture session and return the packaged frames.
///
/// Progress walks linearly from the first frame to 100 percent over the
/// configured duration; with several animated activities they all advance
/// in lockstep.
#[tracing::instrument(skip_all)]
pub fn run_scripted_session(doc: &RecordingDoc) -> RoutelapseResult<ExportArtifact> {
    doc.validate()?;
    let oracle = doc.build_oracle()?;
    let mut recorder = Recorder::new(doc.options, Some(Box::new(oracle)), None)?;
    if let Some(frame) = doc.export_frame {
        recorder.set_export_frame(frame)?;
    }
    recorder.update_state(initial_update(doc));
    recorder.start();
    let total = doc.options.total_frames();
    for index in 1..=total {
        let progress = index as f64 / total as f64 * 100.0;
        recorder.update_state(progress_update(doc, progress));
        recorder.capture_frame();
        if recorder.stop_requested() {
            break;
        }
    }
    recorder
        .stop()?
        .ok_or_else(|| RoutelapseError::render("scripted session produced no artifact"))
}

/// Render one frame of `doc` at `progress` percent, scaled to the
/// configured output resolution.
pub fn render_scripted_frame(doc: &RecordingDoc, progress: f64) -> RoutelapseResult<FrameRgba> {
    doc.validate()?;
    let oracle = doc.build_oracle()?;
    let frame = match doc.export_frame {
        Some(frame) => frame,
        None => {
            let container = (doc.viewport.container[0], doc.viewport.container[1]);
            ExportFrame::centered_with_aspect(container, doc.options.resolution.aspect_ratio())
        }
    };
    let mut state = AnimationState::default();
    state.apply(initial_update(doc));
    state.apply(progress_update(doc, progress));
    let (width, height) = frame.pixel_size();
    let mut surface = CpuSurface::new(width, height)?;
    if state.concurrent.is_empty() {
        render_route_frame(&mut surface, &frame, &oracle, &state)?;
    } else {
        render_multi_route_frame(&mut surface, &frame, &oracle, &state)?;
    }
    let raw = surface.finish();
    let (out_width, out_height) = doc.options.resolution.dimensions();
    scale_rgba8(&raw, out_width, out_height)
}

fn initial_update(doc: &RecordingDoc) -> StateUpdate {
    StateUpdate {
        current_activity: doc.animated().first().map(|a| (*a).clone()),
        show_static_routes: Some(doc.show_static_routes),
        static_activities: Some(doc.activities.clone()),
        debug: Some(doc.debug),
        ..StateUpdate::default()
    }
}

fn progress_update(doc: &RecordingDoc, progress: f64) -> StateUpdate {
    let animated = doc.animated();
    if animated.len() > 1 {
        let concurrent = animated
            .into_iter()
            .map(|a| ActivityProgress { activity: a.clone(), progress })
            .collect();
        StateUpdate { concurrent: Some(concurrent), ..StateUpdate::default() }
    } else {
        StateUpdate { progress: Some(progress), ..StateUpdate::default() }
    }
}
