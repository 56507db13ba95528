//! The recording session state machine.
//!
//! A [`Recorder`] is idle until [`Recorder::start`] opens a session, then
//! captures frames on demand until [`Recorder::stop`] packages them and
//! returns the recorder to idle. Lifecycle misuse (double start, stop or
//! capture while idle) is logged and ignored rather than treated as an
//! error.

use std::time::Instant;

use crate::export::packager::{ExportArtifact, package_frames};
use crate::export::png::{EncodedFrame, encode_png};
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::model::{AnimationState, RecorderOptions, StateUpdate, StrategyKind};
use crate::projection::{ExportFrame, MapOracle};
use crate::render::raster::scale_rgba8;
use crate::session::strategy::{
    CaptureStrategy, DirectDrawStrategy, SnapshotSource, SnapshotStrategy,
};

/// One progress log line every this many captured frames.
const PROGRESS_LOG_EVERY: usize = 30;

struct CaptureSession {
    frame: ExportFrame,
    frames: Vec<EncodedFrame>,
    started: Instant,
}

/// Captures animation frames and packages them into an export archive.
pub struct Recorder {
    options: RecorderOptions,
    strategy: Box<dyn CaptureStrategy>,
    state: AnimationState,
    export_frame: Option<ExportFrame>,
    session: Option<CaptureSession>,
    stop_requested: bool,
}

impl Recorder {
    /// Build a recorder for `options`. The capture strategy is fixed here:
    /// direct draw needs a map `oracle`, snapshot capture needs a `snapshot`
    /// source. A direct-draw request without an oracle falls back to the
    /// snapshot source when one is available.
    pub fn new(
        options: RecorderOptions,
        oracle: Option<Box<dyn MapOracle>>,
        snapshot: Option<Box<dyn SnapshotSource>>,
    ) -> RoutelapseResult<Self> {
        options.validate()?;
        let strategy: Box<dyn CaptureStrategy> = match (options.strategy, oracle, snapshot) {
            (StrategyKind::DirectDraw, Some(oracle), _) => {
                Box::new(DirectDrawStrategy::new(oracle))
            }
            (StrategyKind::DirectDraw, None, Some(source)) => {
                tracing::warn!("no map oracle for direct-draw capture, falling back to snapshots");
                Box::new(SnapshotStrategy::new(source))
            }
            (StrategyKind::Snapshot, _, Some(source)) => Box::new(SnapshotStrategy::new(source)),
            (StrategyKind::Snapshot, _, None) => {
                return Err(RoutelapseError::validation(
                    "snapshot capture requires a snapshot source",
                ));
            }
            (StrategyKind::DirectDraw, None, None) => {
                return Err(RoutelapseError::validation(
                    "direct-draw capture requires a map oracle or a snapshot source",
                ));
            }
        };
        tracing::debug!(strategy = strategy.label(), "capture strategy selected");
        Ok(Self {
            options,
            strategy,
            state: AnimationState::default(),
            export_frame: None,
            session: None,
            stop_requested: false,
        })
    }

    /// Pin the capture rectangle for the next session. Changing it while a
    /// session runs is ignored with a warning.
    pub fn set_export_frame(&mut self, frame: ExportFrame) -> RoutelapseResult<()> {
        frame.validate()?;
        if self.session.is_some() {
            tracing::warn!("export frame change ignored while recording");
            return Ok(());
        }
        self.export_frame = Some(frame);
        Ok(())
    }

    /// The pinned capture rectangle, if any.
    pub fn export_frame(&self) -> Option<ExportFrame> {
        self.export_frame
    }

    /// Open a session. A second `start` while recording is a warning no-op.
    /// Without a pinned export frame a rectangle matching the output aspect
    /// ratio is centered in the capture container.
    pub fn start(&mut self) {
        if self.session.is_some() {
            tracing::warn!("capture already running, ignoring start");
            return;
        }
        let frame = match self.export_frame {
            Some(frame) => frame,
            None => {
                let container = self.strategy.container_size();
                let frame = ExportFrame::centered_with_aspect(
                    container,
                    self.options.resolution.aspect_ratio(),
                );
                tracing::warn!(
                    left = frame.left,
                    top = frame.top,
                    width = frame.width,
                    height = frame.height,
                    "no export frame set, capturing a centered default"
                );
                frame
            }
        };
        self.stop_requested = false;
        self.session =
            Some(CaptureSession { frame, frames: Vec::new(), started: Instant::now() });
        tracing::debug!(total_frames = self.options.total_frames(), "capture started");
    }

    /// Merge a state update; it takes effect from the next captured frame.
    pub fn update_state(&mut self, update: StateUpdate) {
        self.state.apply(update);
    }

    /// Render, scale and encode one frame. Outside a session this is a
    /// logged no-op. A failed frame is logged and skipped so a single bad
    /// frame cannot abort the whole session.
    pub fn capture_frame(&mut self) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("capture_frame while idle, ignoring");
            return;
        };
        let (out_width, out_height) = self.options.resolution.dimensions();
        let result = self
            .strategy
            .render_frame(&session.frame, &self.state)
            .and_then(|raw| scale_rgba8(&raw, out_width, out_height))
            .and_then(|scaled| encode_png(&scaled));
        match result {
            Ok(encoded) => {
                session.frames.push(encoded);
                let captured = session.frames.len();
                if captured.is_multiple_of(PROGRESS_LOG_EVERY) {
                    tracing::debug!(captured, "capture progress");
                }
                if captured as u64 >= self.options.total_frames() && !self.stop_requested {
                    self.stop_requested = true;
                    tracing::debug!(captured, "configured duration reached, requesting stop");
                }
            }
            Err(error) => {
                tracing::error!(error = %error, "frame capture failed, skipping frame");
            }
        }
    }

    /// Ask the running session to stop after the current frame. The driver
    /// polls [`Recorder::stop_requested`] and calls [`Recorder::stop`].
    pub fn request_stop(&mut self) {
        if self.session.is_some() && !self.stop_requested {
            self.stop_requested = true;
            tracing::debug!("stop requested");
        }
    }

    /// Close the session and package the captured frames. While idle this is
    /// a warning no-op returning `None`. All per-session state is cleared,
    /// including the pinned export frame.
    pub fn stop(&mut self) -> RoutelapseResult<Option<ExportArtifact>> {
        let Some(session) = self.session.take() else {
            tracing::warn!("stop while idle, ignoring");
            return Ok(None);
        };
        self.stop_requested = false;
        self.export_frame = None;
        let elapsed = session.started.elapsed().as_secs_f64();
        let mut artifact = package_frames(&session.frames, self.options.frame_rate)?;
        artifact.elapsed_secs = elapsed;
        tracing::debug!(frames = artifact.frame_count, elapsed_secs = elapsed, "capture finished");
        Ok(Some(artifact))
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Frames captured so far in the running session.
    pub fn frame_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.frames.len())
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }
}
