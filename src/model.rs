//! Domain model: activities, animation state and the recording document.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameRate, GeoPoint, OutputResolution, Rgba8};
use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::projection::{ExportFrame, MercatorView};
use crate::render::style::DEFAULT_ROUTE_COLOR;

/// Upper bound on a recording session, in seconds.
pub const MAX_DURATION_SECS: f64 = 600.0;

/// One recorded GPS activity: an id, a display name, a route color and the
/// ordered track coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_route_color")]
    pub color: Rgba8,
    #[serde(default)]
    pub coordinates: Vec<GeoPoint>,
}

fn default_route_color() -> Rgba8 {
    DEFAULT_ROUTE_COLOR
}

impl Activity {
    pub fn validate(&self) -> RoutelapseResult<()> {
        if self.id.trim().is_empty() {
            return Err(RoutelapseError::validation("activity id must be non-empty"));
        }
        for (i, point) in self.coordinates.iter().enumerate() {
            point.validate().map_err(|e| {
                RoutelapseError::validation(format!("activity '{}' coordinate {i}: {e}", self.id))
            })?;
        }
        Ok(())
    }
}

/// An activity paired with its own animation progress, for concurrent
/// multi-route playback.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProgress {
    pub activity: Activity,
    pub progress: f64,
}

/// Everything the compositor needs to draw one frame. Owned by the recorder
/// and mutated only through [`StateUpdate`]s.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub current_activity: Option<Activity>,
    /// Animation progress percentage, kept in [0, 100].
    pub progress: f64,
    pub show_static_routes: bool,
    pub static_activities: Vec<Activity>,
    /// Overrides the current activity's color when set.
    pub selected_color: Option<Rgba8>,
    /// Non-empty switches composition to the multi-route path.
    pub concurrent: Vec<ActivityProgress>,
    pub debug: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current_activity: None,
            progress: 0.0,
            show_static_routes: true,
            static_activities: Vec::new(),
            selected_color: None,
            concurrent: Vec::new(),
            debug: false,
        }
    }
}

impl AnimationState {
    /// Shallow-merge `update`: only the fields it carries change. Progress
    /// values are clamped to [0, 100].
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(activity) = update.current_activity {
            self.current_activity = Some(activity);
        }
        if let Some(progress) = update.progress {
            self.progress = clamp_progress(progress);
        }
        if let Some(show) = update.show_static_routes {
            self.show_static_routes = show;
        }
        if let Some(activities) = update.static_activities {
            self.static_activities = activities;
        }
        if let Some(color) = update.selected_color {
            self.selected_color = Some(color);
        }
        if let Some(mut concurrent) = update.concurrent {
            for entry in &mut concurrent {
                entry.progress = clamp_progress(entry.progress);
            }
            self.concurrent = concurrent;
        }
        if let Some(debug) = update.debug {
            self.debug = debug;
        }
    }
}

/// Clamp a progress percentage to [0, 100]. NaN maps to zero so the state
/// never holds a non-finite progress.
fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 100.0) }
}

/// A partial [`AnimationState`]: absent fields leave the state untouched.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub current_activity: Option<Activity>,
    pub progress: Option<f64>,
    pub show_static_routes: Option<bool>,
    pub static_activities: Option<Vec<Activity>>,
    pub selected_color: Option<Rgba8>,
    pub concurrent: Option<Vec<ActivityProgress>>,
    pub debug: Option<bool>,
}

/// How frame pixels are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Redraw every frame from scratch on a CPU surface.
    #[default]
    DirectDraw,
    /// Crop frames out of an externally rendered raster.
    Snapshot,
}

/// Recorder configuration, fixed for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderOptions {
    pub resolution: OutputResolution,
    pub frame_rate: FrameRate,
    pub duration_secs: f64,
    pub strategy: StrategyKind,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            resolution: OutputResolution::default(),
            frame_rate: FrameRate::default(),
            duration_secs: 10.0,
            strategy: StrategyKind::default(),
        }
    }
}

impl RecorderOptions {
    pub fn validate(&self) -> RoutelapseResult<()> {
        if !self.duration_secs.is_finite()
            || self.duration_secs <= 0.0
            || self.duration_secs > MAX_DURATION_SECS
        {
            return Err(RoutelapseError::validation(format!(
                "duration must be in (0, {MAX_DURATION_SECS}] seconds, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }

    /// Frames a full session produces, never zero.
    pub fn total_frames(&self) -> u64 {
        ((self.duration_secs * self.frame_rate.as_u32() as f64).round() as u64).max(1)
    }
}

/// The map viewport of a recording document. Either an explicit center/zoom
/// pair, or a fit around all activity coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Container size, `[width, height]` pixels.
    pub container: [u32; 2],
    #[serde(default)]
    pub center: Option<GeoPoint>,
    #[serde(default)]
    pub zoom: Option<f64>,
    /// Margin kept free on every side when fitting, in pixels.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
}

fn default_fit_padding() -> f64 {
    40.0
}

impl Viewport {
    pub fn validate(&self) -> RoutelapseResult<()> {
        if self.container[0] == 0 || self.container[1] == 0 {
            return Err(RoutelapseError::validation(format!(
                "viewport container must be non-empty, got {}x{}",
                self.container[0], self.container[1]
            )));
        }
        if self.center.is_some() != self.zoom.is_some() {
            return Err(RoutelapseError::validation(
                "viewport center and zoom must be given together",
            ));
        }
        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err(RoutelapseError::validation(format!(
                "fit padding must be a finite value >= 0, got {}",
                self.fit_padding
            )));
        }
        Ok(())
    }
}

/// A complete scripted recording: activities, viewport and session options.
/// This is the JSON document the CLI consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingDoc {
    pub activities: Vec<Activity>,
    pub viewport: Viewport,
    #[serde(default)]
    pub options: RecorderOptions,
    /// Ids to animate; empty animates the first activity. More than one id
    /// animates them concurrently.
    #[serde(default)]
    pub animate: Vec<String>,
    #[serde(default = "default_true")]
    pub show_static_routes: bool,
    #[serde(default)]
    pub debug: bool,
    /// Explicit capture rectangle; omitted derives a centered one.
    #[serde(default)]
    pub export_frame: Option<ExportFrame>,
}

fn default_true() -> bool {
    true
}

impl RecordingDoc {
    pub fn validate(&self) -> RoutelapseResult<()> {
        if self.activities.is_empty() {
            return Err(RoutelapseError::validation("document needs at least one activity"));
        }
        let mut seen = BTreeSet::new();
        for activity in &self.activities {
            activity.validate()?;
            if !seen.insert(activity.id.as_str()) {
                return Err(RoutelapseError::validation(format!(
                    "duplicate activity id '{}'",
                    activity.id
                )));
            }
        }
        for id in &self.animate {
            if !self.activities.iter().any(|a| &a.id == id) {
                return Err(RoutelapseError::validation(format!(
                    "animate references unknown activity id '{id}'"
                )));
            }
        }
        self.viewport.validate()?;
        self.options.validate()?;
        if let Some(frame) = &self.export_frame {
            frame.validate()?;
        }
        if self.viewport.center.is_none()
            && self.activities.iter().all(|a| a.coordinates.is_empty())
        {
            return Err(RoutelapseError::validation(
                "fitting the viewport requires at least one activity coordinate",
            ));
        }
        Ok(())
    }

    /// Build the Mercator oracle this document describes.
    pub fn build_oracle(&self) -> RoutelapseResult<MercatorView> {
        let container = (self.viewport.container[0], self.viewport.container[1]);
        match (self.viewport.center, self.viewport.zoom) {
            (Some(center), Some(zoom)) => MercatorView::new(container, center, zoom),
            _ => {
                let all: Vec<GeoPoint> =
                    self.activities.iter().flat_map(|a| a.coordinates.iter().copied()).collect();
                MercatorView::fit_bounds(container, &all, self.viewport.fit_padding)
            }
        }
    }

    /// The activities to animate, in `animate` order; empty falls back to
    /// the first activity.
    pub fn animated(&self) -> Vec<&Activity> {
        if self.animate.is_empty() {
            self.activities.first().into_iter().collect()
        } else {
            self.animate
                .iter()
                .filter_map(|id| self.activities.iter().find(|a| &a.id == id))
                .collect()
        }
    }
}
