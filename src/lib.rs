//! Routelapse renders GPS route animations and exports them as numbered
//! PNG frame sequences packed in a ZIP archive.
//!
//! The API is session-oriented:
//!
//! - Describe the scene: [`Activity`] tracks, a [`MercatorView`] viewport
//!   and an [`ExportFrame`] capture rectangle
//! - Drive a [`Recorder`] frame by frame, or run a whole [`RecordingDoc`]
//!   through [`run_scripted_session`]
//! - Write the resulting [`ExportArtifact`] archive to disk
#![forbid(unsafe_code)]

pub mod export;
pub mod foundation;
pub mod model;
pub mod projection;
pub mod render;
pub mod session;

pub use crate::foundation::core::{FrameRate, GeoPoint, OutputResolution, PixelPoint, Rgba8};
pub use crate::foundation::error::{RoutelapseError, RoutelapseResult};

pub use crate::export::packager::{ExportArtifact, frame_entry_name, package_frames};
pub use crate::export::png::{EncodedFrame, encode_png};
pub use crate::model::{
    Activity, ActivityProgress, AnimationState, RecorderOptions, RecordingDoc, StateUpdate,
    StrategyKind, Viewport,
};
pub use crate::projection::{ExportFrame, MapOracle, MercatorView, is_point_in_bounds, project};
pub use crate::render::surface::{DrawSurface, FrameRgba};
pub use crate::session::recorder::Recorder;
pub use crate::session::script::{render_scripted_frame, run_scripted_session};
pub use crate::session::strategy::SnapshotSource;
