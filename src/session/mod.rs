//! Capture session lifecycle: strategies, the recorder and scripted drivers.

pub mod recorder;
pub mod script;
pub mod strategy;

pub use recorder::Recorder;
pub use script::{render_scripted_frame, run_scripted_session};
pub use strategy::SnapshotSource;
