//! Frame encoding and export packaging.

pub mod packager;
pub mod png;

pub use packager::{ExportArtifact, frame_entry_name, package_frames};
pub use png::{EncodedFrame, encode_png};
