//! ZIP packaging of a captured frame sequence.
//!
//! The archive layout is one `frames/frame_XXXX.png` entry per frame,
//! numbered from 1 in capture order, so
//! `ffmpeg -framerate 30 -i frames/frame_%04d.png` consumes an unpacked
//! export directly.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::export::png::EncodedFrame;
use crate::foundation::core::FrameRate;
use crate::foundation::error::{RoutelapseError, RoutelapseResult};

/// A packaged export: the ZIP bytes plus the metadata a client needs to
/// turn the frames into video.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Complete ZIP archive, ready to write to disk or hand to a download.
    pub archive: Vec<u8>,
    pub frame_count: u64,
    /// Playback rate the frames were captured at, in frames per second.
    pub frame_rate: u32,
    /// Wall-clock capture time. Zero when packaged outside a session.
    pub elapsed_secs: f64,
}

/// Archive entry name for frame `index` (1-based) of `total`. Indices are
/// zero-padded to at least four digits so entries sort in frame order.
pub fn frame_entry_name(index: u64, total: u64) -> String {
    let width = decimal_width(total).max(4) as usize;
    format!("frames/frame_{index:0width$}.png")
}

fn decimal_width(n: u64) -> u32 {
    n.max(1).ilog10() + 1
}

/// Package encoded frames into a ZIP archive. Compression is the fastest
/// deflate level: PNG data is already compressed, so deflate mostly just
/// frames the entries.
pub fn package_frames(
    frames: &[EncodedFrame],
    frame_rate: FrameRate,
) -> RoutelapseResult<ExportArtifact> {
    if frames.is_empty() {
        return Err(RoutelapseError::validation("cannot package an export with no frames"));
    }
    let total = frames.len() as u64;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(1));
    for (i, frame) in frames.iter().enumerate() {
        let name = frame_entry_name(i as u64 + 1, total);
        writer
            .start_file(&name, options)
            .map_err(|e| RoutelapseError::encode(format!("zip entry '{name}' failed: {e}")))?;
        writer
            .write_all(frame)
            .map_err(|e| RoutelapseError::encode(format!("zip write '{name}' failed: {e}")))?;
    }
    let archive = writer
        .finish()
        .map_err(|e| RoutelapseError::encode(format!("zip finish failed: {e}")))?
        .into_inner();
    Ok(ExportArtifact {
        archive,
        frame_count: total,
        frame_rate: frame_rate.as_u32(),
        elapsed_secs: 0.0,
    })
}
