//! PNG encoding of raw RGBA frames.

use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{RoutelapseError, RoutelapseResult};
use crate::render::surface::FrameRgba;

/// One finished frame, as PNG bytes.
pub type EncodedFrame = Vec<u8>;

/// Encode `frame` as a PNG. Fast compression: frames are encoded once per
/// capture tick, so encoder speed beats archive size here.
pub fn encode_png(frame: &FrameRgba) -> RoutelapseResult<EncodedFrame> {
    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Fast, FilterType::Adaptive);
    encoder
        .write_image(&frame.data, frame.width, frame.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| RoutelapseError::encode(format!("png encoding failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use crate::foundation::core::Rgba8;

    use super::*;

    #[test]
    fn encoded_frames_decode_back() {
        let frame = FrameRgba::filled(20, 10, Rgba8::opaque(0x12, 0x34, 0x56));
        let png = encode_png(&frame).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (20, 10));
        assert_eq!(decoded.get_pixel(3, 7), image::Rgba([0x12, 0x34, 0x56, 0xff]));
    }

    #[test]
    fn alpha_survives_the_encoder() {
        let frame = FrameRgba::filled(4, 4, Rgba8::new(10, 20, 30, 128));
        let png = encode_png(&frame).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.get_pixel(0, 0), image::Rgba([10, 20, 30, 128]));
    }
}
