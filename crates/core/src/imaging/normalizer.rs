//! Decode, bound and re-encode uploaded photos.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Longest side of a normalized photo, in pixels.
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality factor of normalized photos.
pub const JPEG_QUALITY: u8 = 90;

/// Content type of normalized photos.
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";

/// File extension of normalized photos.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Normalization errors.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Input could not be decoded.
    #[error("unsupported or corrupt image")]
    Decode(#[source] image::ImageError),

    /// Output could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// A photo in canonical form.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// JPEG bytes.
    pub bytes: Bytes,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl NormalizedImage {
    /// Content type of [`Self::bytes`].
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        OUTPUT_CONTENT_TYPE
    }
}

/// Normalize raw upload bytes.
///
/// Decodes any format the `image` crate understands, drops alpha and palette
/// information, shrinks so neither side exceeds [`MAX_DIMENSION`] (never
/// enlarges) and encodes as JPEG at [`JPEG_QUALITY`].
///
/// CPU bound; call from a blocking context.
///
/// # Errors
///
/// Returns [`NormalizeError::Decode`] for undecodable input.
pub fn normalize(raw: &[u8]) -> Result<NormalizedImage, NormalizeError> {
    let decoded = image::load_from_memory(raw).map_err(NormalizeError::Decode)?;
    let bounded = fit_within(decoded, MAX_DIMENSION);
    let rgb = bounded.into_rgb8();

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(NormalizeError::Encode)?;

    Ok(NormalizedImage {
        bytes: Bytes::from(buf.into_inner()),
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Shrink to fit a `max` x `max` box, keeping the aspect ratio.
fn fit_within(img: DynamicImage, max: u32) -> DynamicImage {
    if img.width() <= max && img.height() <= max {
        return img;
    }
    img.resize(max, max, FilterType::Lanczos3)
}

/// Guess the encoding of raw bytes, for logs.
#[must_use]
pub fn sniff_format(raw: &[u8]) -> Option<&'static str> {
    image::guess_format(raw).ok().map(|format| match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        _ => "other",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use proptest::prelude::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .expect("encode png");
        buf.into_inner()
    }

    #[test]
    fn test_large_png_is_bounded_jpeg() {
        let out = normalize(&png(2000, 3000)).expect("normalize");
        assert_eq!(out.height, 1024);
        assert_eq!(out.width, 683);
        assert_eq!(sniff_format(&out.bytes), Some("jpeg"));
        assert_eq!(out.content_type(), "image/jpeg");

        let reread = image::load_from_memory(&out.bytes).expect("decodes");
        assert_eq!((reread.width(), reread.height()), (out.width, out.height));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let out = normalize(&png(40, 30)).expect("normalize");
        assert_eq!((out.width, out.height), (40, 30));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let out = normalize(&png(8, 8)).expect("normalize");
        let reread = image::load_from_memory(&out.bytes).expect("decodes");
        assert_eq!(reread.color().channel_count(), 3);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = normalize(b"definitely not an image").unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
        assert_eq!(err.to_string(), "unsupported or corrupt image");
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let bytes = png(64, 64);
        let err = normalize(&bytes[..bytes.len() / 3]).unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }

    #[test]
    fn test_output_is_deterministic() {
        let input = png(300, 200);
        let a = normalize(&input).expect("normalize");
        let b = normalize(&input).expect("normalize");
        assert_eq!(a.bytes, b.bytes);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        // Output never exceeds the bound and never grows past the input.
        #[test]
        fn prop_output_bounded_and_never_upscaled(
            width in 1u32..1600,
            height in 1u32..1600,
        ) {
            let out = normalize(&png(width, height)).expect("normalize");
            prop_assert!(out.width <= MAX_DIMENSION);
            prop_assert!(out.height <= MAX_DIMENSION);
            prop_assert!(out.width <= width);
            prop_assert!(out.height <= height);
            if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
                prop_assert_eq!((out.width, out.height), (width, height));
            }
        }
    }
}
