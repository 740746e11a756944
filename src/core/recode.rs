// Useful Tools - core/recode.rs
//
// Image re-encoding pipeline: source bytes → RGBA surface → target encoding.
//
// Every stage returns a `RecodeError` on failure so callers can short-circuit
// with `?` and map the error to a user-facing message in one place.
// JPEG has no alpha channel, so surfaces are flattened onto black before
// encoding, the same result a 2D canvas produces. WEBP is encoded lossy
// through libwebp at the shared quality factor.

use crate::core::model::{EncodedImage, TargetFormat};
use crate::util::constants::{ENCODE_QUALITY, MAX_SURFACE_PIXELS};
use crate::util::error::RecodeError;
use image::codecs::jpeg::JpegEncoder;
use image::error::{EncodingError, ImageFormatHint};
use image::{ImageError, ImageFormat, ImageReader, Limits, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;

/// Decode `bytes` (any supported format, sniffed from the content) into an
/// RGBA surface at the image's natural dimensions.
pub fn decode_surface(bytes: &[u8]) -> Result<RgbaImage, RecodeError> {
    decode_surface_within(bytes, MAX_SURFACE_PIXELS)
}

/// `decode_surface` with an explicit pixel budget.
///
/// The dimensions are read from the header first, so an oversized image is
/// rejected before any pixel buffer is allocated. The decoder itself also
/// runs under matching allocation limits.
pub fn decode_surface_within(bytes: &[u8], max_pixels: u64) -> Result<RgbaImage, RecodeError> {
    let (width, height) = reader(bytes)?
        .into_dimensions()
        .map_err(|source| RecodeError::Decode { source })?;
    let pixels = u64::from(width) * u64::from(height);
    if pixels == 0 || pixels > max_pixels {
        return Err(RecodeError::Surface { width, height });
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(width);
    limits.max_image_height = Some(height);
    // Room for a 16-bit RGBA decode plus the 8-bit copy.
    limits.max_alloc = Some(pixels.saturating_mul(16));

    let mut decoder = reader(bytes)?;
    decoder.limits(limits);
    let decoded = decoder
        .decode()
        .map_err(|source| RecodeError::Decode { source })?;
    Ok(decoded.into_rgba8())
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, RecodeError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RecodeError::Decode {
            source: ImageError::IoError(e),
        })
}

/// Encode the full surface into `format`.
pub fn encode_surface(surface: &RgbaImage, format: TargetFormat) -> Result<Vec<u8>, RecodeError> {
    let mut buf = Cursor::new(Vec::new());
    let written = match format {
        TargetFormat::Jpeg => {
            let quality = format.quality().unwrap_or(ENCODE_QUALITY);
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            flatten_onto_black(surface).write_with_encoder(encoder)
        }
        TargetFormat::Webp => {
            let quality = format.quality().unwrap_or(ENCODE_QUALITY);
            return encode_webp_lossy(surface, quality);
        }
        TargetFormat::Png | TargetFormat::Gif | TargetFormat::Bmp => {
            surface.write_to(&mut buf, image_format(format))
        }
    };
    written.map_err(|source| RecodeError::Encode {
        format: format.label(),
        source,
    })?;
    Ok(buf.into_inner())
}

fn encode_webp_lossy(surface: &RgbaImage, quality: u8) -> Result<Vec<u8>, RecodeError> {
    let encoder = webp::Encoder::from_rgba(surface.as_raw(), surface.width(), surface.height());
    let memory = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| RecodeError::Encode {
            format: TargetFormat::Webp.label(),
            source: ImageError::Encoding(EncodingError::new(
                ImageFormatHint::Exact(ImageFormat::WebP),
                format!("libwebp: {e:?}"),
            )),
        })?;
    Ok(memory.to_vec())
}

/// Full pipeline: decode, allocate surface, encode.
pub fn recode(bytes: &[u8], format: TargetFormat) -> Result<EncodedImage, RecodeError> {
    let surface = decode_surface(bytes)?;
    let encoded = encode_surface(&surface, format)?;
    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        format = format.label(),
        input_bytes = bytes.len(),
        output_bytes = encoded.len(),
        "Image re-encoded"
    );
    Ok(EncodedImage {
        format,
        width: surface.width(),
        height: surface.height(),
        bytes: encoded,
    })
}

/// Decode encoded output for on-screen display, scaled down so neither edge
/// exceeds `max_edge`. Returns `None` if the bytes cannot be decoded.
pub fn decode_preview(bytes: &[u8], max_edge: u32) -> Option<RgbaImage> {
    let decoded = image::load_from_memory(bytes).ok()?;
    let decoded = if decoded.width() > max_edge || decoded.height() > max_edge {
        decoded.thumbnail(max_edge, max_edge)
    } else {
        decoded
    };
    Some(decoded.into_rgba8())
}

fn image_format(format: TargetFormat) -> ImageFormat {
    match format {
        TargetFormat::Jpeg => ImageFormat::Jpeg,
        TargetFormat::Png => ImageFormat::Png,
        TargetFormat::Webp => ImageFormat::WebP,
        TargetFormat::Gif => ImageFormat::Gif,
        TargetFormat::Bmp => ImageFormat::Bmp,
    }
}

/// Composite an RGBA surface over opaque black.
fn flatten_onto_black(surface: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(surface.width(), surface.height(), |x, y| {
        let [r, g, b, a] = surface.get_pixel(x, y).0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(6, 4, |x, y| {
            Rgba([(x * 40) as u8, (y * 60) as u8, 128, if x == 0 { 0 } else { 255 }])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_recode_to_every_format() {
        let png = sample_png();
        for &format in TargetFormat::all() {
            let encoded = recode(&png, format).unwrap_or_else(|e| panic!("{format}: {e}"));
            assert_eq!((encoded.width, encoded.height), (6, 4), "{format}");
            assert!(!encoded.bytes.is_empty(), "{format}");
            let guessed = image::guess_format(&encoded.bytes).unwrap();
            assert_eq!(guessed, image_format(format), "{format}");
        }
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let err = recode(b"definitely not an image", TargetFormat::Png).unwrap_err();
        assert!(matches!(err, RecodeError::Decode { .. }));
        assert_eq!(err.user_message(), "Failed to load image");
    }

    #[test]
    fn test_flatten_composites_over_black() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 255]));
        let flat = flatten_onto_black(&img);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([200, 100, 50]));
    }

    #[test]
    fn test_webp_output_is_lossy() {
        let img = RgbaImage::from_fn(64, 64, |x, y| {
            Rgba([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8, 255])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();

        let encoded = recode(&buf.into_inner(), TargetFormat::Webp).unwrap();
        let bytes = &encoded.bytes;
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
        // Lossy bitstreams use the "VP8 " chunk; lossless ones use "VP8L".
        assert!(bytes.windows(4).any(|w| w == b"VP8 "));
        assert!(!bytes.windows(4).any(|w| w == b"VP8L"));

        let decoded = image::load_from_memory(bytes).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (64, 64));
        assert_ne!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_oversized_surface_is_rejected_before_decoding() {
        let err = decode_surface_within(&sample_png(), 23).unwrap_err();
        assert!(matches!(err, RecodeError::Surface { width: 6, height: 4 }));
        assert_eq!(
            err.user_message(),
            "Conversion failed: could not allocate a 6x4 pixel surface"
        );

        let surface = decode_surface_within(&sample_png(), 24).unwrap();
        assert_eq!(surface.dimensions(), (6, 4));
    }

    #[test]
    fn test_preview_is_scaled_down() {
        let png = sample_png();
        let preview = decode_preview(&png, 3).unwrap();
        assert!(preview.width() <= 3 && preview.height() <= 3);
        assert!(decode_preview(b"nope", 3).is_none());
    }
}
