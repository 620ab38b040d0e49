//! Decode and same-format, maximum-quality re-encode.
//!
//! The container format is whatever the input stream reports; no format
//! conversion happens anywhere in the tool. Re-encoding always uses the
//! encoder's maximum quality setting.

use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::Error;

/// Decode an image from `reader`, reporting the container format it was
/// stored in.
///
/// `path` is only used in error messages. A stream whose format cannot be
/// guessed, or whose contents fail to decode, yields
/// [`Error::NotAnImage`].
pub fn decode<R: Read + Seek>(path: &Path, reader: R) -> Result<(DynamicImage, ImageFormat), Error> {
    let reader = ImageReader::new(BufReader::new(reader)).with_guessed_format()?;

    let Some(format) = reader.format() else {
        return Err(Error::NotAnImage(path.to_path_buf()));
    };

    match reader.decode() {
        Ok(image) => Ok((image, format)),
        Err(error) => {
            log::debug!("decode of '{}' failed: {error}", path.display());
            Err(Error::NotAnImage(path.to_path_buf()))
        }
    }
}

/// Re-encode `image` into `format` at maximum quality.
pub fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, Error> {
    let mut cursor = Cursor::new(Vec::new());

    match format {
        ImageFormat::Jpeg => image
            .write_with_encoder(JpegEncoder::new_with_quality(&mut cursor, 100))
            .context("Failed to encode JPEG output")?,
        ImageFormat::Png => image
            .write_with_encoder(PngEncoder::new_with_quality(
                &mut cursor,
                CompressionType::Best,
                FilterType::Adaptive,
            ))
            .context("Failed to encode PNG output")?,
        // The webp encoder in `image` is lossless, which is as good as
        // maximum quality gets.
        ImageFormat::WebP => image
            .write_with_encoder(WebPEncoder::new_lossless(&mut cursor))
            .context("Failed to encode WebP output")?,
        other => image
            .write_to(&mut cursor, other)
            .with_context(|| format!("Failed to encode {other:?} output"))?,
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgb};

    fn sample() -> DynamicImage {
        let buf = ImageBuffer::from_fn(8, 6, |x, y| Rgb([x as u8 * 20, y as u8 * 30, 77]));
        DynamicImage::ImageRgb8(buf)
    }

    #[test]
    fn png_round_trip_reports_format() {
        let encoded = encode(&sample(), ImageFormat::Png).unwrap();
        let (decoded, format) = decode(Path::new("mem.png"), Cursor::new(encoded)).unwrap();

        assert_eq!(format, ImageFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn jpeg_round_trip_reports_format() {
        let encoded = encode(&sample(), ImageFormat::Jpeg).unwrap();
        let (decoded, format) = decode(Path::new("mem.jpg"), Cursor::new(encoded)).unwrap();

        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn webp_round_trip_is_lossless() {
        let image = sample();
        let encoded = encode(&image, ImageFormat::WebP).unwrap();
        let (decoded, format) = decode(Path::new("mem.webp"), Cursor::new(encoded)).unwrap();

        assert_eq!(format, ImageFormat::WebP);
        assert_eq!(decoded.to_rgb8().into_raw(), image.to_rgb8().into_raw());
    }

    #[test]
    fn other_formats_pass_through_the_generic_encoder() {
        let encoded = encode(&sample(), ImageFormat::Bmp).unwrap();
        let (_, format) = decode(Path::new("mem.bmp"), Cursor::new(encoded)).unwrap();
        assert_eq!(format, ImageFormat::Bmp);
    }

    #[test]
    fn garbage_bytes_are_not_an_image() {
        let result = decode(Path::new("mem.bin"), Cursor::new(b"definitely not pixels".to_vec()));
        assert!(matches!(result, Err(Error::NotAnImage(_))));
    }
}
