//! Shared fixtures for module tests.

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;

use crate::codec;

// little_exif as_u8_vec(JPEG) returns the EXIF block wrapped in an APP1
// segment: marker (2) + length (2) + "Exif\0\0" (6). img-parts wants the
// bare TIFF data that follows.
const JPEG_EXIF_OVERHEAD: usize = 10;

/// A minimal XMP packet body used in segment-copy tests.
pub const XMP_PACKET: &[u8] =
    b"<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"><rdf:RDF/></x:xmpmeta>";

/// An 8x8 RGB test image.
pub fn sample_image() -> DynamicImage {
    let buf = ImageBuffer::from_fn(8, 8, |x, y| Rgb([x as u8 * 16, y as u8 * 16, 9]));
    DynamicImage::ImageRgb8(buf)
}

/// The sample image encoded as a JPEG with no metadata.
pub fn plain_jpeg() -> Vec<u8> {
    codec::encode(&sample_image(), ImageFormat::Jpeg).unwrap()
}

/// The sample image encoded as a PNG with no metadata.
pub fn plain_png() -> Vec<u8> {
    codec::encode(&sample_image(), ImageFormat::Png).unwrap()
}

/// An EXIF block (bare TIFF data) with a description, make, and model.
pub fn exif_tiff(description: &str, make: &str) -> Vec<u8> {
    let mut metadata = Metadata::new();
    metadata.set_tag(ExifTag::ImageDescription(description.to_string()));
    metadata.set_tag(ExifTag::Make(make.to_string()));
    metadata.set_tag(ExifTag::Model("T-1000".to_string()));
    let bytes = metadata.as_u8_vec(FileExtension::JPEG);
    bytes[JPEG_EXIF_OVERHEAD..].to_vec()
}

/// The sample image as a JPEG carrying an EXIF block.
pub fn tagged_jpeg(description: &str, make: &str) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(plain_jpeg())).unwrap();
    jpeg.set_exif(Some(Bytes::from(exif_tiff(description, make))));
    jpeg.encoder().bytes().to_vec()
}
