use std::io::{Read, Write};
use std::path::Path;

use anyhow::anyhow;
use img_parts::jpeg::{Jpeg, JpegSegment};
use img_parts::{Bytes, DynImage, ImageEXIF, ImageICC};

use crate::bridge::BufferFile;
use crate::error::Error;

// JPEG APP1 segments carrying EXIF start with this prefix.
const EXIF_PREFIX: &[u8] = b"Exif\0\0";
// JPEG APP1 segments carrying XMP start with this namespace header.
const XMP_HEADER: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
// JPEG APP13 segments carrying IPTC start with this header.
const IPTC_HEADER: &[u8] = b"Photoshop 3.0\0";

const APP1: u8 = 0xE1;
const APP13: u8 = 0xED;

/// A metadata tag type the copy understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// The EXIF block (a raw TIFF structure), present in all supported
    /// containers.
    Exif,
    /// The XMP packet. Carried as a JPEG APP1 segment.
    Xmp,
    /// The IPTC-IIM record. Carried as a JPEG APP13 segment.
    Iptc,
    /// The ICC color profile.
    IccProfile,
}

/// One tag block read from a source container.
#[derive(Debug, Clone)]
pub struct TagEntry {
    pub kind: TagKind,
    pub data: Bytes,
}

/// Container formats the tag layer can open, inferred from the logical
/// file name of a bridge.
fn recognized_container(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    matches!(ext.as_deref(), Some("jpg" | "jpeg" | "png" | "webp"))
}

/// Open the container behind a bridge, or fail with the named metadata
/// error. The bridge's logical name decides whether the format is
/// supported at all; the bytes themselves decide the rest.
fn open_container(bridge: &mut BufferFile) -> Result<DynImage, Error> {
    let name = bridge.name().to_string();
    if !recognized_container(&name) {
        return Err(Error::UnsupportedMetadata(name));
    }

    let mut raw = Vec::new();
    bridge.read_handle().read_to_end(&mut raw)?;

    DynImage::from_bytes(Bytes::from(raw))
        .ok()
        .flatten()
        .ok_or(Error::UnsupportedMetadata(name))
}

/// Read the tag set of a source container, in container order.
pub fn read_tags(source: &mut BufferFile) -> Result<Vec<TagEntry>, Error> {
    let container = open_container(source)?;

    let mut entries = Vec::new();
    if let Some(exif) = container.exif() {
        entries.push(TagEntry { kind: TagKind::Exif, data: exif });
    }
    if let DynImage::Jpeg(jpeg) = &container {
        if let Some(xmp) = segment_contents(jpeg, APP1, XMP_HEADER) {
            entries.push(TagEntry { kind: TagKind::Xmp, data: xmp });
        }
        if let Some(iptc) = segment_contents(jpeg, APP13, IPTC_HEADER) {
            entries.push(TagEntry { kind: TagKind::Iptc, data: iptc });
        }
    }
    if let Some(icc) = container.icc_profile() {
        entries.push(TagEntry { kind: TagKind::IccProfile, data: icc });
    }

    Ok(entries)
}

/// Copy every tag entry from `source` onto `dest`, overwriting same-type
/// entries already present, and persist the result through the
/// destination bridge's write handle. Returns the number of entries
/// copied.
///
/// A source whose container cannot be parsed is a hard error; the run
/// must fail rather than silently drop the requested tag copy.
pub fn copy_tags(source: &mut BufferFile, dest: &mut BufferFile) -> Result<usize, Error> {
    let entries = read_tags(source)?;
    if entries.is_empty() {
        log::debug!("'{}' carries no metadata tags", source.name());
        return Ok(0);
    }

    let mut container = open_container(dest)?;
    for entry in &entries {
        apply_entry(&mut container, entry);
    }
    let encoded = container.encoder().bytes();

    // A request right after a simulated close is refused once; the next
    // request reopens the handle.
    if dest.write_handle().is_none() {
        log::debug!("destination buffer was closed, reopening");
    }
    let Some(handle) = dest.write_handle() else {
        return Err(anyhow!("destination buffer refused a write handle").into());
    };
    handle.get_mut().clear();
    handle.set_position(0);
    handle.write_all(&encoded)?;
    dest.close();

    Ok(entries.len())
}

/// Set one tag entry on the destination container, replacing any block of
/// the same type.
fn apply_entry(container: &mut DynImage, entry: &TagEntry) {
    match entry.kind {
        TagKind::Exif => container.set_exif(Some(entry.data.clone())),
        TagKind::IccProfile => container.set_icc_profile(Some(entry.data.clone())),
        TagKind::Xmp => {
            if let DynImage::Jpeg(jpeg) = container {
                replace_segment(jpeg, APP1, XMP_HEADER, &entry.data);
            } else {
                log::debug!("destination container cannot carry an XMP segment, skipping");
            }
        }
        TagKind::Iptc => {
            if let DynImage::Jpeg(jpeg) = container {
                replace_segment(jpeg, APP13, IPTC_HEADER, &entry.data);
            } else {
                log::debug!("destination container cannot carry an IPTC segment, skipping");
            }
        }
    }
}

/// The contents of the first segment with the given marker and prefix.
fn segment_contents(jpeg: &Jpeg, marker: u8, prefix: &[u8]) -> Option<Bytes> {
    jpeg.segments()
        .iter()
        .find(|s| s.marker() == marker && s.contents().starts_with(prefix))
        .map(|s| s.contents().clone())
}

/// Replace the first segment with the given marker and prefix, or insert
/// a new one right after the EXIF segment.
fn replace_segment(jpeg: &mut Jpeg, marker: u8, prefix: &[u8], data: &Bytes) {
    let new_segment = JpegSegment::new_with_contents(marker, data.clone());
    let existing = jpeg
        .segments()
        .iter()
        .position(|s| s.marker() == marker && s.contents().starts_with(prefix));

    let segments = jpeg.segments_mut();
    match existing {
        Some(pos) => segments[pos] = new_segment,
        None => {
            let insert_pos = segments
                .iter()
                .position(|s| s.marker() == APP1 && s.contents().starts_with(EXIF_PREFIX))
                .map(|p| p + 1)
                .unwrap_or(1)
                .min(segments.len());
            segments.insert(insert_pos, new_segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::read_summary;
    use crate::test_utils::{plain_jpeg, tagged_jpeg, XMP_PACKET};

    #[test]
    fn read_tags_finds_the_exif_block() {
        let mut source = BufferFile::from_vec("in.jpg", tagged_jpeg("hello", "ACME"));
        let entries = read_tags(&mut source).unwrap();
        assert!(entries.iter().any(|e| e.kind == TagKind::Exif));
    }

    #[test]
    fn read_tags_on_a_plain_image_is_empty() {
        let mut source = BufferFile::from_vec("in.jpg", plain_jpeg());
        assert!(read_tags(&mut source).unwrap().is_empty());
    }

    #[test]
    fn unknown_extension_is_an_unsupported_container() {
        let mut source = BufferFile::from_vec("in.bmp", plain_jpeg());
        assert!(matches!(
            read_tags(&mut source),
            Err(Error::UnsupportedMetadata(name)) if name == "in.bmp"
        ));
    }

    #[test]
    fn garbage_bytes_are_an_unsupported_container() {
        let mut source = BufferFile::from_vec("in.jpg", b"not a jpeg at all".to_vec());
        assert!(matches!(read_tags(&mut source), Err(Error::UnsupportedMetadata(_))));
    }

    #[test]
    fn copy_carries_exif_fields_to_the_destination() {
        let mut source = BufferFile::from_vec("in.jpg", tagged_jpeg("sunset", "ACME"));
        let mut dest = BufferFile::from_vec("out.jpg", plain_jpeg());

        let copied = copy_tags(&mut source, &mut dest).unwrap();
        assert!(copied >= 1);

        let mut copied_file = BufferFile::from_vec("out.jpg", dest.into_bytes());
        let summary = read_summary(&mut copied_file);
        assert_eq!(summary.description.as_deref(), Some("sunset"));
        assert_eq!(summary.make.as_deref(), Some("ACME"));
    }

    #[test]
    fn copy_overwrites_existing_destination_entries() {
        let mut source = BufferFile::from_vec("in.jpg", tagged_jpeg("new title", "NewCorp"));
        let mut dest = BufferFile::from_vec("out.jpg", tagged_jpeg("old title", "OldCorp"));

        copy_tags(&mut source, &mut dest).unwrap();

        let bytes = dest.into_bytes();
        let jpeg = Jpeg::from_bytes(Bytes::from(bytes.clone())).unwrap();
        let exif_segments = jpeg
            .segments()
            .iter()
            .filter(|s| s.marker() == APP1 && s.contents().starts_with(EXIF_PREFIX))
            .count();
        assert_eq!(exif_segments, 1);

        let summary = read_summary(&mut BufferFile::from_vec("out.jpg", bytes));
        assert_eq!(summary.description.as_deref(), Some("new title"));
        assert_eq!(summary.make.as_deref(), Some("NewCorp"));
    }

    #[test]
    fn copy_from_an_untagged_source_copies_nothing() {
        let plain = plain_jpeg();
        let mut source = BufferFile::from_vec("in.jpg", plain.clone());
        let mut dest = BufferFile::from_vec("out.jpg", plain.clone());

        assert_eq!(copy_tags(&mut source, &mut dest).unwrap(), 0);
        assert_eq!(dest.into_bytes(), plain);
    }

    #[test]
    fn xmp_segment_travels_with_the_copy() {
        let mut jpeg = Jpeg::from_bytes(Bytes::from(tagged_jpeg("t", "m"))).unwrap();
        let mut contents = XMP_HEADER.to_vec();
        contents.extend_from_slice(XMP_PACKET);
        jpeg.segments_mut()
            .insert(1, JpegSegment::new_with_contents(APP1, Bytes::from(contents)));
        let source_bytes = jpeg.encoder().bytes().to_vec();

        let mut source = BufferFile::from_vec("in.jpg", source_bytes);
        let entries = read_tags(&mut source).unwrap();
        assert!(entries.iter().any(|e| e.kind == TagKind::Xmp));

        let mut dest = BufferFile::from_vec("out.jpg", plain_jpeg());
        copy_tags(&mut source, &mut dest).unwrap();

        let out = Jpeg::from_bytes(Bytes::from(dest.into_bytes())).unwrap();
        let xmp = segment_contents(&out, APP1, XMP_HEADER).expect("xmp segment copied");
        assert!(xmp.ends_with(XMP_PACKET));
    }

    #[test]
    fn destination_write_handle_is_exercised() {
        let mut source = BufferFile::from_vec("in.jpg", tagged_jpeg("t", "m"));
        let mut dest = BufferFile::from_vec("out.jpg", plain_jpeg());
        // Simulate a destination whose handle was closed by an earlier
        // consumer; the copy must reopen and still succeed.
        dest.close();

        assert!(copy_tags(&mut source, &mut dest).unwrap() >= 1);
    }
}
