use std::fmt;
use std::io::{Cursor, Read};

use nom_exif::{EntryValue, Exif, ExifIter, ExifTag, MediaParser, MediaSource};

use crate::bridge::BufferFile;

/// A handful of well-known EXIF fields, read for logging and
/// verification. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSummary {
    pub description: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub date_time: Option<String>,
    pub orientation: Option<String>,
}

impl TagSummary {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.make.is_none()
            && self.model.is_none()
            && self.date_time.is_none()
            && self.orientation.is_none()
    }
}

impl fmt::Display for TagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::new();
        if let Some(ref v) = self.description {
            fields.push(format!("description={v}"));
        }
        if let Some(ref v) = self.make {
            fields.push(format!("make={v}"));
        }
        if let Some(ref v) = self.model {
            fields.push(format!("model={v}"));
        }
        if let Some(ref v) = self.date_time {
            fields.push(format!("taken={v}"));
        }
        if let Some(ref v) = self.orientation {
            fields.push(format!("orientation={v}"));
        }
        if fields.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&fields.join(", "))
        }
    }
}

/// Read a field summary from the image behind `bridge`.
///
/// A container without parseable EXIF yields an empty summary; unlike the
/// tag copy, summarizing is best-effort and never fails the run.
pub fn read_summary(bridge: &mut BufferFile) -> TagSummary {
    let mut raw = Vec::new();
    if bridge.read_handle().read_to_end(&mut raw).is_err() {
        return TagSummary::default();
    }

    let mut parser = MediaParser::new();
    let source = match MediaSource::seekable(Cursor::new(raw)) {
        Ok(source) => source,
        Err(error) => {
            log::debug!("'{}' is not exif-capable media: {error}", bridge.name());
            return TagSummary::default();
        }
    };

    let iter: ExifIter = match parser.parse(source) {
        Ok(iter) => iter,
        Err(error) => {
            log::debug!("no EXIF data found in '{}': {error}", bridge.name());
            return TagSummary::default();
        }
    };
    let exif: Exif = iter.into();

    TagSummary {
        description: exif.get(ExifTag::ImageDescription).and_then(entry_to_string),
        make: exif.get(ExifTag::Make).and_then(entry_to_string),
        model: exif.get(ExifTag::Model).and_then(entry_to_string),
        date_time: exif.get(ExifTag::DateTimeOriginal).and_then(entry_to_string),
        orientation: exif.get(ExifTag::Orientation).and_then(entry_to_string),
    }
}

/// Convert an EntryValue to an Option<String>.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').to_string();
    if s.is_empty() { None } else { Some(s) }
}
