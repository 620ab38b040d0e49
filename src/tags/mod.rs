//! Metadata tag reading, copying, and summaries.
//!
//! Two layers:
//!
//! - [`copy_tags`] moves whole tag blocks (EXIF, XMP, IPTC, ICC) between
//!   image containers, overwriting same-type blocks on the destination.
//!   Containers are opened through [`BufferFile`](crate::bridge::BufferFile)
//!   bridges, never through the filesystem.
//! - [`read_summary`] extracts a handful of well-known EXIF fields for
//!   logging and verification.

mod copy;
mod summary;

pub use copy::{copy_tags, read_tags, TagEntry, TagKind};
pub use summary::{read_summary, TagSummary};
