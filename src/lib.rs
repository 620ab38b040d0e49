//! # imgorient
//!
//! Change the orientation of a raster image — rotate 90° clockwise or
//! counter-clockwise, mirror it left-to-right, or flip it top-to-bottom —
//! re-encoding the result in the original container format and optionally
//! carrying the metadata tags of the source file over to the output.
//!
//! ## Quick Start
//!
//! The pipeline module runs the whole decode → transform → encode →
//! tag-copy → write flow:
//!
//! ```rust,no_run
//! use imgorient::action::ActionKind;
//! use imgorient::pipeline::{run, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), imgorient::error::Error> {
//!     let report = run(&RunOptions {
//!         input: "photo.jpg".into(),
//!         output: "rotated.jpg".into(),
//!         action: ActionKind::Clockwise,
//!         keep_tags: true,
//!     })
//!     .await?;
//!
//!     println!(
//!         "wrote a {}x{} {:?} image",
//!         report.output_width, report.output_height, report.format
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The pieces compose individually — select a transform, paint, copy tags:
//!
//! ```rust,no_run
//! use imgorient::action::ActionKind;
//! use imgorient::bridge::BufferFile;
//! use imgorient::{codec, tags, transform};
//! use std::fs::File;
//! use std::io::{Seek, SeekFrom};
//! use std::path::Path;
//!
//! fn main() -> Result<(), imgorient::error::Error> {
//!     let path = Path::new("photo.jpg");
//!     let mut input = File::open(path)?;
//!
//!     // 1. Decode and transform
//!     let (image, format) = codec::decode(path, &mut input)?;
//!     let canvas = transform::apply(ActionKind::Mirror, &image);
//!
//!     // 2. Re-encode in the source container format
//!     let encoded = codec::encode(&canvas, format)?;
//!
//!     // 3. Copy the source tags onto the encoded bytes
//!     input.seek(SeekFrom::Start(0))?;
//!     let mut source = BufferFile::from_reader("photo.jpg", &mut input)?;
//!     let mut dest = BufferFile::from_vec("rotated.jpg", encoded);
//!     let copied = tags::copy_tags(&mut source, &mut dest)?;
//!     println!("copied {copied} tag blocks");
//!
//!     std::fs::write("rotated.jpg", dest.into_bytes())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`action`] — the closed set of geometric actions
//! - [`transform`] — canvas sizing and per-pixel mapping for each action
//! - [`codec`] — decode and same-format, maximum-quality re-encode
//! - [`bridge`] — in-memory stand-in for a named metadata file
//! - [`tags`] — metadata tag reading, copying, and summaries
//! - [`pipeline`] — the single-run orchestration
//! - [`error`] — error taxonomy and process exit codes

pub mod action;
pub mod bridge;
pub mod codec;
pub mod error;
pub mod pipeline;
pub mod tags;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_utils;
