//! The single-run orchestration.
//!
//! One invocation processes one input file with one action: decode, paint
//! onto the transformed canvas, re-encode in the original container
//! format, optionally copy the metadata tags over, and stream the final
//! bytes to the output path. Every resource is scoped to the run.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{GenericImageView, ImageFormat};
use tokio::io::AsyncWriteExt;

use crate::action::ActionKind;
use crate::bridge::BufferFile;
use crate::codec;
use crate::error::Error;
use crate::tags;
use crate::transform;

/// What to do, to which file, and where to put the result.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The input image.
    pub input: PathBuf,
    /// Where the result of the action is written.
    pub output: PathBuf,
    /// The geometric action to apply.
    pub action: ActionKind,
    /// Copy the metadata tags of the input onto the output.
    pub keep_tags: bool,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    /// The container format detected on the input and used for the output.
    pub format: ImageFormat,
    pub output_width: u32,
    pub output_height: u32,
    /// Number of tag entries copied. `None` when tag copy was not
    /// requested.
    pub tags_copied: Option<usize>,
}

/// Execute one run.
///
/// Errors map to the process exit codes via
/// [`Error::exit_code`](crate::error::Error::exit_code); on any error the
/// output file has not been written. Dropping the returned future during
/// the final copy (cooperative cancellation) may leave the output file
/// partially written.
pub async fn run(options: &RunOptions) -> Result<RunReport, Error> {
    if !options.input.exists() {
        return Err(Error::InputNotFound(options.input.clone()));
    }

    let mut input = File::open(&options.input)?;
    let (image, format) = codec::decode(&options.input, &mut input)?;
    log::debug!(
        "decoded '{}': {}x{} {format:?}",
        options.input.display(),
        image.width(),
        image.height()
    );

    let canvas = transform::apply(options.action, &image);
    let (output_width, output_height) = canvas.dimensions();
    let encoded = codec::encode(&canvas, format)?;

    let (final_bytes, tags_copied) = if options.keep_tags {
        input.seek(SeekFrom::Start(0))?;
        let mut source = BufferFile::from_reader(logical_name(&options.input), &mut input)?;

        let summary = tags::read_summary(&mut source);
        if !summary.is_empty() {
            log::debug!("source metadata: {summary}");
        }

        let mut dest = BufferFile::from_vec(logical_name(&options.output), encoded);
        let copied = tags::copy_tags(&mut source, &mut dest)?;
        log::debug!("copied {copied} tag blocks");
        (dest.into_bytes(), Some(copied))
    } else {
        (encoded, None)
    };

    write_output(&options.output, &final_bytes).await?;

    Ok(RunReport {
        format,
        output_width,
        output_height,
        tags_copied,
    })
}

/// The logical file name handed to the metadata bridge for format
/// sniffing.
fn logical_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Stream the final bytes to disk and flush.
async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    let mut reader = bytes;
    tokio::io::copy(&mut reader, &mut file)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    file.flush().await.context("Failed to flush output")?;
    Ok(())
}
