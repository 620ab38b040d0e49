//! Error taxonomy and process exit codes.

use std::path::PathBuf;

/// Everything that can end a run early.
///
/// The first three variants carry a specific, user-facing message; the
/// rest surface through the generic failure path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path does not exist.
    #[error("file '{0}' was not found")]
    InputNotFound(PathBuf),

    /// The input exists but no codec recognizes it as an image.
    #[error("could not read '{0}' because it is not a valid image")]
    NotAnImage(PathBuf),

    /// The source metadata container could not be parsed by the tag layer.
    #[error("unsupported or unreadable metadata container in '{0}'")]
    UnsupportedMetadata(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// The process exit code reported for this error.
    ///
    /// `-1` missing input, `-2` undecodable input, `-500` everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputNotFound(_) => -1,
            Error::NotAnImage(_) => -2,
            _ => -500,
        }
    }

    /// Whether this is a user input problem rather than an internal fault.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::InputNotFound(_) | Error::NotAnImage(_))
    }
}
