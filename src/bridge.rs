//! In-memory stand-in for a named metadata file.
//!
//! Tag-handling code wants to open a named file, read it, write it back,
//! and close it. [`BufferFile`] satisfies that expectation against a byte
//! buffer instead: the bytes of a stream are captured once at
//! construction, the logical name carries the container format, and a
//! simulated close/reopen cycle replaces real OS handles. Nothing here
//! ever touches the filesystem.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// Whether the simulated file handle is currently usable for writing.
///
/// `close` parks the state in `ClosedPendingReopen`; the next write-handle
/// request is refused once and transitions back to `Open`, so the request
/// after that succeeds again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Open,
    ClosedPendingReopen,
}

/// A byte buffer presented as a named, openable and closable file.
pub struct BufferFile {
    name: String,
    buffer: Cursor<Vec<u8>>,
    state: HandleState,
}

impl BufferFile {
    /// Capture the remaining readable bytes of `reader` into a new buffer.
    ///
    /// The read is non-destructive: the reader's position is recorded
    /// first and restored afterwards. The internal buffer starts rewound.
    pub fn from_reader<R: Read + Seek>(name: impl Into<String>, reader: &mut R) -> io::Result<Self> {
        let position = reader.stream_position()?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        reader.seek(SeekFrom::Start(position))?;
        Ok(Self::from_vec(name, bytes))
    }

    /// Wrap already-materialized bytes, e.g. a freshly encoded image.
    pub fn from_vec(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        BufferFile {
            name: name.into(),
            buffer: Cursor::new(bytes),
            state: HandleState::Open,
        }
    }

    /// The logical file name. Tag-handling code uses it to infer the
    /// container format; it does not need to exist on disk.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The buffer, positioned for reading from the start.
    pub fn read_handle(&mut self) -> &mut Cursor<Vec<u8>> {
        self.buffer.set_position(0);
        &mut self.buffer
    }

    /// The buffer for writing, at its current position.
    ///
    /// Returns `None` exactly once after a [`close`](Self::close); that
    /// request reopens the handle, so asking again succeeds.
    pub fn write_handle(&mut self) -> Option<&mut Cursor<Vec<u8>>> {
        match self.state {
            HandleState::Open => Some(&mut self.buffer),
            HandleState::ClosedPendingReopen => {
                self.state = HandleState::Open;
                None
            }
        }
    }

    /// Simulate closing the file: rewind the buffer and park the write
    /// side until the next request.
    pub fn close(&mut self) {
        self.buffer.set_position(0);
        self.state = HandleState::ClosedPendingReopen;
    }

    /// The current buffer contents.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.get_ref()
    }

    /// Consume the bridge and take the final buffer contents.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_inner()
    }
}
