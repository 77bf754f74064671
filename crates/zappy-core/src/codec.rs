//! Newline framing for the wire protocol.
//!
//! Bytes are appended to a growable [`BytesMut`] and complete lines are cut
//! off the front. A trailing `\r` is dropped. A partial line longer than
//! the configured limit is an error; the caller tears the session down.

use bytes::BytesMut;
use memchr::memchr;

/// Errors produced while framing lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// No newline within the limit.
    #[error("line exceeds {max} bytes")]
    LineTooLong {
        /// Configured limit.
        max: usize,
    },
}

const INITIAL_CAPACITY: usize = 1024;

/// Per-session input buffer.
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,
    max_line_len: usize,
}

impl LineBuffer {
    /// A buffer refusing lines longer than `max_line_len` bytes.
    pub fn new(max_line_len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            max_line_len: max_line_len.max(1),
        }
    }

    /// Storage to read into. Capacity doubles whenever it is full.
    pub fn read_target(&mut self) -> &mut BytesMut {
        if self.buf.capacity() == self.buf.len() {
            let grow = self.buf.capacity().max(INITIAL_CAPACITY);
            self.buf.reserve(grow);
        }
        &mut self.buf
    }

    /// Append raw bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Bytes buffered and not yet returned as a line.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Cut the next complete line off the buffer.
    ///
    /// Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LineTooLong`] if a line, or a partial line with
    /// no newline yet, exceeds the limit. A trailing `\r` does not count.
    pub fn next_line(&mut self) -> Result<Option<String>, CodecError> {
        let Some(i) = memchr(b'\n', &self.buf) else {
            if without_cr(&self.buf).len() > self.max_line_len {
                return Err(CodecError::LineTooLong {
                    max: self.max_line_len,
                });
            }
            return Ok(None);
        };
        if without_cr(self.buf.get(..i).unwrap_or_default()).len() > self.max_line_len {
            return Err(CodecError::LineTooLong {
                max: self.max_line_len,
            });
        }
        let raw = self.buf.split_to(i.saturating_add(1));
        let line = without_cr(raw.get(..i).unwrap_or_default());
        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }
}

fn without_cr(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}
