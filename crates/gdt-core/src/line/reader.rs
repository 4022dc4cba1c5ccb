use std::io::{ErrorKind, Read};

use super::error::{DigitsError, LineError};
use super::layout;
use crate::charset::Charset;

/// Safe access to the bytes of one record following the length prefix.
pub struct RecordReader<'a> {
    body: &'a [u8],
}

impl<'a> RecordReader<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), LineError> {
        if self.body.len() < needed {
            return Err(LineError::ShortRead {
                expected: needed,
                actual: self.body.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], LineError> {
        self.body.get(range.clone()).ok_or(LineError::ShortRead {
            expected: range.end,
            actual: self.body.len(),
        })
    }

    /// Verify the record ends in CR LF.
    pub fn check_line_ending(&self) -> Result<(), LineError> {
        let ending_len = layout::LINE_ENDING.len();
        self.require_len(ending_len)?;
        let tail = self.read_slice(self.body.len() - ending_len..self.body.len())?;
        if tail != layout::LINE_ENDING {
            return Err(LineError::InvalidLineEnding {
                first: tail[0],
                second: tail[1],
            });
        }
        Ok(())
    }

    /// Content between the identifier and the terminator.
    pub fn content(&self) -> Result<&'a [u8], LineError> {
        let end = self.body.len().saturating_sub(layout::LINE_ENDING.len());
        self.read_slice(layout::FIELD_ID_LEN..end)
    }
}

/// Decode a group of framing digits through `charset` as a base-10 number.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use gdt_core::line::reader::decode_digits;
/// use gdt_core::Charset;
///
/// assert_eq!(decode_digits(Charset::Cp437, b"017"), Ok(17));
/// ```
pub fn decode_digits(charset: Charset, raw: &[u8]) -> Result<usize, DigitsError> {
    let text = charset.decode(raw)?;
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(DigitsError::NotANumber);
    }
    text.parse().map_err(|_| DigitsError::NotANumber)
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
///
/// Returns the number of bytes read, which is less than `buf.len()` only when
/// the stream ended.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, LineError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(LineError::Io(err)),
        }
    }
    Ok(filled)
}
