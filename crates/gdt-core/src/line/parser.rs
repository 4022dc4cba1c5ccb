use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use super::error::LineError;
use super::layout;
use super::reader::{RecordReader, decode_digits, read_up_to};
use super::{Line, LineSource};
use crate::charset::Charset;
use crate::document::Document;
use crate::field::FieldId;
use crate::types::TypeRegistry;

/// Streaming decoder turning a byte stream into [`Line`]s.
///
/// The framing digits are decoded with a fixed charset chosen at
/// construction (CP437 unless overridden). Only the bytes of the current
/// record are held in memory.
///
/// # Examples
/// ```
/// use gdt_core::{FieldId, LineDecoder};
///
/// let mut decoder = LineDecoder::new(&b"01380006311\r\n"[..]);
/// let line = decoder.next_line()?.expect("one record");
/// assert_eq!(line.field_id, FieldId(8000));
/// assert_eq!(line.content, b"6311");
/// assert!(decoder.next_line()?.is_none());
/// # Ok::<(), gdt_core::LineError>(())
/// ```
pub struct LineDecoder<R> {
    reader: R,
    charset: Charset,
}

impl LineDecoder<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, LineError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> LineDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_charset(reader, Charset::default())
    }

    pub fn with_charset(reader: R, charset: Charset) -> Self {
        Self { reader, charset }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` when the stream ends exactly at a record boundary.
    ///
    /// # Errors
    /// Any framing violation; end of stream inside a record is
    /// [`LineError::ShortRead`].
    pub fn next_line(&mut self) -> Result<Option<Line>, LineError> {
        let mut prefix = [0u8; layout::LENGTH_PREFIX_LEN];
        let read = read_up_to(&mut self.reader, &mut prefix)?;
        if read == 0 {
            return Ok(None);
        }
        if read < prefix.len() {
            return Err(LineError::ShortRead {
                expected: prefix.len(),
                actual: read,
            });
        }

        let length = decode_digits(self.charset, &prefix).map_err(|reason| {
            LineError::LengthDecode {
                raw: String::from_utf8_lossy(&prefix).into_owned(),
                reason,
            }
        })?;
        if length < layout::MIN_RECORD_LEN {
            return Err(LineError::RecordTooShort {
                length,
                minimum: layout::MIN_RECORD_LEN,
            });
        }

        let mut body = vec![0u8; length - layout::LENGTH_PREFIX_LEN];
        let read = read_up_to(&mut self.reader, &mut body)?;
        if read < body.len() {
            return Err(LineError::ShortRead {
                expected: body.len(),
                actual: read,
            });
        }

        let record = RecordReader::new(&body);
        record.check_line_ending()?;
        let raw_id = record.read_slice(layout::FIELD_ID_RANGE)?;
        let field_id = decode_digits(self.charset, raw_id).map_err(|reason| {
            LineError::IdentifierDecode {
                raw: String::from_utf8_lossy(raw_id).into_owned(),
                reason,
            }
        })?;
        let content = record.content()?.to_vec();

        let field_id = FieldId(field_id as u32);
        tracing::trace!(%field_id, length, "decoded record");
        Ok(Some(Line { field_id, content }))
    }

    /// Drain the stream into memory.
    pub fn read_lines(mut self) -> Result<Vec<Line>, LineError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Drain the stream into a [`Document`] backed by the global registry.
    pub fn read_document(self) -> Result<Document, LineError> {
        Ok(Document::new(self.read_lines()?))
    }

    pub fn read_document_with_registry(
        self,
        registry: Arc<TypeRegistry>,
    ) -> Result<Document, LineError> {
        Ok(Document::with_registry(self.read_lines()?, registry))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> LineSource for LineDecoder<R> {
    fn next_line(&mut self) -> Result<Option<Line>, LineError> {
        LineDecoder::next_line(self)
    }
}

impl<R: Read> Iterator for LineDecoder<R> {
    type Item = Result<Line, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::LineDecoder;
    use crate::charset::Charset;
    use crate::field::FieldId;
    use crate::line::error::{DigitsError, LineError};

    fn record(id: &str, content: &[u8]) -> Vec<u8> {
        let length = 3 + 4 + content.len() + 2;
        let mut out = format!("{length:03}{id}").into_bytes();
        out.extend_from_slice(content);
        out.extend_from_slice(b"\r\n");
        out
    }

    #[test]
    fn decodes_single_record() {
        let bytes = record("3101", b"Mustermann");
        let mut decoder = LineDecoder::new(&bytes[..]);
        let line = decoder.next_line().unwrap().unwrap();
        assert_eq!(line.field_id, FieldId(3101));
        assert_eq!(line.content, b"Mustermann");
        assert!(decoder.next_line().unwrap().is_none());
    }

    #[test]
    fn empty_content_is_allowed() {
        let bytes = record("6228", b"");
        let line = LineDecoder::new(&bytes[..]).next_line().unwrap().unwrap();
        assert!(line.content.is_empty());
    }

    #[test]
    fn content_keeps_high_bytes_undecoded() {
        let bytes = record("3101", &[b'M', 0x81, b'l', b'l', b'e', b'r']);
        let line = LineDecoder::new(&bytes[..]).next_line().unwrap().unwrap();
        assert_eq!(line.content, vec![b'M', 0x81, b'l', b'l', b'e', b'r']);
    }

    #[test]
    fn drains_multiple_records_in_order() {
        let mut bytes = record("8000", b"6310");
        bytes.extend(record("9206", b"2"));
        bytes.extend(record("3101", b"Doe"));
        let lines = LineDecoder::new(&bytes[..]).read_lines().unwrap();
        let ids: Vec<_> = lines.iter().map(|l| l.field_id.0).collect();
        assert_eq!(ids, vec![8000, 9206, 3101]);
    }

    #[test]
    fn iterator_yields_records() {
        let mut bytes = record("8000", b"6310");
        bytes.extend(record("3000", b"42"));
        let lines: Result<Vec<_>, _> = LineDecoder::new(&bytes[..]).collect();
        assert_eq!(lines.unwrap().len(), 2);
    }

    #[test]
    fn wrong_terminator_fails() {
        let mut bytes = record("3101", b"Doe");
        let len = bytes.len();
        bytes[len - 2] = b'\n';
        bytes[len - 1] = b'\n';
        let err = LineDecoder::new(&bytes[..]).next_line().unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidLineEnding {
                first: b'\n',
                second: b'\n'
            }
        ));
    }

    #[test]
    fn declared_length_beyond_stream_is_short_read() {
        let bytes = b"0203101Doe\r\n";
        let err = LineDecoder::new(&bytes[..]).next_line().unwrap_err();
        assert!(matches!(
            err,
            LineError::ShortRead {
                expected: 17,
                actual: 9
            }
        ));
    }

    #[test]
    fn truncated_prefix_is_short_read() {
        let mut bytes = record("3101", b"Doe");
        bytes.extend_from_slice(b"01");
        let mut decoder = LineDecoder::new(&bytes[..]);
        decoder.next_line().unwrap().unwrap();
        let err = decoder.next_line().unwrap_err();
        assert!(matches!(
            err,
            LineError::ShortRead {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn non_numeric_length_fails() {
        let err = LineDecoder::new(&b"0x93101Doe\r\n"[..])
            .next_line()
            .unwrap_err();
        assert!(matches!(
            err,
            LineError::LengthDecode {
                reason: DigitsError::NotANumber,
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_identifier_fails() {
        let err = LineDecoder::new(&b"01231x1Doe\r\n"[..])
            .next_line()
            .unwrap_err();
        assert!(matches!(err, LineError::IdentifierDecode { .. }));
    }

    #[test]
    fn length_below_minimum_fails() {
        let err = LineDecoder::new(&b"0053101\r\n"[..]).next_line().unwrap_err();
        assert!(matches!(
            err,
            LineError::RecordTooShort {
                length: 5,
                minimum: 9
            }
        ));
    }

    #[test]
    fn framing_charset_is_configurable() {
        let bytes = record("3101", b"Doe");
        let mut decoder = LineDecoder::with_charset(&bytes[..], Charset::Ascii);
        assert_eq!(decoder.charset(), Charset::Ascii);
        assert!(decoder.next_line().unwrap().is_some());
    }
}
