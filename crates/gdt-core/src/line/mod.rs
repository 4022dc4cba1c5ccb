//! Record framing.
//!
//! A GDT stream is a sequence of records `LLL FFFF content CR LF`, where
//! `LLL` is the total record length including itself and the terminator and
//! `FFFF` the field identifier. The decoder frames one record at a time and
//! leaves the content undecoded: the charset that applies to it may be
//! declared later in the same stream (field 9206).
//!
//! - `layout`: widths and the terminator (source of truth)
//! - `reader`: safe slicing of a record body and digit decoding
//! - `parser`: the streaming [`LineDecoder`]
//! - `error`: framing failures

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::{DigitsError, LineError};
pub use parser::LineDecoder;

use crate::field::FieldId;

/// One framed record with its content still in wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub field_id: FieldId,
    pub content: Vec<u8>,
}

impl Line {
    pub fn new(field_id: impl Into<FieldId>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            field_id: field_id.into(),
            content: content.into(),
        }
    }
}

/// Anything that yields framed lines until a clean end of stream.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<Line>, LineError>;
}
