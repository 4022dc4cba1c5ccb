use thiserror::Error;

use crate::charset::CharsetError;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("short read: need {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
    #[error("record length {length} is below the minimum of {minimum}")]
    RecordTooShort { length: usize, minimum: usize },
    #[error("unexpected line ending 0x{first:02x} 0x{second:02x}")]
    InvalidLineEnding { first: u8, second: u8 },
    #[error("failed to decode line length {raw:?}: {reason}")]
    LengthDecode { raw: String, reason: DigitsError },
    #[error("failed to decode field identifier {raw:?}: {reason}")]
    IdentifierDecode { raw: String, reason: DigitsError },
}

/// Why a framing digit group could not be turned into a number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigitsError {
    #[error("{0}")]
    Charset(#[from] CharsetError),
    #[error("not a base-10 number")]
    NotANumber,
}
