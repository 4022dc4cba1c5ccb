use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::field::{FieldId, FieldType};

/// Failures raised by individual parse functions.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("field {field} has invalid length {length}")]
    InvalidLength { field: FieldId, length: usize },
    #[error("field {field}: {value:?} is not a number: {source}")]
    InvalidNumber {
        field: FieldId,
        value: String,
        source: ParseIntError,
    },
    #[error("field {field}: {value:?} is not a float: {source}")]
    InvalidFloat {
        field: FieldId,
        value: String,
        source: ParseFloatError,
    },
    #[error("field {field}: {value:?} is not a DDMMYYYY date")]
    InvalidDate { field: FieldId, value: String },
    #[error("field {field}: {value:?} is not a HHMMSS time")]
    InvalidTime { field: FieldId, value: String },
    #[error("field {field}: {source}")]
    Custom {
        field: FieldId,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failures of the registry itself, plus pass-through parse failures.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("type \"{0}\" already registered")]
    DuplicateType(FieldType),
    #[error("unknown field type \"{0}\"")]
    UnknownType(FieldType),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
