use std::fmt;

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// A decoded field value.
///
/// `Time` is a duration since midnight so it can be added to a `Date`:
///
/// ```
/// use gdt_core::Value;
/// use time::{Duration, macros::datetime};
///
/// let date = Value::Date(datetime!(1999-12-25 0:00 UTC));
/// let time = Value::Time(Duration::hours(8) + Duration::minutes(30));
/// if let (Value::Date(d), Value::Time(t)) = (date, time) {
///     assert_eq!(d + t, datetime!(1999-12-25 8:30 UTC));
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(OffsetDateTime),
    Time(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Date,
    Time,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Date(date) => {
                let formatted = date.format(&Rfc3339).map_err(|_| fmt::Error)?;
                f.write_str(&formatted)
            }
            Value::Time(duration) => {
                let total = duration.whole_seconds();
                write!(
                    f,
                    "{:02}:{:02}:{:02}",
                    total / 3600,
                    (total % 3600) / 60,
                    total % 60
                )
            }
        }
    }
}
