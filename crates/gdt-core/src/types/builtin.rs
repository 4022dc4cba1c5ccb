//! Parse functions for the built-in field types.

use time::{Date, Duration, Month, PrimitiveDateTime, Time, UtcOffset};

use super::error::ParseError;
use super::value::Value;
use crate::field::FieldDesc;

/// Width of a `DDMMYYYY` date.
pub const DATE_LEN: usize = 8;
/// Width of a `HHMMSS` time.
pub const TIME_LEN: usize = 6;

/// Enforce the descriptor's length rules.
///
/// An exact length must match; a maximum length is exclusive, so a value
/// whose length equals the maximum is rejected as well.
pub fn verify_length(desc: &FieldDesc, value: &str) -> Result<(), ParseError> {
    let length = value.chars().count();
    let exact_mismatch = desc.length.is_some_and(|exact| length != exact);
    let too_long = desc.max_length.is_some_and(|max| length >= max);
    if exact_mismatch || too_long {
        return Err(ParseError::InvalidLength {
            field: desc.id,
            length,
        });
    }
    Ok(())
}

pub fn parse_text(value: &str, desc: &FieldDesc) -> Result<Value, ParseError> {
    verify_length(desc, value)?;
    Ok(Value::Text(value.to_string()))
}

/// Numbers are zero-padded to the field width; padding is stripped first.
pub fn parse_number(value: &str, desc: &FieldDesc) -> Result<Value, ParseError> {
    verify_length(desc, value)?;
    let digits = value.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(Value::Integer(0));
    }
    digits
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|source| ParseError::InvalidNumber {
            field: desc.id,
            value: value.to_string(),
            source,
        })
}

pub fn parse_float(value: &str, desc: &FieldDesc) -> Result<Value, ParseError> {
    verify_length(desc, value)?;
    let digits = value.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(Value::Float(0.0));
    }
    digits
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|source| ParseError::InvalidFloat {
            field: desc.id,
            value: value.to_string(),
            source,
        })
}

/// `DDMMYYYY` at midnight in the local offset in effect on that date.
///
/// The wire format carries no zone. When the platform cannot report the
/// local offset the value is placed in UTC.
///
/// On Unix the `time` crate refuses to read the local offset once the
/// process runs more than one thread, so in most multi-threaded hosts every
/// date comes back in UTC. Register a custom tag over
/// [`TypeRegistry`](crate::TypeRegistry) when a fixed zone is required.
pub fn parse_date(value: &str, desc: &FieldDesc) -> Result<Value, ParseError> {
    verify_length(desc, value)?;
    let invalid = || ParseError::InvalidDate {
        field: desc.id,
        value: value.to_string(),
    };
    if value.len() != DATE_LEN {
        return Err(invalid());
    }
    let day: u8 = slice_number(value, 0..2).ok_or_else(invalid)?;
    let month: u8 = slice_number(value, 2..4).ok_or_else(invalid)?;
    let year: i32 = slice_number(value, 4..8).ok_or_else(invalid)?;

    let month = Month::try_from(month).map_err(|_| invalid())?;
    let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;
    let midnight = PrimitiveDateTime::new(date, Time::MIDNIGHT);
    Ok(Value::Date(midnight.assume_offset(local_offset_at(midnight))))
}

/// `HHMMSS` as the duration since midnight.
pub fn parse_time(value: &str, desc: &FieldDesc) -> Result<Value, ParseError> {
    verify_length(desc, value)?;
    let invalid = || ParseError::InvalidTime {
        field: desc.id,
        value: value.to_string(),
    };
    if value.len() != TIME_LEN {
        return Err(invalid());
    }
    let hours: i64 = slice_number(value, 0..2).ok_or_else(invalid)?;
    let minutes: i64 = slice_number(value, 2..4).ok_or_else(invalid)?;
    let seconds: i64 = slice_number(value, 4..6).ok_or_else(invalid)?;
    Ok(Value::Time(
        Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds),
    ))
}

fn slice_number<T: std::str::FromStr>(value: &str, range: std::ops::Range<usize>) -> Option<T> {
    let part = value.get(range)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn local_offset_at(datetime: PrimitiveDateTime) -> UtcOffset {
    match UtcOffset::local_offset_at(datetime.assume_utc()) {
        Ok(offset) => offset,
        Err(err) => {
            tracing::debug!(error = %err, "local offset unavailable, using UTC");
            UtcOffset::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_float, parse_number, parse_text, parse_time, verify_length};
    use crate::field::{FieldDesc, FieldId, FieldType};
    use crate::types::error::ParseError;
    use crate::types::value::Value;
    use time::macros::date;
    use time::{Duration, Time};

    fn desc(field_type: FieldType) -> FieldDesc {
        FieldDesc::new(FieldId(1), field_type)
    }

    #[test]
    fn exact_length_must_match() {
        let desc = desc(FieldType::TEXT).with_length(4);
        assert!(verify_length(&desc, "abcd").is_ok());
        assert!(matches!(
            verify_length(&desc, "abc"),
            Err(ParseError::InvalidLength { length: 3, .. })
        ));
    }

    #[test]
    fn max_length_is_exclusive() {
        let desc = desc(FieldType::TEXT).with_max_length(4);
        assert!(verify_length(&desc, "abc").is_ok());
        assert!(verify_length(&desc, "abcd").is_err());
        assert!(verify_length(&desc, "abcde").is_err());
    }

    #[test]
    fn length_counts_characters_not_utf8_bytes() {
        let desc = desc(FieldType::TEXT).with_length(6);
        assert!(verify_length(&desc, "Müller").is_ok());
    }

    #[test]
    fn text_is_returned_unchanged() {
        let value = parse_text("  Doe ", &desc(FieldType::TEXT)).unwrap();
        assert_eq!(value, Value::Text("  Doe ".to_string()));
    }

    #[test]
    fn number_strips_leading_zeros() {
        let desc = desc(FieldType::NUMBER);
        assert_eq!(parse_number("0042", &desc).unwrap(), Value::Integer(42));
        assert_eq!(parse_number("000", &desc).unwrap(), Value::Integer(0));
        assert_eq!(parse_number("7", &desc).unwrap(), Value::Integer(7));
    }

    #[test]
    fn number_rejects_decimal_point() {
        let err = parse_number("00.50", &desc(FieldType::NUMBER)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn number_rejects_letters() {
        assert!(parse_number("12a", &desc(FieldType::NUMBER)).is_err());
    }

    #[test]
    fn float_strips_leading_zeros() {
        let desc = desc(FieldType::FLOAT);
        assert_eq!(parse_float("0072.5", &desc).unwrap(), Value::Float(72.5));
        assert_eq!(parse_float("00.50", &desc).unwrap(), Value::Float(0.5));
        assert_eq!(parse_float("000", &desc).unwrap(), Value::Float(0.0));
    }

    #[test]
    fn float_rejects_garbage() {
        let err = parse_float("1,5", &desc(FieldType::FLOAT)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFloat { .. }));
    }

    #[test]
    fn date_is_midnight_of_the_day() {
        let Value::Date(value) = parse_date("25121999", &desc(FieldType::DATE)).unwrap() else {
            panic!("expected a date");
        };
        assert_eq!(value.date(), date!(1999-12-25));
        assert_eq!(value.time(), Time::MIDNIGHT);
    }

    #[test]
    fn date_offset_is_local_or_utc_fallback() {
        let Value::Date(value) = parse_date("01071999", &desc(FieldType::DATE)).unwrap() else {
            panic!("expected a date");
        };
        let expected = super::local_offset_at(time::PrimitiveDateTime::new(
            date!(1999-07-01),
            Time::MIDNIGHT,
        ));
        assert_eq!(value.offset(), expected);
    }

    #[test]
    fn date_rejects_impossible_calendar_day() {
        let err = parse_date("31021999", &desc(FieldType::DATE)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDate { .. }));
    }

    #[test]
    fn date_rejects_wrong_width() {
        assert!(parse_date("2512199", &desc(FieldType::DATE)).is_err());
        assert!(parse_date("25.12.99", &desc(FieldType::DATE)).is_err());
    }

    #[test]
    fn time_is_duration_since_midnight() {
        let value = parse_time("235959", &desc(FieldType::TIME)).unwrap();
        assert_eq!(
            value,
            Value::Time(Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59))
        );
    }

    #[test]
    fn time_rejects_non_digits() {
        let err = parse_time("12:300", &desc(FieldType::TIME)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidTime { .. }));
    }
}
