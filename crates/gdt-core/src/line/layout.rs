/// Width of the total-length prefix (`LLL`).
pub const LENGTH_PREFIX_LEN: usize = 3;
/// Width of the field identifier (`FFFF`).
pub const FIELD_ID_LEN: usize = 4;
/// Record terminator.
pub const LINE_ENDING: [u8; 2] = [b'\r', b'\n'];

/// Smallest total length that can hold prefix, identifier and terminator.
pub const MIN_RECORD_LEN: usize = LENGTH_PREFIX_LEN + FIELD_ID_LEN + LINE_ENDING.len();

/// Range of the identifier inside the record body (the bytes after `LLL`).
pub const FIELD_ID_RANGE: std::ops::Range<usize> = 0..FIELD_ID_LEN;
