use std::borrow::Cow;
use std::fmt;

/// Four-digit GDT field identifier.
///
/// # Examples
/// ```
/// use gdt_core::FieldId;
///
/// assert_eq!(FieldId(102).to_string(), "0102");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(value: u32) -> Self {
        FieldId(value)
    }
}

/// Type tag resolved through a [`TypeRegistry`](crate::TypeRegistry).
///
/// `alnum`, `num` and `float` are the wire types; `date` and `time` are
/// alphanumeric on the wire but carry a fixed `DDMMYYYY` / `HHMMSS` layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldType(Cow<'static, str>);

impl FieldType {
    pub const TEXT: FieldType = FieldType::from_static("alnum");
    pub const NUMBER: FieldType = FieldType::from_static("num");
    pub const FLOAT: FieldType = FieldType::from_static("float");
    pub const DATE: FieldType = FieldType::from_static("date");
    pub const TIME: FieldType = FieldType::from_static("time");

    pub const fn from_static(tag: &'static str) -> Self {
        FieldType(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Self {
        FieldType(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static metadata describing a field: identifier, type and length rules.
///
/// Descriptors are plain data. The core never hardcodes field semantics; see
/// [`catalog`](crate::catalog) for the standard set.
///
/// # Examples
/// ```
/// use gdt_core::{FieldDesc, FieldId, FieldType};
///
/// let desc = FieldDesc::new(FieldId(3101), FieldType::TEXT).with_max_length(28);
/// assert_eq!(desc.max_length, Some(28));
/// assert_eq!(desc.length, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    pub id: FieldId,
    pub field_type: FieldType,
    pub name: Option<Cow<'static, str>>,
    /// Exact content length in characters, when fixed.
    pub length: Option<usize>,
    /// Exclusive upper bound on the content length in characters.
    pub max_length: Option<usize>,
}

impl FieldDesc {
    pub const fn new(id: FieldId, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            name: None,
            length: None,
            max_length: None,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
