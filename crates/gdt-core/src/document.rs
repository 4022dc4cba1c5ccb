use std::borrow::Cow;
use std::sync::Arc;

use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::catalog;
use crate::charset::{Charset, CharsetError};
use crate::field::{FieldDesc, FieldId};
use crate::line::{Line, LineError, LineSource};
use crate::types::{TypeError, TypeRegistry, Value, ValueKind};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("field {0} not found")]
    FieldNotFound(FieldId),
    #[error("charset error: {0}")]
    Charset(#[from] CharsetError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("field {field}: expected {expected} value, found {found}")]
    TypeMismatch {
        field: FieldId,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// A failed [`Document::fields`] call with the values decoded before it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PartialFields {
    pub collected: Vec<Value>,
    pub source: DocumentError,
}

/// A decoded GDT file: framed lines plus the charset their content uses.
///
/// The charset comes from field 9206 when present and valid; otherwise CP437.
/// Content is decoded lazily on access, so a broken control field never
/// prevents reading the raw lines.
///
/// # Examples
/// ```
/// use gdt_core::{Charset, Document, Line, catalog};
///
/// let doc = Document::new(vec![
///     Line::new(9206u32, "3"),
///     Line::new(3101u32, b"M\xfcller".to_vec()),
/// ]);
/// assert_eq!(doc.charset(), Charset::Windows1252);
/// assert_eq!(doc.string_field(&catalog::PATIENT_NAME)?, "Müller");
/// # Ok::<(), gdt_core::DocumentError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    charset: Charset,
    registry: Arc<TypeRegistry>,
    lines: Vec<Line>,
}

impl Document {
    /// Build a document backed by the global registry.
    pub fn new(lines: Vec<Line>) -> Self {
        Self::with_registry(lines, TypeRegistry::global())
    }

    pub fn with_registry(lines: Vec<Line>, registry: Arc<TypeRegistry>) -> Self {
        let mut document = Self {
            charset: Charset::default(),
            registry,
            lines,
        };
        document.charset = document.resolve_charset();
        document
    }

    /// Drain `source` and build a document over the global registry.
    pub fn read_from<S: LineSource>(mut source: S) -> Result<Self, LineError> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line()? {
            lines.push(line);
        }
        Ok(Self::new(lines))
    }

    // Failures here are not fatal: the raw lines stay inspectable and every
    // later field access reports its own errors. The registry is not
    // consulted, so independent registries see the same charset.
    fn resolve_charset(&self) -> Charset {
        let Some(line) = self.line(catalog::CHARACTER_SET.id) else {
            return Charset::default();
        };
        Charset::from_control(&line.content).unwrap_or_else(|| {
            tracing::debug!(
                content = %String::from_utf8_lossy(&line.content),
                "unmapped charset value, using default"
            );
            Charset::default()
        })
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// First raw line carrying `id`.
    pub fn line(&self, id: FieldId) -> Option<&Line> {
        self.lines.iter().find(|line| line.field_id == id)
    }

    /// Decode a line's content with the document charset.
    pub fn decode_content<'a>(&self, line: &'a Line) -> Result<Cow<'a, str>, CharsetError> {
        self.charset.decode(&line.content)
    }

    /// Parse the first line matching `desc`.
    ///
    /// # Errors
    /// [`DocumentError::FieldNotFound`] when no line matches; charset and
    /// parse failures otherwise.
    pub fn field(&self, desc: &FieldDesc) -> Result<Value, DocumentError> {
        let line = self
            .line(desc.id)
            .ok_or(DocumentError::FieldNotFound(desc.id))?;
        self.parse_line(line, desc)
    }

    /// Parse every line matching `desc`, in file order.
    ///
    /// No matching line yields an empty vector. On failure the values
    /// decoded so far are returned with the error.
    pub fn fields(&self, desc: &FieldDesc) -> Result<Vec<Value>, PartialFields> {
        let mut collected = Vec::new();
        for line in self.lines.iter().filter(|line| line.field_id == desc.id) {
            match self.parse_line(line, desc) {
                Ok(value) => collected.push(value),
                Err(source) => return Err(PartialFields { collected, source }),
            }
        }
        Ok(collected)
    }

    pub fn int_field(&self, desc: &FieldDesc) -> Result<i64, DocumentError> {
        match self.field(desc)? {
            Value::Integer(value) => Ok(value),
            other => Err(mismatch(desc, ValueKind::Integer, &other)),
        }
    }

    pub fn float_field(&self, desc: &FieldDesc) -> Result<f64, DocumentError> {
        match self.field(desc)? {
            Value::Float(value) => Ok(value),
            other => Err(mismatch(desc, ValueKind::Float, &other)),
        }
    }

    pub fn string_field(&self, desc: &FieldDesc) -> Result<String, DocumentError> {
        match self.field(desc)? {
            Value::Text(value) => Ok(value),
            other => Err(mismatch(desc, ValueKind::Text, &other)),
        }
    }

    pub fn date_field(&self, desc: &FieldDesc) -> Result<OffsetDateTime, DocumentError> {
        match self.field(desc)? {
            Value::Date(value) => Ok(value),
            other => Err(mismatch(desc, ValueKind::Date, &other)),
        }
    }

    pub fn time_field(&self, desc: &FieldDesc) -> Result<Duration, DocumentError> {
        match self.field(desc)? {
            Value::Time(value) => Ok(value),
            other => Err(mismatch(desc, ValueKind::Time, &other)),
        }
    }

    fn parse_line(&self, line: &Line, desc: &FieldDesc) -> Result<Value, DocumentError> {
        let content = self.decode_content(line)?;
        Ok(self.registry.parse(&content, desc)?)
    }
}

fn mismatch(desc: &FieldDesc, expected: ValueKind, found: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        field: desc.id,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Document, DocumentError};
    use crate::catalog;
    use crate::charset::{Charset, CharsetError};
    use crate::field::{FieldDesc, FieldId, FieldType};
    use crate::line::Line;
    use crate::types::{ParseError, TypeError, TypeRegistry, Value, ValueKind};

    fn charset_line(value: &str) -> Line {
        Line::new(9206u32, value)
    }

    #[test]
    fn charset_defaults_to_cp437_without_control_field() {
        let doc = Document::new(vec![Line::new(3101u32, "Doe")]);
        assert_eq!(doc.charset(), Charset::Cp437);
    }

    #[test]
    fn charset_control_values_select_charset() {
        assert_eq!(Document::new(vec![charset_line("1")]).charset(), Charset::Ascii);
        assert_eq!(Document::new(vec![charset_line("2")]).charset(), Charset::Cp437);
        assert_eq!(
            Document::new(vec![charset_line("3")]).charset(),
            Charset::Windows1252
        );
    }

    #[test]
    fn unmapped_or_malformed_charset_falls_back() {
        assert_eq!(Document::new(vec![charset_line("9")]).charset(), Charset::Cp437);
        assert_eq!(Document::new(vec![charset_line("x")]).charset(), Charset::Cp437);
        assert_eq!(Document::new(vec![charset_line("33")]).charset(), Charset::Cp437);
    }

    #[test]
    fn charset_resolution_ignores_the_registry() {
        let registry = Arc::new(TypeRegistry::new());
        registry
            .register(FieldType::TEXT, Arc::new(crate::types::builtin::parse_text))
            .unwrap();
        let doc = Document::with_registry(
            vec![charset_line("3"), Line::new(3101u32, b"M\xfcller".to_vec())],
            registry,
        );
        assert_eq!(doc.charset(), Charset::Windows1252);
        assert_eq!(doc.string_field(&catalog::PATIENT_NAME).unwrap(), "Müller");
    }

    #[test]
    fn custom_number_parser_does_not_select_charset() {
        let registry = Arc::new(TypeRegistry::new());
        registry
            .register(
                FieldType::NUMBER,
                Arc::new(|_: &str, _: &FieldDesc| -> Result<Value, ParseError> {
                    Ok(Value::Integer(3))
                }),
            )
            .unwrap();
        let doc = Document::with_registry(vec![charset_line("9")], registry);
        assert_eq!(doc.charset(), Charset::Cp437);
    }

    #[test]
    fn field_uses_first_match() {
        let doc = Document::new(vec![
            Line::new(3101u32, "First"),
            Line::new(3101u32, "Second"),
        ]);
        assert_eq!(
            doc.field(&catalog::PATIENT_NAME).unwrap(),
            Value::Text("First".to_string())
        );
    }

    #[test]
    fn missing_field_is_not_found_but_fields_is_empty() {
        let doc = Document::new(vec![Line::new(3101u32, "Doe")]);
        let err = doc.field(&catalog::PATIENT_ID).unwrap_err();
        assert!(matches!(err, DocumentError::FieldNotFound(FieldId(3000))));
        assert!(doc.fields(&catalog::PATIENT_ID).unwrap().is_empty());
    }

    #[test]
    fn fields_collects_in_order() {
        let doc = Document::new(vec![
            Line::new(6228u32, "line one"),
            Line::new(3101u32, "Doe"),
            Line::new(6228u32, "line two"),
        ]);
        let values = doc.fields(&catalog::RESULT_TABLE_TEXT).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Text("line one".to_string()),
                Value::Text("line two".to_string())
            ]
        );
    }

    #[test]
    fn fields_returns_partial_results_on_failure() {
        let desc = FieldDesc::new(FieldId(8420), FieldType::NUMBER);
        let doc = Document::new(vec![
            Line::new(8420u32, "1"),
            Line::new(8420u32, "2"),
            Line::new(8420u32, "x"),
            Line::new(8420u32, "4"),
        ]);
        let err = doc.fields(&desc).unwrap_err();
        assert_eq!(err.collected, vec![Value::Integer(1), Value::Integer(2)]);
        assert!(matches!(
            err.source,
            DocumentError::Type(TypeError::Parse(ParseError::InvalidNumber { .. }))
        ));
    }

    #[test]
    fn typed_accessors_reject_other_kinds() {
        let doc = Document::new(vec![Line::new(3101u32, "Doe"), Line::new(3110u32, "2")]);
        assert_eq!(doc.int_field(&catalog::PATIENT_GENDER).unwrap(), 2);
        let err = doc.int_field(&catalog::PATIENT_NAME).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TypeMismatch {
                expected: ValueKind::Integer,
                found: ValueKind::Text,
                ..
            }
        ));
        assert!(doc.float_field(&catalog::PATIENT_NAME).is_err());
        assert!(doc.string_field(&catalog::PATIENT_GENDER).is_err());
    }

    #[test]
    fn float_accessor_returns_value() {
        let doc = Document::new(vec![Line::new(3623u32, "0072.5")]);
        assert_eq!(doc.float_field(&catalog::PATIENT_WEIGHT).unwrap(), 72.5);
    }

    #[test]
    fn date_and_time_accessors_combine() {
        let date = FieldDesc::new(FieldId(6200), FieldType::DATE).with_length(8);
        let time = FieldDesc::new(FieldId(6201), FieldType::TIME).with_length(6);
        let doc = Document::new(vec![
            Line::new(6200u32, "24122003"),
            Line::new(6201u32, "083000"),
        ]);
        let at = doc.date_field(&date).unwrap() + doc.time_field(&time).unwrap();
        assert_eq!(at.hour(), 8);
        assert_eq!(at.minute(), 30);
        assert_eq!(at.day(), 24);
    }

    #[test]
    fn content_decoding_follows_resolved_charset() {
        let cp437 = Document::new(vec![Line::new(3101u32, b"M\x81ller".to_vec())]);
        assert_eq!(cp437.string_field(&catalog::PATIENT_NAME).unwrap(), "Müller");

        let latin = Document::new(vec![
            charset_line("3"),
            Line::new(3101u32, b"M\xfcller".to_vec()),
        ]);
        assert_eq!(latin.string_field(&catalog::PATIENT_NAME).unwrap(), "Müller");
    }

    #[test]
    fn charset_errors_propagate_from_field_access() {
        let doc = Document::new(vec![
            charset_line("1"),
            Line::new(3101u32, b"M\xfcller".to_vec()),
        ]);
        let err = doc.field(&catalog::PATIENT_NAME).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Charset(CharsetError::NonAscii { byte: 0xfc, offset: 1 })
        ));
    }

    #[test]
    fn length_violations_surface() {
        let doc = Document::new(vec![Line::new(3000u32, "0123456789")]);
        let err = doc.field(&catalog::PATIENT_ID).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Type(TypeError::Parse(ParseError::InvalidLength { length: 10, .. }))
        ));
    }

    #[test]
    fn line_lookup_returns_raw_bytes() {
        let doc = Document::new(vec![charset_line("x")]);
        assert_eq!(doc.line(FieldId(9206)).unwrap().content, b"x");
        assert!(doc.line(FieldId(1)).is_none());
    }
}
