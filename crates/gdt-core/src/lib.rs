//! Decoder for the GDT device interchange format.
//!
//! A GDT file is a stream of records `LLL FFFF content CR LF`. Decoding runs
//! in two passes: the [`LineDecoder`] frames raw lines without touching
//! their content, then the [`Document`] resolves the content charset from
//! field 9206 and parses fields on demand through a [`TypeRegistry`].
//! Field semantics live in caller-supplied [`FieldDesc`]s; the standard set
//! is available in [`catalog`].
//!
//! Invariants:
//! - A line's content is exactly the framed length minus prefix, identifier
//!   and terminator.
//! - Every typed value satisfies its descriptor's length rules.
//! - Charset resolution never fails a document; field access always reports
//!   its own failures.
//!
//! # Examples
//! ```
//! use gdt_core::{Charset, LineDecoder, catalog};
//!
//! let bytes = b"01092062\r\n0123101Doe\r\n";
//! let doc = LineDecoder::new(&bytes[..]).read_document()?;
//! assert_eq!(doc.charset(), Charset::Cp437);
//! assert_eq!(doc.string_field(&catalog::PATIENT_NAME)?, "Doe");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod catalog;
mod charset;
mod document;
mod field;
pub mod line;
pub mod types;

pub use charset::{Charset, CharsetError};
pub use document::{Document, DocumentError, PartialFields};
pub use field::{FieldDesc, FieldId, FieldType};
pub use line::{Line, LineDecoder, LineError, LineSource};
pub use types::{ParseError, ParseFn, TypeError, TypeRegistry, Value, ValueKind};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decode a GDT file into a [`Document`] over the global registry.
pub fn read_file(path: &Path) -> Result<Document, LineError> {
    LineDecoder::open(path)?.read_document()
}

/// Serializable summary of a decoded document.
///
/// # Examples
/// ```
/// use gdt_core::{Document, Line, build_report};
///
/// let doc = Document::new(vec![Line::new(3101u32, "Doe")]);
/// let report = build_report("sample.gdt", 17, &doc);
/// assert_eq!(report.charset, "cp437");
/// assert_eq!(report.lines[0].name.as_deref(), Some("patient_name"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input file metadata.
    pub input: InputInfo,
    /// Effective content charset.
    pub charset: String,
    /// One entry per line in file order.
    pub lines: Vec<LineReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// A single decoded line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineReport {
    /// Zero-padded field identifier.
    pub field_id: String,
    /// Catalog name, when the identifier is a standard field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Type tag used to parse the value.
    pub field_type: String,
    /// Raw content length in bytes.
    pub length: usize,
    /// Rendered value when parsing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Error message when parsing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summarise `document`, resolving each line through the catalog.
///
/// Identifiers outside the catalog are parsed as unconstrained text. A
/// line that fails to parse is reported with its error instead of a value.
pub fn build_report(input_path: &str, input_bytes: u64, document: &Document) -> Report {
    let lines = document
        .lines()
        .iter()
        .map(|line| {
            let desc = catalog::lookup(line.field_id)
                .cloned()
                .unwrap_or_else(|| FieldDesc::new(line.field_id, FieldType::TEXT));
            let parsed = document
                .decode_content(line)
                .map_err(DocumentError::from)
                .and_then(|content| Ok(document.registry().parse(&content, &desc)?));
            let (value, error) = match parsed {
                Ok(value) => (Some(value.to_string()), None),
                Err(err) => (None, Some(err.to_string())),
            };
            LineReport {
                field_id: line.field_id.to_string(),
                name: desc.name().map(str::to_string),
                field_type: desc.field_type.to_string(),
                length: line.content.len(),
                value,
                error,
            }
        })
        .collect();

    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "gdt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        charset: document.charset().to_string(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let doc = Document::new(vec![
            Line::new(9999u32, "free"),
            Line::new(3110u32, "x"),
        ]);
        let report = build_report("sample.gdt", 1, &doc);

        let value = serde_json::to_value(&report).expect("report json");
        let unknown = &value["lines"][0];
        assert!(unknown.get("name").is_none());
        assert!(unknown.get("error").is_none());
        assert_eq!(unknown["field_type"], "alnum");
        assert_eq!(unknown["value"], "free");

        let broken = &value["lines"][1];
        assert_eq!(broken["name"], "patient_gender");
        assert!(broken.get("value").is_none());
        assert!(broken["error"].as_str().unwrap().contains("not a number"));
    }

    #[test]
    fn report_records_charset_and_input() {
        let doc = Document::new(vec![Line::new(9206u32, "3")]);
        let report = build_report("in.gdt", 10, &doc);
        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.charset, "windows-1252");
        assert_eq!(report.input.path, "in.gdt");
        assert_eq!(report.lines[0].value.as_deref(), Some("3"));
    }
}
