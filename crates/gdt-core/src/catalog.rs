//! Standard GDT 2.10 field descriptors.
//!
//! Plain data: nothing in the decoder depends on these entries except the
//! charset control field. Callers are free to build their own descriptors.

use std::borrow::Cow;

use crate::field::{FieldDesc, FieldId, FieldType};

const fn desc(
    id: u32,
    name: &'static str,
    field_type: FieldType,
    length: Option<usize>,
    max_length: Option<usize>,
) -> FieldDesc {
    FieldDesc {
        id: FieldId(id),
        field_type,
        name: Some(Cow::Borrowed(name)),
        length,
        max_length,
    }
}

pub const SOFTWARE_RESPONSIBLE: FieldDesc =
    desc(102, "software_responsible", FieldType::TEXT, None, Some(60));
pub const SOFTWARE: FieldDesc = desc(103, "software", FieldType::TEXT, None, Some(60));
pub const SOFTWARE_RELEASE: FieldDesc =
    desc(132, "software_release", FieldType::TEXT, None, Some(60));
pub const PATIENT_ID: FieldDesc = desc(3000, "patient_id", FieldType::TEXT, None, Some(10));
pub const PATIENT_NAME_SUFFIX: FieldDesc =
    desc(3100, "patient_name_suffix", FieldType::TEXT, None, Some(15));
pub const PATIENT_NAME: FieldDesc = desc(3101, "patient_name", FieldType::TEXT, None, Some(28));
pub const PATIENT_GIVEN_NAME: FieldDesc =
    desc(3102, "patient_given_name", FieldType::TEXT, None, Some(28));
/// `DDMMYYYY`; kept as text, parse with [`FieldType::DATE`] when needed.
pub const PATIENT_BIRTHDAY: FieldDesc =
    desc(3103, "patient_birthday", FieldType::TEXT, Some(8), None);
pub const PATIENT_TITLE: FieldDesc = desc(3104, "patient_title", FieldType::TEXT, None, Some(15));
pub const PATIENT_INSURANCE_NUMBER: FieldDesc =
    desc(3105, "patient_insurance_number", FieldType::TEXT, None, Some(12));
pub const PATIENT_CITY: FieldDesc = desc(3106, "patient_city", FieldType::TEXT, None, Some(30));
pub const PATIENT_STREET: FieldDesc = desc(3107, "patient_street", FieldType::TEXT, None, Some(28));
/// 1 = member, 3 = family insured, 5 = pensioner.
pub const PATIENT_INSURANCE_TYPE: FieldDesc =
    desc(3108, "patient_insurance_type", FieldType::NUMBER, Some(1), None);
/// 1 = male, 2 = female.
pub const PATIENT_GENDER: FieldDesc =
    desc(3110, "patient_gender", FieldType::NUMBER, Some(1), None);
/// Centimetres.
pub const PATIENT_SIZE: FieldDesc = desc(3622, "patient_size", FieldType::FLOAT, None, None);
/// Kilograms.
pub const PATIENT_WEIGHT: FieldDesc = desc(3623, "patient_weight", FieldType::FLOAT, None, None);
pub const PATIENT_NATIVE_LANGUAGE: FieldDesc =
    desc(3628, "patient_native_language", FieldType::TEXT, None, Some(60));
/// `DDMMYYYY`.
pub const STUDY_DATE: FieldDesc = desc(6200, "study_date", FieldType::TEXT, Some(8), None);
/// `HHMMSS`.
pub const STUDY_TIME: FieldDesc = desc(6201, "study_time", FieldType::TEXT, Some(6), None);
pub const DIAGNOSIS: FieldDesc = desc(6205, "diagnosis", FieldType::TEXT, None, Some(60));
pub const FINDINGS: FieldDesc = desc(6220, "findings", FieldType::TEXT, None, Some(60));
pub const EXTERNAL_FINDINGS: FieldDesc =
    desc(6221, "external_findings", FieldType::TEXT, None, Some(60));
pub const RESULT_TEXT_LENGTH: FieldDesc =
    desc(6226, "result_text_length", FieldType::TEXT, None, Some(60));
pub const COMMENT: FieldDesc = desc(6227, "comment", FieldType::TEXT, None, Some(60));
/// May occur several times; read with [`Document::fields`](crate::Document::fields).
pub const RESULT_TABLE_TEXT: FieldDesc =
    desc(6228, "result_table_text", FieldType::TEXT, None, None);
pub const ARCHIVE_ID: FieldDesc = desc(6302, "archive_id", FieldType::TEXT, None, Some(60));
pub const FILE_FORMAT: FieldDesc = desc(6303, "file_format", FieldType::TEXT, None, Some(60));
pub const FILE_CONTENT: FieldDesc = desc(6304, "file_content", FieldType::TEXT, None, Some(60));
pub const FILE_URL: FieldDesc = desc(6305, "file_url", FieldType::TEXT, None, Some(60));
pub const FREE_CATEGORY_NAME: FieldDesc =
    desc(6330, "free_category_name", FieldType::TEXT, None, Some(60));
pub const FREE_CATEGORY_CONTENT: FieldDesc =
    desc(6331, "free_category_content", FieldType::TEXT, None, Some(60));
pub const RECORD_TYPE: FieldDesc = desc(8000, "record_type", FieldType::TEXT, Some(4), None);
pub const RECORD_LENGTH: FieldDesc = desc(8100, "record_length", FieldType::NUMBER, Some(5), None);
pub const RECEIVER_ID: FieldDesc = desc(8315, "receiver_id", FieldType::TEXT, Some(8), None);
pub const SENDER_ID: FieldDesc = desc(8316, "sender_id", FieldType::TEXT, Some(8), None);
pub const PROCEDURE_ID: FieldDesc = desc(8402, "procedure_id", FieldType::TEXT, None, Some(6));
pub const TEST_IDENT: FieldDesc = desc(8410, "test_ident", FieldType::TEXT, None, Some(20));
pub const TEST_DESCRIPTION: FieldDesc =
    desc(8411, "test_description", FieldType::TEXT, None, Some(60));
pub const TEST_STATUS: FieldDesc = desc(8418, "test_status", FieldType::TEXT, None, Some(1));
pub const RESULT_VALUE: FieldDesc = desc(8420, "result_value", FieldType::FLOAT, None, None);
pub const UNIT: FieldDesc = desc(8421, "unit", FieldType::TEXT, None, Some(60));
pub const SAMPLE_MATERIAL_IDENT: FieldDesc =
    desc(8428, "sample_material_ident", FieldType::TEXT, None, Some(8));
pub const SAMPLE_MATERIAL_INDEX: FieldDesc =
    desc(8429, "sample_material_index", FieldType::NUMBER, Some(2), None);
pub const SAMPLE_MATERIAL_DESCRIPTION: FieldDesc =
    desc(8430, "sample_material_description", FieldType::TEXT, None, Some(60));
pub const SAMPLE_MATERIAL_SPECIFICATION: FieldDesc =
    desc(8431, "sample_material_specification", FieldType::TEXT, None, Some(60));
pub const ACCEPTANCE_DATE: FieldDesc =
    desc(8432, "acceptance_date", FieldType::TEXT, Some(8), None);
pub const DATA_UNIT: FieldDesc = desc(8437, "data_unit", FieldType::TEXT, None, Some(60));
pub const DATA: FieldDesc = desc(8438, "data", FieldType::TEXT, None, Some(60));
pub const ACCEPTANCE_TIME: FieldDesc =
    desc(8439, "acceptance_time", FieldType::TEXT, Some(6), None);
pub const NORMAL_VALUE_TEXT: FieldDesc =
    desc(8460, "normal_value_text", FieldType::TEXT, None, Some(60));
pub const NORMAL_VALUE_LOWER_BOUNDARY: FieldDesc =
    desc(8461, "normal_value_lower_boundary", FieldType::FLOAT, None, None);
pub const NORMAL_VALUE_UPPER_BOUNDARY: FieldDesc =
    desc(8462, "normal_value_upper_boundary", FieldType::FLOAT, None, None);
pub const TEST_ANNOTATION: FieldDesc =
    desc(8470, "test_annotation", FieldType::TEXT, None, Some(60));
pub const RESULT_TEXT: FieldDesc = desc(8480, "result_text", FieldType::TEXT, None, Some(60));
pub const SIGNATURE: FieldDesc = desc(8990, "signature", FieldType::TEXT, None, Some(60));
/// Selects the content charset, see [`Charset::from_control`](crate::Charset::from_control).
pub const CHARACTER_SET: FieldDesc = desc(9206, "character_set", FieldType::NUMBER, Some(1), None);
/// GDT version, e.g. `02.10`.
pub const VERSION: FieldDesc = desc(9218, "version", FieldType::TEXT, None, None);

/// Every descriptor above, ordered by identifier.
pub const ALL: &[FieldDesc] = &[
    SOFTWARE_RESPONSIBLE,
    SOFTWARE,
    SOFTWARE_RELEASE,
    PATIENT_ID,
    PATIENT_NAME_SUFFIX,
    PATIENT_NAME,
    PATIENT_GIVEN_NAME,
    PATIENT_BIRTHDAY,
    PATIENT_TITLE,
    PATIENT_INSURANCE_NUMBER,
    PATIENT_CITY,
    PATIENT_STREET,
    PATIENT_INSURANCE_TYPE,
    PATIENT_GENDER,
    PATIENT_SIZE,
    PATIENT_WEIGHT,
    PATIENT_NATIVE_LANGUAGE,
    STUDY_DATE,
    STUDY_TIME,
    DIAGNOSIS,
    FINDINGS,
    EXTERNAL_FINDINGS,
    RESULT_TEXT_LENGTH,
    COMMENT,
    RESULT_TABLE_TEXT,
    ARCHIVE_ID,
    FILE_FORMAT,
    FILE_CONTENT,
    FILE_URL,
    FREE_CATEGORY_NAME,
    FREE_CATEGORY_CONTENT,
    RECORD_TYPE,
    RECORD_LENGTH,
    RECEIVER_ID,
    SENDER_ID,
    PROCEDURE_ID,
    TEST_IDENT,
    TEST_DESCRIPTION,
    TEST_STATUS,
    RESULT_VALUE,
    UNIT,
    SAMPLE_MATERIAL_IDENT,
    SAMPLE_MATERIAL_INDEX,
    SAMPLE_MATERIAL_DESCRIPTION,
    SAMPLE_MATERIAL_SPECIFICATION,
    ACCEPTANCE_DATE,
    DATA_UNIT,
    DATA,
    ACCEPTANCE_TIME,
    NORMAL_VALUE_TEXT,
    NORMAL_VALUE_LOWER_BOUNDARY,
    NORMAL_VALUE_UPPER_BOUNDARY,
    TEST_ANNOTATION,
    RESULT_TEXT,
    SIGNATURE,
    CHARACTER_SET,
    VERSION,
];

/// Find the standard descriptor for `id`.
///
/// # Examples
/// ```
/// use gdt_core::{FieldId, catalog};
///
/// let desc = catalog::lookup(FieldId(3101)).expect("known field");
/// assert_eq!(desc.name(), Some("patient_name"));
/// assert!(catalog::lookup(FieldId(1)).is_none());
/// ```
pub fn lookup(id: FieldId) -> Option<&'static FieldDesc> {
    ALL.iter().find(|desc| desc.id == id)
}
