//! Single-byte character sets selectable through field 9206.
//!
//! GDT content is encoded in one of three code pages. The control field
//! value `1` selects 7-bit ASCII, `2` the IBM code page 437 (the default when
//! nothing is declared) and `3` Windows-1252. Framing digits are always ASCII
//! in all three, so only field content depends on the selection.

use std::borrow::Cow;
use std::fmt;

use codepage_437::{BorrowFromCp437, CP437_CONTROL};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("byte 0x{byte:02x} at offset {offset} is not 7-bit ASCII")]
    NonAscii { byte: u8, offset: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// 7-bit ASCII; bytes above 0x7f are rejected.
    Ascii,
    /// IBM PC code page 437.
    #[default]
    Cp437,
    /// Windows-1252 (Western European).
    Windows1252,
}

impl Charset {
    /// Map the raw content of field 9206 to a charset.
    ///
    /// Only a single digit `1`, `2` or `3` is recognised.
    ///
    /// # Examples
    /// ```
    /// use gdt_core::Charset;
    ///
    /// assert_eq!(Charset::from_control(b"3"), Some(Charset::Windows1252));
    /// assert_eq!(Charset::from_control(b"9"), None);
    /// assert_eq!(Charset::from_control(b"03"), None);
    /// ```
    pub fn from_control(content: &[u8]) -> Option<Self> {
        match content {
            b"1" => Some(Charset::Ascii),
            b"2" => Some(Charset::Cp437),
            b"3" => Some(Charset::Windows1252),
            _ => None,
        }
    }

    /// Decode raw bytes into text.
    ///
    /// # Errors
    /// Returns [`CharsetError::NonAscii`] when an ASCII charset meets a byte
    /// with the high bit set. The 8-bit code pages map every byte.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, CharsetError> {
        match self {
            Charset::Ascii => decode_ascii(bytes),
            Charset::Cp437 => Ok(Cow::borrow_from_cp437(bytes, &CP437_CONTROL)),
            Charset::Windows1252 => {
                // every byte has a mapping, so no replacement ever happens
                let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(text)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Charset::Ascii => "ascii",
            Charset::Cp437 => "cp437",
            Charset::Windows1252 => "windows-1252",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_ascii(bytes: &[u8]) -> Result<Cow<'_, str>, CharsetError> {
    if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(CharsetError::NonAscii {
            byte: bytes[offset],
            offset,
        });
    }
    // all bytes are ASCII, hence valid UTF-8
    Ok(String::from_utf8_lossy(bytes))
}
