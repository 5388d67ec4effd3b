//! FMH3 fontmaps, bare or wrapped in a `FONM` section container.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ErrorKind;

mod body;
mod container;
pub mod reloc;

#[derive(Debug, Error)]
pub enum FontmapError {
    #[error("unrecognized fontmap signature {signature:?}")]
    UnrecognizedSignature { signature: String },

    #[error("fontmap is truncated at offset {offset:#x}")]
    Truncated { offset: usize },

    #[error("pointer at {offset:#x} is not aligned to {size} bytes")]
    MisalignedPointer { offset: usize, size: usize },

    #[error("value {value} does not fit its field")]
    Overflow { value: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FontmapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FontmapError::UnrecognizedSignature { .. } => ErrorKind::Unsupported,
            _ => ErrorKind::Format,
        }
    }
}

#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontmapKind {
    /// Bare FMH3 with 32-bit little-endian pointers (Future Tone).
    FMH3,
    /// FONM section with 64-bit pointers and a `POF1` table (X).
    FONM,
    /// Big-endian FONM section with absolute pointers and `POF0` (F 2nd).
    FONM_F2,
}

impl FontmapKind {
    pub fn remarks(self) -> &'static str {
        match self {
            FontmapKind::FMH3 => "unencapsulated FT fontmap",
            FontmapKind::FONM => "X fontmap in FONM container",
            FontmapKind::FONM_F2 => "F2nd fontmap in FONM container",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontChar {
    pub codepoint: u16,
    pub halfwidth: bool,
    pub tex_col: u8,
    pub tex_row: u8,
    pub glyph_x: u8,
    pub glyph_width: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: u32,
    pub advance_width: u8,
    pub line_height: u8,
    pub box_width: u8,
    pub box_height: u8,
    pub layout_param_1: u8,
    pub layout_param_2_numerator: u8,
    pub layout_param_2_denominator: u8,
    pub other_params: u32,
    pub tex_size_chars: u32,
    pub chars: Vec<FontChar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fontmap {
    pub kind: FontmapKind,
    pub fonts: Vec<Font>,
}

impl Fontmap {
    pub fn new(kind: FontmapKind) -> Self {
        Fontmap {
            kind,
            fonts: Vec::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontmapError> {
        match bytes.get(..4) {
            Some(b"FMH3") => Ok(Fontmap {
                kind: FontmapKind::FMH3,
                fonts: body::decode::<byteorder::LittleEndian>(bytes, 0, &body::Layout::FMH3)?,
            }),
            Some(b"FONM") => container::decode(bytes),
            Some(other) => Err(FontmapError::UnrecognizedSignature {
                signature: String::from_utf8_lossy(other).into_owned(),
            }),
            None => Err(FontmapError::Truncated { offset: 0 }),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, FontmapError> {
        match self.kind {
            FontmapKind::FMH3 => {
                let encoded = body::encode::<byteorder::LittleEndian>(&self.fonts, &body::Layout::FMH3)?;
                Ok(encoded.bytes)
            }
            FontmapKind::FONM | FontmapKind::FONM_F2 => container::encode(self.kind, &self.fonts),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, FontmapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, FontmapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample(kind: FontmapKind) -> Fontmap {
        let glyph = |codepoint: u16, col: u8| FontChar {
            codepoint,
            halfwidth: codepoint < 0x80,
            tex_col: col,
            tex_row: 1,
            glyph_x: 2,
            glyph_width: 20,
        };
        Fontmap {
            kind,
            fonts: vec![
                Font {
                    id: 0,
                    advance_width: 24,
                    line_height: 24,
                    box_width: 26,
                    box_height: 26,
                    layout_param_1: 1,
                    layout_param_2_numerator: 1,
                    layout_param_2_denominator: 2,
                    other_params: 0,
                    tex_size_chars: 64,
                    chars: vec![glyph(0x41, 0), glyph(0x42, 1), glyph(0x3042, 2)],
                },
                Font {
                    id: 3,
                    advance_width: 36,
                    line_height: 36,
                    box_width: 38,
                    box_height: 38,
                    layout_param_1: 0,
                    layout_param_2_numerator: 3,
                    layout_param_2_denominator: 4,
                    other_params: 7,
                    tex_size_chars: 32,
                    chars: vec![glyph(0x30A2, 5)],
                },
            ],
        }
    }

    #[test]
    fn json_round_trip() {
        let fontmap = sample(FontmapKind::FONM);
        let json = fontmap.to_json().unwrap();
        assert!(json.contains("\"FONM\""));
        assert_eq!(Fontmap::from_json(&json).unwrap(), fontmap);
    }

    #[test]
    fn rejects_unknown_signatures() {
        let err = Fontmap::from_bytes(b"FARC\0\0\0\0").unwrap_err();
        assert!(matches!(err, FontmapError::UnrecognizedSignature { .. }));
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert!(matches!(
            Fontmap::from_bytes(b"FM"),
            Err(FontmapError::Truncated { .. })
        ));
    }
}
