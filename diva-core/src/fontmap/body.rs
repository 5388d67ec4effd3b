//! The FMH3 structure itself: header, font pointer table, fonts and their
//! glyph arrays.

use byteorder::{ByteOrder, LittleEndian};

use super::{Font, FontChar, FontmapError};
use crate::farc::round_up;

const SIGNATURE: &[u8; 4] = b"FMH3";
const CHAR_LEN: usize = 8;

/// Pointer width and addressing of one fontmap kind.
pub(crate) struct Layout {
    pub pointer_size: usize,
    /// Pointer value of the first FMH3 byte.
    pub pointer_base: usize,
    /// Lowest pointer value the font table may start at.
    pub fonts_min_offset: usize,
}

impl Layout {
    pub const FMH3: Layout = Layout {
        pointer_size: 4,
        pointer_base: 0,
        fonts_min_offset: 32,
    };

    pub const FONM: Layout = Layout {
        pointer_size: 8,
        pointer_base: 0,
        fonts_min_offset: 32,
    };

    /// Pointers are absolute and the FMH3 sits after the section header.
    pub const FONM_F2: Layout = Layout {
        pointer_size: 4,
        pointer_base: 32,
        fonts_min_offset: 96,
    };

    fn font_len(&self) -> usize {
        24 + self.pointer_size
    }
}

pub(crate) struct Encoded {
    pub bytes: Vec<u8>,
    /// Positions of every pointer field, as pointer values.
    pub pointer_fields: Vec<usize>,
}

fn field(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], FontmapError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(FontmapError::Truncated { offset })
}

/// `base + offset`, for offsets read from the file.
fn offset_from(base: usize, offset: usize) -> Result<usize, FontmapError> {
    base.checked_add(offset)
        .ok_or(FontmapError::Truncated { offset: base })
}

fn read_int<B: ByteOrder>(bytes: &[u8], offset: usize) -> Result<u32, FontmapError> {
    Ok(B::read_u32(field(bytes, offset, 4)?))
}

fn read_pointer<B: ByteOrder>(bytes: &[u8], offset: usize, size: usize) -> Result<usize, FontmapError> {
    let value = match size {
        8 => B::read_u64(field(bytes, offset, 8)?),
        _ => u64::from(B::read_u32(field(bytes, offset, 4)?)),
    };
    usize::try_from(value).map_err(|_| FontmapError::Overflow { value })
}

fn decode_char(bytes: &[u8], offset: usize) -> Result<FontChar, FontmapError> {
    let raw = field(bytes, offset, CHAR_LEN)?;
    Ok(FontChar {
        codepoint: LittleEndian::read_u16(&raw[0..2]),
        halfwidth: raw[2] != 0,
        tex_col: raw[4],
        tex_row: raw[5],
        glyph_x: raw[6],
        glyph_width: raw[7],
    })
}

fn decode_font<B: ByteOrder>(
    bytes: &[u8],
    offset: usize,
    origin: usize,
    layout: &Layout,
) -> Result<Font, FontmapError> {
    // the whole struct must be in bounds before reading its fields
    field(bytes, offset, layout.font_len())?;
    let metrics = field(bytes, offset + 4, 7)?;
    let chars_count = read_int::<B>(bytes, offset + 20)? as usize;
    let chars_at = offset_from(origin, read_pointer::<B>(bytes, offset + 24, layout.pointer_size)?)?;

    let chars = (0..chars_count)
        .map(|i| {
            let at = i
                .checked_mul(CHAR_LEN)
                .ok_or(FontmapError::Truncated { offset: chars_at })?;
            decode_char(bytes, offset_from(chars_at, at)?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Font {
        id: read_int::<B>(bytes, offset)?,
        advance_width: metrics[0],
        line_height: metrics[1],
        box_width: metrics[2],
        box_height: metrics[3],
        layout_param_1: metrics[4],
        layout_param_2_numerator: metrics[5],
        layout_param_2_denominator: metrics[6],
        other_params: read_int::<B>(bytes, offset + 12)?,
        tex_size_chars: read_int::<B>(bytes, offset + 16)?,
        chars,
    })
}

/// Decode the FMH3 that starts at `start` in `bytes`.
pub(crate) fn decode<B: ByteOrder>(bytes: &[u8], start: usize, layout: &Layout) -> Result<Vec<Font>, FontmapError> {
    let signature = field(bytes, start, 4)?;
    if signature != SIGNATURE {
        return Err(FontmapError::UnrecognizedSignature {
            signature: String::from_utf8_lossy(signature).into_owned(),
        });
    }
    let origin = start
        .checked_sub(layout.pointer_base)
        .ok_or(FontmapError::Truncated { offset: start })?;
    let p = layout.pointer_size;

    let count = read_int::<B>(bytes, start + 8)? as usize;
    let table = offset_from(origin, read_pointer::<B>(bytes, start + 8 + p, p)?)?;
    (0..count)
        .map(|i| {
            let slot = i
                .checked_mul(p)
                .ok_or(FontmapError::Truncated { offset: table })?;
            let font_at = offset_from(origin, read_pointer::<B>(bytes, offset_from(table, slot)?, p)?)?;
            decode_font::<B>(bytes, font_at, origin, layout)
        })
        .collect()
}

struct Writer<'l> {
    out: Vec<u8>,
    layout: &'l Layout,
    pointer_fields: Vec<usize>,
}

impl Writer<'_> {
    fn int<B: ByteOrder>(&mut self, at: usize, value: u32) {
        B::write_u32(&mut self.out[at..at + 4], value);
    }

    /// Write a pointer to body position `target` and record the field.
    fn pointer<B: ByteOrder>(&mut self, at: usize, target: usize) -> Result<(), FontmapError> {
        let base = self.layout.pointer_base;
        let value = (target + base) as u64;
        match self.layout.pointer_size {
            8 => B::write_u64(&mut self.out[at..at + 8], value),
            _ => {
                let value = u32::try_from(value).map_err(|_| FontmapError::Overflow { value })?;
                B::write_u32(&mut self.out[at..at + 4], value);
            }
        }
        self.pointer_fields.push(at + base);
        Ok(())
    }
}

/// Lay out and serialize an FMH3, padded to 16 bytes.
pub(crate) fn encode<B: ByteOrder>(fonts: &[Font], layout: &Layout) -> Result<Encoded, FontmapError> {
    let p = layout.pointer_size;
    let table_at = layout.fonts_min_offset - layout.pointer_base;
    let fonts_at = table_at + fonts.len() * p;

    let mut chars_at = Vec::with_capacity(fonts.len());
    let mut pos = round_up(fonts_at + fonts.len() * layout.font_len(), 16);
    for font in fonts {
        chars_at.push(pos);
        pos = round_up(pos + font.chars.len() * CHAR_LEN, 16);
    }

    let mut w = Writer {
        out: vec![0u8; pos],
        layout,
        pointer_fields: Vec::new(),
    };
    w.out[..4].copy_from_slice(SIGNATURE);
    let count = u32::try_from(fonts.len()).map_err(|_| FontmapError::Overflow {
        value: fonts.len() as u64,
    })?;
    w.int::<B>(8, count);
    w.pointer::<B>(8 + p, table_at)?;

    for i in 0..fonts.len() {
        w.pointer::<B>(table_at + i * p, fonts_at + i * layout.font_len())?;
    }

    for (i, font) in fonts.iter().enumerate() {
        let at = fonts_at + i * layout.font_len();
        w.int::<B>(at, font.id);
        w.out[at + 4..at + 11].copy_from_slice(&[
            font.advance_width,
            font.line_height,
            font.box_width,
            font.box_height,
            font.layout_param_1,
            font.layout_param_2_numerator,
            font.layout_param_2_denominator,
        ]);
        w.int::<B>(at + 12, font.other_params);
        w.int::<B>(at + 16, font.tex_size_chars);
        let chars_count = u32::try_from(font.chars.len()).map_err(|_| FontmapError::Overflow {
            value: font.chars.len() as u64,
        })?;
        w.int::<B>(at + 20, chars_count);
        w.pointer::<B>(at + 24, chars_at[i])?;

        for (j, ch) in font.chars.iter().enumerate() {
            let c = chars_at[i] + j * CHAR_LEN;
            LittleEndian::write_u16(&mut w.out[c..c + 2], ch.codepoint);
            w.out[c + 2] = u8::from(ch.halfwidth);
            w.out[c + 4..c + 8].copy_from_slice(&[ch.tex_col, ch.tex_row, ch.glyph_x, ch.glyph_width]);
        }
    }

    Ok(Encoded {
        bytes: w.out,
        pointer_fields: w.pointer_fields,
    })
}
