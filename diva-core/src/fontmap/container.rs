//! The `FONM` section container: a header, the FMH3 data, a relocation
//! section and end-of-container markers.

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;

use super::body::{self, Layout};
use super::{reloc, Font, Fontmap, FontmapError, FontmapKind};

const SECTION_HEADER_LEN: usize = 32;
/// Flag word of X sections.
const FLAGS_X: u32 = 0x1000_0000;
/// Flag word of F 2nd sections; bit 3 of its top byte marks big-endian data.
const FLAGS_F2: u32 = 0x1800_0000;
const BIG_ENDIAN_BIT: u8 = 0x08;

fn to_u32(value: usize) -> Result<u32, FontmapError> {
    u32::try_from(value).map_err(|_| FontmapError::Overflow { value: value as u64 })
}

fn write_section_header(
    out: &mut Vec<u8>,
    signature: &[u8; 4],
    section_size: usize,
    flags: u32,
    depth: u32,
    data_size: usize,
) -> Result<(), FontmapError> {
    out.extend_from_slice(signature);
    out.write_u32::<LittleEndian>(to_u32(section_size)?)?;
    out.write_u32::<LittleEndian>(SECTION_HEADER_LEN as u32)?;
    out.write_u32::<LittleEndian>(flags)?;
    out.write_u32::<LittleEndian>(depth)?;
    out.write_u32::<LittleEndian>(to_u32(data_size)?)?;
    out.extend_from_slice(&[0; 8]);
    Ok(())
}

pub(crate) fn encode(kind: FontmapKind, fonts: &[Font]) -> Result<Vec<u8>, FontmapError> {
    let (layout, flags, pof_signature) = match kind {
        FontmapKind::FONM_F2 => (&Layout::FONM_F2, FLAGS_F2, b"POF0"),
        _ => (&Layout::FONM, FLAGS_X, b"POF1"),
    };
    let encoded = match kind {
        FontmapKind::FONM_F2 => body::encode::<BigEndian>(fonts, layout)?,
        _ => body::encode::<LittleEndian>(fonts, layout)?,
    };
    let units = reloc::to_units(&encoded.pointer_fields, layout.pointer_size)?;
    let pof = reloc::encode_offsets(&units)?;
    debug!(
        "fontmap: {} bytes of data, {} relocations",
        encoded.bytes.len(),
        units.len()
    );

    let data_size = encoded.bytes.len();
    let section_size = data_size + SECTION_HEADER_LEN + pof.len() + SECTION_HEADER_LEN;
    let mut out = Vec::with_capacity(SECTION_HEADER_LEN + section_size + SECTION_HEADER_LEN);

    write_section_header(&mut out, b"FONM", section_size, flags, 0, data_size)?;
    out.extend_from_slice(&encoded.bytes);
    write_section_header(&mut out, pof_signature, pof.len(), flags, 1, pof.len())?;
    out.extend_from_slice(&pof);
    write_section_header(&mut out, b"EOFC", 0, flags, 1, 0)?;
    write_section_header(&mut out, b"EOFC", 0, flags, 0, 0)?;
    Ok(out)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Fontmap, FontmapError> {
    let header = bytes
        .get(..SECTION_HEADER_LEN)
        .ok_or(FontmapError::Truncated { offset: 0 })?;
    let data_pointer = LittleEndian::read_u32(&header[8..12]) as usize;

    if header[15] & BIG_ENDIAN_BIT != 0 {
        debug!("fontmap: big-endian FONM");
        let layout = Layout {
            pointer_base: data_pointer,
            ..Layout::FONM_F2
        };
        Ok(Fontmap {
            kind: FontmapKind::FONM_F2,
            fonts: body::decode::<BigEndian>(bytes, data_pointer, &layout)?,
        })
    } else {
        Ok(Fontmap {
            kind: FontmapKind::FONM,
            fonts: body::decode::<LittleEndian>(bytes, data_pointer, &Layout::FONM)?,
        })
    }
}
