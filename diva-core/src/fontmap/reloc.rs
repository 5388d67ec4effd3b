//! `POF0`/`POF1` relocation tables.
//!
//! A table lists every pointer field in a section so a loader can rebase
//! them. Offsets are counted in pointer-size units and stored as deltas
//! from the previous offset, each in the shortest of three forms:
//!
//! - `01dddddd`: delta up to `0x3f`
//! - `10dddddd dddddddd`: delta up to `0x3ff`
//! - `11dddddd` and three more bytes: anything larger
//!
//! The deltas are preceded by the table length (including itself) as a
//! little-endian `u32`, and the table is zero-padded to 16 bytes.

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use super::FontmapError;
use crate::farc::round_up;

const MAX_DELTA: usize = 0x3fff_ffff;

/// Convert pointer field positions to pointer-size units.
pub fn to_units(positions: &[usize], pointer_size: usize) -> Result<Vec<usize>, FontmapError> {
    positions
        .iter()
        .map(|&offset| {
            if offset % pointer_size != 0 {
                return Err(FontmapError::MisalignedPointer {
                    offset,
                    size: pointer_size,
                });
            }
            Ok(offset / pointer_size)
        })
        .collect()
}

/// Encode ascending `offsets` (in pointer units) as a relocation table.
pub fn encode_offsets(offsets: &[usize]) -> Result<Vec<u8>, FontmapError> {
    let mut sorted = offsets.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut deltas = Vec::new();
    let mut prev = 0;
    for offset in sorted {
        let delta = offset - prev;
        prev = offset;
        if delta > MAX_DELTA {
            return Err(FontmapError::Overflow { value: delta as u64 });
        } else if delta > 0x3ff {
            deltas.write_u32::<BigEndian>(0xC000_0000 | delta as u32)?;
        } else if delta > 0x3f {
            deltas.write_u16::<BigEndian>(0x8000 | delta as u16)?;
        } else {
            deltas.push(0x40 | delta as u8);
        }
    }

    let mut out = Vec::with_capacity(round_up(deltas.len() + 4, 16));
    out.write_u32::<LittleEndian>((deltas.len() + 4) as u32)?;
    out.extend_from_slice(&deltas);
    out.resize(round_up(out.len(), 16), 0);
    Ok(out)
}

/// Decode a relocation table back to absolute offsets in pointer units.
pub fn decode_offsets(table: &[u8]) -> Result<Vec<usize>, FontmapError> {
    let len_field = table.get(..4).ok_or(FontmapError::Truncated { offset: 0 })?;
    let len = LittleEndian::read_u32(len_field) as usize;
    let body = table.get(4..len).ok_or(FontmapError::Truncated { offset: len })?;

    let mut offsets = Vec::new();
    let mut prev = 0;
    let mut pos = 0;
    while let Some(&first) = body.get(pos) {
        let (delta, width) = match first >> 6 {
            1 => (usize::from(first & 0x3f), 1),
            2 => {
                let raw = body.get(pos..pos + 2).ok_or(FontmapError::Truncated { offset: 4 + pos })?;
                (usize::from(BigEndian::read_u16(raw) & 0x3fff), 2)
            }
            3 => {
                let raw = body.get(pos..pos + 4).ok_or(FontmapError::Truncated { offset: 4 + pos })?;
                ((BigEndian::read_u32(raw) & 0x3fff_ffff) as usize, 4)
            }
            _ => break,
        };
        prev += delta;
        offsets.push(prev);
        pos += width;
    }
    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_shortest_form() {
        let table = encode_offsets(&[3, 4, 0x44, 0x1000]).unwrap();
        assert_eq!(
            &table[..12],
            &[12, 0, 0, 0, 0x43, 0x41, 0x80, 0x40, 0xC0, 0x00, 0x0F, 0xBC]
        );
        assert_eq!(table.len(), 16);
        assert!(table[12..].iter().all(|&b| b == 0));
        assert_eq!(decode_offsets(&table).unwrap(), vec![3, 4, 0x44, 0x1000]);
    }

    #[test]
    fn empty_table() {
        let table = encode_offsets(&[]).unwrap();
        assert_eq!(table, {
            let mut expected = vec![4, 0, 0, 0];
            expected.resize(16, 0);
            expected
        });
        assert!(decode_offsets(&table).unwrap().is_empty());
    }

    #[test]
    fn units_must_be_aligned() {
        assert_eq!(to_units(&[16, 32], 8).unwrap(), vec![2, 4]);
        assert!(matches!(
            to_units(&[12], 8),
            Err(FontmapError::MisalignedPointer { offset: 12, size: 8 })
        ));
    }
}
