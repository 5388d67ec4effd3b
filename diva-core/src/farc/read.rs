use std::borrow::Cow;
use std::io::{BufRead, Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use log::debug;

use super::crypto::{self, BLOCK};
use super::variant::Cipher;
use super::{round_up, Entry, EntryFlags, Farc, FarcError, FarcKind, Flags, Variant};

/// One table-of-contents record.
struct TocEntry {
    name: String,
    pointer: usize,
    compressed_size: usize,
    uncompressed_size: usize,
    flags: Option<Flags>,
}

struct Toc {
    variant: &'static Variant,
    alignment: u32,
    flags: Option<Flags>,
    entries: Vec<TocEntry>,
}

fn be_u32(bytes: &[u8], offset: usize) -> Result<u32, FarcError> {
    let field = bytes.get(offset..offset + 4).ok_or(FarcError::Truncated)?;
    Ok(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}

/// `FARC_FT` headers may be encrypted from byte 16 on. Such headers have an
/// IV where the alignment would be, which is almost never a power of two.
fn header_is_encrypted(bytes: &[u8]) -> Result<bool, FarcError> {
    let flags = Flags::from_bits(be_u32(bytes, 8)?);
    let alignment = be_u32(bytes, 16)?;
    Ok(flags.encrypted && !alignment.is_power_of_two())
}

/// Decrypt the header region, returning the plain header bytes.
fn decrypt_header(bytes: &[u8], header_size: usize) -> Result<Vec<u8>, FarcError> {
    let encrypted_len = round_up(header_size.saturating_sub(8), BLOCK);
    let end = 2 * BLOCK + encrypted_len;
    if bytes.len() < end {
        return Err(FarcError::Truncated);
    }
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&bytes[BLOCK..2 * BLOCK]);

    let mut header = Vec::with_capacity(BLOCK + encrypted_len);
    header.extend_from_slice(&bytes[..BLOCK]);
    header.extend_from_slice(&bytes[2 * BLOCK..end]);
    crypto::cbc_decrypt_blocks(&mut header[BLOCK..], iv)?;
    Ok(header)
}

fn read_name(cur: &mut Cursor<&[u8]>) -> Result<String, FarcError> {
    let mut name = Vec::new();
    cur.read_until(0, &mut name)?;
    if name.pop() != Some(0) {
        return Err(FarcError::Truncated);
    }
    String::from_utf8(name).map_err(|err| FarcError::Malformed(format!("entry name is not UTF-8: {err}")))
}

fn parse_toc(header: &[u8], variant: &'static Variant) -> Result<Toc, FarcError> {
    let mut cur = Cursor::new(header);
    cur.set_position(4);
    let header_size = cur.read_u32::<BigEndian>()? as u64;
    let toc_end = 8 + header_size;

    let flags = if variant.has_flags {
        let flags = Flags::from_bits(cur.read_u32::<BigEndian>()?);
        let _padding = cur.read_u32::<BigEndian>()?;
        Some(flags)
    } else {
        None
    };
    let alignment = cur.read_u32::<BigEndian>()?;

    let entry_count = if variant.has_entry_flags {
        let _format = cur.read_u32::<BigEndian>()?;
        let count = cur.read_u32::<BigEndian>()?;
        let _unknown = cur.read_u32::<BigEndian>()?;
        Some(count as usize)
    } else {
        None
    };

    let mut entries = Vec::new();
    loop {
        match entry_count {
            Some(count) if entries.len() >= count => break,
            None if cur.position() >= toc_end => break,
            _ => {}
        }

        let name = read_name(&mut cur)?;
        let pointer = cur.read_u32::<BigEndian>()? as usize;
        let compressed_size = cur.read_u32::<BigEndian>()? as usize;
        let uncompressed_size = if variant.entry_fields_size > 8 {
            cur.read_u32::<BigEndian>()? as usize
        } else {
            compressed_size
        };
        let entry_flags = if variant.has_entry_flags {
            Some(Flags::from_bits(cur.read_u32::<BigEndian>()?))
        } else {
            None
        };

        entries.push(TocEntry {
            name,
            pointer,
            compressed_size,
            uncompressed_size,
            flags: entry_flags.or(flags),
        });
    }

    Ok(Toc {
        variant,
        alignment,
        flags,
        entries,
    })
}

fn inflate(name: &str, data: &[u8], size_hint: usize) -> Result<Vec<u8>, FarcError> {
    let mut out = Vec::with_capacity(size_hint);
    GzDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|source| FarcError::Inflate {
            name: name.to_string(),
            source,
        })?;
    Ok(out)
}

/// Undo encryption then compression for one entry.
fn extract(bytes: &[u8], toc: &Toc, entry: &TocEntry) -> Result<Vec<u8>, FarcError> {
    let variant = toc.variant;
    let flags = entry.flags.unwrap_or_default();
    let encrypted = flags.encrypted && variant.cipher.is_some();

    let stored_len = match variant.cipher {
        Some(Cipher::Ecb) if encrypted => round_up(entry.compressed_size, BLOCK),
        _ => entry.compressed_size,
    };
    let stored = bytes
        .get(entry.pointer..entry.pointer + stored_len)
        .ok_or(FarcError::Truncated)?;

    let mut data: Cow<'_, [u8]> = Cow::Borrowed(stored);
    if encrypted {
        data = Cow::Owned(match variant.cipher {
            Some(Cipher::Ecb) => {
                let mut plain = stored.to_vec();
                crypto::ecb_decrypt(&mut plain)?;
                plain.truncate(entry.compressed_size);
                plain
            }
            _ => crypto::cbc_decrypt(stored)?,
        });
    }

    let compressed = if variant.has_flags {
        flags.compressed
    } else {
        variant.compression_forced()
    };
    if compressed && (variant.compression_forced() || entry.compressed_size != entry.uncompressed_size) {
        return inflate(&entry.name, &data, entry.uncompressed_size);
    }

    let mut data = data.into_owned();
    if encrypted {
        data.truncate(entry.uncompressed_size);
    }
    Ok(data)
}

pub(crate) fn decode(bytes: &[u8], whitelist: Option<&[&str]>) -> Result<Farc, FarcError> {
    if bytes.len() < 8 {
        return Err(FarcError::Truncated);
    }
    let kind = FarcKind::from_signature(bytes).ok_or_else(|| FarcError::UnsupportedSignature {
        signature: String::from_utf8_lossy(&bytes[..4]).into_owned(),
    })?;
    let header_size = be_u32(bytes, 4)? as usize;

    let mut header = Cow::Borrowed(bytes);
    let variant = if kind == FarcKind::FARC {
        if header_is_encrypted(bytes)? {
            debug!("decrypting FARC_FT header");
            header = Cow::Owned(decrypt_header(bytes, header_size)?);
            Variant::resolve(kind, 1)?
        } else {
            let format = if be_u32(bytes, 20).ok() == Some(1) { 1 } else { 0 };
            Variant::resolve(kind, format)?
        }
    } else {
        Variant::resolve(kind, 0)?
    };
    debug!("reading {} archive", variant.name);

    let toc = parse_toc(&header, variant)?;
    let mut farc = Farc::new(kind);
    farc.format = variant.format;
    farc.alignment = toc.alignment;
    farc.flags = toc.flags;

    for entry in &toc.entries {
        if let Some(names) = whitelist {
            if !names.contains(&entry.name.as_str()) {
                continue;
            }
        }
        let data = extract(bytes, &toc, entry)?;
        let flags = if variant.has_entry_flags {
            entry.flags.map(EntryFlags::from).unwrap_or_default()
        } else {
            EntryFlags::default()
        };
        farc.entries.push(Entry {
            name: entry.name.clone(),
            data,
            flags,
        });
    }
    Ok(farc)
}
