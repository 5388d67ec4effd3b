use std::borrow::Cow;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use flate2::{Compression as GzLevel, GzBuilder};
use log::debug;

use super::crypto::{self, BLOCK};
use super::variant::{Cipher, Compression};
use super::{round_up, EntryFlags, Farc, FarcError, Flags, Variant, WriteOptions};

/// Fixed gzip timestamp so output is reproducible.
const GZIP_MTIME: u32 = 39;

/// An entry on its way into the archive.
pub(crate) struct Staged<'a> {
    name: Cow<'a, str>,
    data: Cow<'a, [u8]>,
    requested: EntryFlags,
    flags: Flags,
    compressed_size: usize,
    uncompressed_size: usize,
    pointer: usize,
}

impl<'a> Staged<'a> {
    pub(crate) fn new(name: Cow<'a, str>, data: Cow<'a, [u8]>, requested: EntryFlags) -> Self {
        let len = data.len();
        Staged {
            name,
            data,
            requested,
            flags: Flags::default(),
            compressed_size: len,
            uncompressed_size: len,
            pointer: 0,
        }
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>, FarcError> {
    let mut encoder = GzBuilder::new()
        .mtime(GZIP_MTIME)
        .write(Vec::with_capacity(data.len() / 2), GzLevel::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Archive flags actually written: the caller's when the variant has
/// flags, else the variant's defaults.
fn archive_flags(farc: &Farc, variant: &Variant) -> Flags {
    let defaults = Flags {
        compressed: variant.compression_forced(),
        encrypted: false,
    };
    match farc.flags {
        Some(flags) if variant.has_flags => flags,
        _ => defaults,
    }
}

fn compress_entries(entries: &mut [Staged<'_>], variant: &Variant) -> Result<(), FarcError> {
    for entry in entries.iter_mut() {
        if variant.compression == Compression::Unsupported {
            entry.flags.compressed = false;
        }
        if entry.flags.compressed {
            let packed = gzip(&entry.data)?;
            if variant.compression_forced() || packed.len() < entry.data.len() {
                entry.data = Cow::Owned(packed);
            } else {
                debug!("{}: compression does not help, storing raw", entry.name);
                entry.flags.compressed = false;
            }
        }
        entry.compressed_size = entry.data.len();
    }
    Ok(())
}

fn encrypt_entries(entries: &mut [Staged<'_>], variant: &Variant, opts: WriteOptions) -> Result<(), FarcError> {
    for entry in entries.iter_mut() {
        let Some(cipher) = variant.cipher else {
            entry.flags.encrypted = false;
            continue;
        };
        if !entry.flags.encrypted {
            continue;
        }
        match cipher {
            Cipher::Ecb => crypto::ecb_encrypt(entry.data.to_mut())?,
            Cipher::Cbc => {
                entry.data = Cow::Owned(crypto::cbc_encrypt(&entry.data, opts.iv.generate())?);
                entry.compressed_size = entry.data.len();
            }
        }
    }
    Ok(())
}

fn toc_len(entries: &[Staged<'_>], variant: &Variant) -> usize {
    entries
        .iter()
        .map(|entry| entry.name.len() + 1 + variant.entry_fields_size)
        .sum()
}

/// Place every entry after the header, each at the next aligned offset.
///
/// Returns the total length.
fn assign_pointers(entries: &mut [Staged<'_>], start: usize, alignment: usize) -> usize {
    let mut pos = start;
    for entry in entries.iter_mut() {
        pos = round_up(pos, alignment);
        entry.pointer = pos;
        pos += entry.data.len();
    }
    pos
}

fn to_u32(value: usize) -> Result<u32, FarcError> {
    u32::try_from(value).map_err(|_| FarcError::Malformed(format!("{value} does not fit in a 32-bit field")))
}

fn serialize(
    entries: &[Staged<'_>],
    variant: &Variant,
    alignment: u32,
    flags: Flags,
    header_size: usize,
    total_len: usize,
) -> Result<Vec<u8>, FarcError> {
    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(variant.kind.signature());
    out.write_u32::<BigEndian>(to_u32(header_size)?)?;
    if variant.has_flags {
        out.write_u32::<BigEndian>(flags.bits())?;
        out.write_u32::<BigEndian>(0)?;
    }
    out.write_u32::<BigEndian>(alignment)?;
    if variant.has_entry_flags {
        out.write_u32::<BigEndian>(variant.format)?;
        out.write_u32::<BigEndian>(to_u32(entries.len())?)?;
        out.write_u32::<BigEndian>(0)?;
    }

    for entry in entries {
        out.extend_from_slice(entry.name.as_bytes());
        out.push(0);
        out.write_u32::<BigEndian>(to_u32(entry.pointer)?)?;
        match variant.compression {
            Compression::Unsupported => out.write_u32::<BigEndian>(to_u32(entry.uncompressed_size)?)?,
            _ => {
                out.write_u32::<BigEndian>(to_u32(entry.compressed_size)?)?;
                out.write_u32::<BigEndian>(to_u32(entry.uncompressed_size)?)?;
            }
        }
        if variant.has_entry_flags {
            out.write_u32::<BigEndian>(entry.flags.bits())?;
        }
    }

    for entry in entries {
        out.resize(entry.pointer, 0);
        out.extend_from_slice(&entry.data);
    }
    Ok(out)
}

/// Encrypt the header from byte 16 on in place and insert the IV before
/// it. `plain` must already leave room for the IV before the first entry.
fn encrypt_header(mut plain: Vec<u8>, header_size: usize, iv: [u8; 16]) -> Result<Vec<u8>, FarcError> {
    let encrypted_len = round_up(header_size.saturating_sub(8), BLOCK);
    let data_start = 2 * BLOCK + encrypted_len;
    if plain.len() < data_start {
        plain.resize(data_start, 0);
    }
    crypto::cbc_encrypt_blocks(&mut plain[BLOCK..BLOCK + encrypted_len], iv)?;

    let mut out = Vec::with_capacity(plain.len());
    out.extend_from_slice(&plain[..BLOCK]);
    out.extend_from_slice(&iv);
    out.extend_from_slice(&plain[BLOCK..BLOCK + encrypted_len]);
    out.extend_from_slice(&plain[data_start..]);
    Ok(out)
}

pub(crate) fn encode(farc: &Farc, mut entries: Vec<Staged<'_>>, opts: WriteOptions) -> Result<Vec<u8>, FarcError> {
    let variant = farc.variant()?;
    if !variant.write_support {
        return Err(FarcError::WriteUnsupported { variant: variant.name });
    }
    if !farc.alignment.is_power_of_two() {
        return Err(FarcError::InvalidAlignment(farc.alignment));
    }
    let alignment = farc.alignment as usize;

    let flags = archive_flags(farc, variant);
    for entry in entries.iter_mut() {
        entry.flags = if variant.has_entry_flags {
            entry.requested.resolve(flags)
        } else {
            flags
        };
    }

    compress_entries(&mut entries, variant)?;
    encrypt_entries(&mut entries, variant, opts)?;

    let header_size = variant.fixed_header_size + toc_len(&entries, variant);
    let mut start = 8 + header_size;
    let encrypt_header_region = flags.encrypted && variant.cipher == Some(Cipher::Cbc);
    if encrypt_header_region {
        start = round_up(start + BLOCK, BLOCK);
    }
    let total_len = assign_pointers(&mut entries, start, alignment);
    debug!(
        "writing {} archive: {} entries, data from {start:#x}, {total_len} bytes",
        variant.name,
        entries.len()
    );

    let out = serialize(&entries, variant, farc.alignment, flags, header_size, total_len)?;
    if encrypt_header_region {
        return encrypt_header(out, header_size, opts.iv.generate());
    }
    Ok(out)
}
