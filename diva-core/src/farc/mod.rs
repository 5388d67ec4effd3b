//! FARC archives: a table of contents of named blobs with optional gzip
//! compression and AES encryption per entry.
//!
//! Four variants exist, told apart by signature and, for `FARC`, by a
//! format selector in the header:
//!
//! | name      | signature | flags       | compression | cipher |
//! |-----------|-----------|-------------|-------------|--------|
//! | `FArc`    | `FArc`    | none        | none        | none   |
//! | `FArC`    | `FArC`    | none        | forced      | none   |
//! | `FARC`    | `FARC`    | archive     | optional    | ECB    |
//! | `FARC_FT` | `FARC`    | per entry   | optional    | CBC    |

use std::borrow::Cow;
use std::io::{self, Read};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ErrorKind;

mod crypto;
mod read;
mod variant;
mod write;

pub use variant::{check_farc_type, variant_remarks, VARIANT_NAMES};

pub(crate) use variant::Variant;

#[derive(Debug, Error)]
pub enum FarcError {
    #[error("unsupported archive signature {signature:?}")]
    UnsupportedSignature { signature: String },

    #[error("unknown sub-format {format} for {signature} archives")]
    UnsupportedFormat { signature: &'static str, format: u32 },

    #[error("{variant} archives need encryption support, which this build lacks")]
    MissingCrypto { variant: &'static str },

    #[error("writing {variant} archives is not supported")]
    WriteUnsupported { variant: &'static str },

    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(u32),

    #[error("archive is truncated")]
    Truncated,

    #[error("malformed archive: {0}")]
    Malformed(String),

    #[error("cannot inflate entry '{name}': {source}")]
    Inflate {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("cipher error: {0}")]
    Crypto(&'static str),

    #[error("IO error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for FarcError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FarcError::Truncated
        } else {
            FarcError::Io(err)
        }
    }
}

impl FarcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FarcError::UnsupportedSignature { .. }
            | FarcError::UnsupportedFormat { .. }
            | FarcError::MissingCrypto { .. }
            | FarcError::WriteUnsupported { .. } => ErrorKind::Unsupported,
            _ => ErrorKind::Format,
        }
    }
}

/// Archive signature.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FarcKind {
    FArc,
    FArC,
    FARC,
}

impl FarcKind {
    pub fn name(self) -> &'static str {
        match self {
            FarcKind::FArc => "FArc",
            FarcKind::FArC => "FArC",
            FarcKind::FARC => "FARC",
        }
    }

    pub fn signature(self) -> &'static [u8; 4] {
        match self {
            FarcKind::FArc => b"FArc",
            FarcKind::FArC => b"FArC",
            FarcKind::FARC => b"FARC",
        }
    }

    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        [FarcKind::FArc, FarcKind::FArC, FarcKind::FARC]
            .into_iter()
            .find(|kind| bytes.starts_with(kind.signature()))
    }
}

/// Compression and encryption switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub compressed: bool,
    pub encrypted: bool,
}

impl Flags {
    const COMPRESSED: u32 = 0x2;
    const ENCRYPTED: u32 = 0x4;

    pub(crate) fn from_bits(bits: u32) -> Self {
        Flags {
            compressed: bits & Self::COMPRESSED != 0,
            encrypted: bits & Self::ENCRYPTED != 0,
        }
    }

    pub(crate) fn bits(self) -> u32 {
        let mut bits = 0;
        if self.compressed {
            bits |= Self::COMPRESSED;
        }
        if self.encrypted {
            bits |= Self::ENCRYPTED;
        }
        bits
    }
}

/// Per-entry flags. Unset fields inherit the archive's flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFlags {
    pub compressed: Option<bool>,
    pub encrypted: Option<bool>,
}

impl EntryFlags {
    pub(crate) fn resolve(self, archive: Flags) -> Flags {
        Flags {
            compressed: self.compressed.unwrap_or(archive.compressed),
            encrypted: self.encrypted.unwrap_or(archive.encrypted),
        }
    }
}

impl From<Flags> for EntryFlags {
    fn from(flags: Flags) -> Self {
        EntryFlags {
            compressed: Some(flags.compressed),
            encrypted: Some(flags.encrypted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub data: Vec<u8>,
    #[serde(default)]
    pub flags: EntryFlags,
}

/// How encryption IVs are chosen when writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IvMode {
    #[default]
    Random,
    /// All-zero IVs, for reproducible output.
    Zero,
}

impl IvMode {
    pub(crate) fn generate(self) -> [u8; 16] {
        match self {
            IvMode::Random => rand::random(),
            IvMode::Zero => [0; 16],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub iv: IvMode,
}

/// An in-memory archive. Entry order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farc {
    pub kind: FarcKind,
    /// Sub-format of `FARC`: 0 for the ECB variant, 1 for the CBC one.
    #[serde(default)]
    pub format: u32,
    pub alignment: u32,
    /// Archive-level flags. `None` uses the variant's defaults.
    #[serde(default)]
    pub flags: Option<Flags>,
    entries: Vec<Entry>,
}

impl Farc {
    pub fn new(kind: FarcKind) -> Self {
        Farc {
            kind,
            format: 0,
            alignment: 16,
            flags: None,
            entries: Vec::new(),
        }
    }

    /// Parse a variant name as accepted by [`check_farc_type`], including
    /// `FARC_FT`.
    pub fn from_variant_name(name: &str) -> Result<Self, FarcError> {
        let variant = Variant::by_name(name)?;
        let mut farc = Farc::new(variant.kind);
        farc.format = variant.format;
        Ok(farc)
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    pub(crate) fn variant(&self) -> Result<&'static Variant, FarcError> {
        Variant::resolve(self.kind, self.format)
    }

    /// Name of the variant this archive is written as.
    pub fn variant_name(&self) -> Result<&'static str, FarcError> {
        Ok(self.variant()?.name)
    }

    /// Add or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.insert_with_flags(name, data, EntryFlags::default());
    }

    pub fn insert_with_flags(&mut self, name: impl Into<String>, data: Vec<u8>, flags: EntryFlags) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.data = data;
                entry.flags = flags;
            }
            None => self.entries.push(Entry { name, data, flags }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entry(name).map(|entry| entry.data.as_slice())
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        let pos = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(pos))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode without touching `self`; entry data is borrowed until it has
    /// to be transformed.
    pub fn to_bytes(&self, opts: WriteOptions) -> Result<Vec<u8>, FarcError> {
        let staged = self
            .entries
            .iter()
            .map(|entry| write::Staged::new(Cow::Borrowed(entry.name.as_str()), Cow::Borrowed(&entry.data), entry.flags))
            .collect();
        write::encode(self, staged, opts)
    }

    /// Encode, handing the entry buffers to the encoder to transform in
    /// place.
    pub fn into_bytes(mut self, opts: WriteOptions) -> Result<Vec<u8>, FarcError> {
        let entries = std::mem::take(&mut self.entries);
        let staged = entries
            .into_iter()
            .map(|entry| write::Staged::new(Cow::Owned(entry.name), Cow::Owned(entry.data), entry.flags))
            .collect();
        write::encode(&self, staged, opts)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FarcError> {
        read::decode(bytes, None)
    }

    /// Decode only the entries named in `whitelist`. Other entries are not
    /// decrypted or inflated. An empty whitelist decodes everything.
    pub fn from_bytes_filtered(bytes: &[u8], whitelist: &[&str]) -> Result<Self, FarcError> {
        read::decode(bytes, Some(whitelist).filter(|names| !names.is_empty()))
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, FarcError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }
}

/// Pull the named entries out of `bytes`, in archive order.
///
/// Input that is not an archive comes back whole as a single unnamed entry.
pub fn load_entries(bytes: &[u8], names: &[&str]) -> Result<Vec<(Option<String>, Vec<u8>)>, FarcError> {
    if FarcKind::from_signature(bytes).is_none() {
        return Ok(vec![(None, bytes.to_vec())]);
    }
    let farc = Farc::from_bytes_filtered(bytes, names)?;
    Ok(farc
        .entries
        .into_iter()
        .map(|entry| (Some(entry.name), entry.data))
        .collect())
}

pub(crate) fn round_up(value: usize, align: usize) -> usize {
    match value % align {
        0 => value,
        rem => value + align - rem,
    }
}
