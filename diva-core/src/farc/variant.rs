//! Layout parameters of each archive variant.

use super::{FarcError, FarcKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compression {
    Unsupported,
    Optional,
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cipher {
    /// AES-128-ECB, zero-filled to the block size.
    Ecb,
    /// AES-128-CBC with PKCS7 padding and the IV in front of the data.
    Cbc,
}

#[derive(Debug)]
pub(crate) struct Variant {
    pub name: &'static str,
    pub kind: FarcKind,
    pub format: u32,
    /// Header bytes after the signature and size fields, before the entries.
    pub fixed_header_size: usize,
    /// Bytes per entry besides the name and its terminator.
    pub entry_fields_size: usize,
    pub has_flags: bool,
    pub has_entry_flags: bool,
    pub compression: Compression,
    pub cipher: Option<Cipher>,
    pub write_support: bool,
    pub remarks: &'static str,
}

static VARIANTS: &[Variant] = &[
    Variant {
        name: "FArc",
        kind: FarcKind::FArc,
        format: 0,
        fixed_header_size: 4,
        entry_fields_size: 8,
        has_flags: false,
        has_entry_flags: false,
        compression: Compression::Unsupported,
        cipher: None,
        write_support: true,
        remarks: "Basic uncompressed archive",
    },
    Variant {
        name: "FArC",
        kind: FarcKind::FArC,
        format: 0,
        fixed_header_size: 4,
        entry_fields_size: 12,
        has_flags: false,
        has_entry_flags: false,
        compression: Compression::Forced,
        cipher: None,
        write_support: true,
        remarks: "Basic compressed archive",
    },
    Variant {
        name: "FARC",
        kind: FarcKind::FARC,
        format: 0,
        fixed_header_size: 12,
        entry_fields_size: 12,
        has_flags: true,
        has_entry_flags: false,
        compression: Compression::Optional,
        cipher: Some(Cipher::Ecb),
        write_support: true,
        remarks: "Dreamy Theater style archive with optional compression and encryption",
    },
    Variant {
        name: "FARC_FT",
        kind: FarcKind::FARC,
        format: 1,
        fixed_header_size: 24,
        entry_fields_size: 16,
        has_flags: true,
        has_entry_flags: true,
        compression: Compression::Optional,
        cipher: Some(Cipher::Cbc),
        write_support: true,
        remarks: "Future Tone style archive with per-entry compression and encryption",
    },
];

/// Names accepted by [`check_farc_type`].
pub const VARIANT_NAMES: &[&str] = &["FArc", "FArC", "FARC", "FARC_FT"];

impl Variant {
    pub(crate) fn by_name(name: &str) -> Result<&'static Variant, FarcError> {
        VARIANTS
            .iter()
            .find(|variant| variant.name == name)
            .ok_or_else(|| FarcError::UnsupportedSignature {
                signature: name.to_string(),
            })
    }

    /// `format` only selects between the `FARC` variants.
    pub(crate) fn resolve(kind: FarcKind, format: u32) -> Result<&'static Variant, FarcError> {
        VARIANTS
            .iter()
            .find(|variant| variant.kind == kind && (kind != FarcKind::FARC || variant.format == format))
            .ok_or(FarcError::UnsupportedFormat {
                signature: kind.name(),
                format,
            })
    }

    pub(crate) fn compression_forced(&self) -> bool {
        self.compression == Compression::Forced
    }
}

/// Describe a variant, or fail if it is unknown.
pub fn check_farc_type(name: &str) -> Result<&'static str, FarcError> {
    Variant::by_name(name).map(|variant| variant.remarks)
}

pub fn variant_remarks(name: &str) -> Option<&'static str> {
    check_farc_type(name).ok()
}
