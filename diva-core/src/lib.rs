//! Codecs for Project DIVA asset formats: DSC opcode scripts, FARC
//! archives and FMH3 fontmaps.
//!
//! Everything works on in-memory buffers. The opcode table is built once
//! with [`dsc::build_schema_index`] and passed to every script operation.

use thiserror::Error;

pub mod dsc;
pub mod farc;
pub mod fontmap;
pub mod game;
pub mod values;

pub use dsc::{build_schema_index, DscError, DscOp, SchemaIndex, TextOptions};
pub use farc::{Farc, FarcError, FarcKind, WriteOptions};
pub use fontmap::{Fontmap, FontmapError, FontmapKind};
pub use game::Game;
pub use values::ValueError;

/// Broad category of a failure, independent of which codec raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown opcode or parameter, or a parameter list that does not fit.
    Schema,
    /// Malformed text or binary input.
    Format,
    /// A raw value breaks the type the opcode table assigns to it.
    TypeAssumption,
    /// Unknown container signature, missing crypto support, or a
    /// read-only format.
    Unsupported,
}

#[derive(Debug, Error)]
pub enum DivaError {
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Dsc(#[from] DscError),
    #[error(transparent)]
    Farc(#[from] FarcError),
    #[error(transparent)]
    Fontmap(#[from] FontmapError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DivaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DivaError::Value(_) | DivaError::Io(_) => ErrorKind::Format,
            DivaError::Dsc(err) => err.kind(),
            DivaError::Farc(err) => err.kind(),
            DivaError::Fontmap(err) => err.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DivaError>;
