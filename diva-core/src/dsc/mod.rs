//! DSC scripts: the opcode schema table, the per-opcode binary and text
//! codecs, and the script stream container.

use std::io;

use thiserror::Error;

use crate::game::Game;
use crate::values::ValueError;
use crate::ErrorKind;

mod op;
mod op_table;
mod schema;
mod stream;
mod text;

pub use op::{DscOp, ParamArg};
pub use schema::{build_schema_index, OpLayout, OpcodeSchema, ParamSpec, Resolved, SchemaIndex};
pub use stream::{
    decode_stream, detect_game, encode_stream, parse_script, read_stream, render_annotated,
    render_text, write_stream, ScriptFormat, HEADER_LEN,
};
pub use text::{annotate, Tag, TagKind, TextOptions};

/// Errors from resolving, decoding, encoding or parsing opcodes.
#[derive(Debug, Error)]
pub enum DscError {
    #[error("unknown opcode name '{name}'")]
    UnknownOpName { name: String },

    #[error("unknown opcode id {id} for game {game}")]
    UnknownOpId { game: Game, id: i32 },

    #[error("opcode {name} is not valid for game {game}")]
    UnsupportedOp { game: Game, name: &'static str },

    #[error("duplicate parameter '{name}' for {op}")]
    DuplicateParameter { op: &'static str, name: String },

    #[error("unknown parameter name '{name}' for {op}")]
    UnknownParameter { op: &'static str, name: String },

    #[error("missing required parameter {name} for {op}")]
    MissingParameter { op: &'static str, name: &'static str },

    #[error("too many parameters for {op}: expected {expected}, got {got}")]
    TooManyParameters {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("bad opcode format '{text}'")]
    BadFormat { text: String },

    #[error("cannot convert parameter {index} of {op}: {source}")]
    InvalidValue {
        op: &'static str,
        index: usize,
        #[source]
        source: ValueError,
    },

    #[error("parameter {index} of {op} breaks its type assumption: {source}")]
    TypeAssumption {
        op: &'static str,
        index: usize,
        #[source]
        source: ValueError,
    },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DscError>,
    },

    #[error("unrecognized script format")]
    UnrecognizedFormat,

    #[error("no script container format for game {0}")]
    UnsupportedGame(Game),

    #[error("cannot encode an empty script")]
    EmptyScript,

    #[error("script mixes games {expected} and {found}")]
    MixedGames { expected: Game, found: Game },

    #[error("script ended before the END opcode")]
    Truncated,

    #[error("IO error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for DscError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DscError::Truncated
        } else {
            DscError::Io(err)
        }
    }
}

impl DscError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DscError::UnknownOpName { .. }
            | DscError::UnknownOpId { .. }
            | DscError::UnsupportedOp { .. }
            | DscError::DuplicateParameter { .. }
            | DscError::UnknownParameter { .. }
            | DscError::MissingParameter { .. }
            | DscError::TooManyParameters { .. } => ErrorKind::Schema,
            DscError::TypeAssumption { .. } => ErrorKind::TypeAssumption,
            DscError::UnsupportedGame(_) => ErrorKind::Unsupported,
            DscError::Line { source, .. } => source.kind(),
            _ => ErrorKind::Format,
        }
    }
}
