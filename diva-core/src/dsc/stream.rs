//! Whole scripts: the fixed container header, the self-terminating opcode
//! stream, and multi-line text rendering.

use std::io::{Read, Write};

use log::debug;

use super::text::{Tag, TextOptions};
use super::{DscError, DscOp, SchemaIndex};
use crate::game::Game;

/// Bytes before the first opcode record.
pub const HEADER_LEN: usize = 12;

/// Container header of one title.
#[derive(Debug)]
pub struct ScriptFormat {
    pub game: Game,
    /// Magic values accepted on read.
    pub signatures: &'static [[u8; 4]],
    /// Header written on encode.
    pub header: [u8; HEADER_LEN],
}

static FORMATS: &[ScriptFormat] = &[
    ScriptFormat {
        game: Game::FT,
        signatures: &[[0x17, 0x25, 0x12, 0x15], [0x21, 0x09, 0x05, 0x14]],
        header: [0x17, 0x25, 0x12, 0x15, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    ScriptFormat {
        game: Game::F,
        signatures: &[[0x20, 0x02, 0x02, 0x12]],
        header: [0x20, 0x02, 0x02, 0x12, 0, 0, 0, 0, 0, 0, 0, 0],
    },
];

impl ScriptFormat {
    pub fn all() -> &'static [ScriptFormat] {
        FORMATS
    }

    pub fn for_game(game: Game) -> Result<&'static ScriptFormat, DscError> {
        FORMATS
            .iter()
            .find(|format| format.game == game)
            .ok_or(DscError::UnsupportedGame(game))
    }

    fn matches(&self, magic: &[u8]) -> bool {
        self.signatures.iter().any(|sig| magic.starts_with(sig))
    }
}

/// Identify the title of a binary script from its magic.
pub fn detect_game(bytes: &[u8]) -> Result<Game, DscError> {
    FORMATS
        .iter()
        .find(|format| bytes.len() >= 4 && format.matches(&bytes[..4]))
        .map(|format| format.game)
        .ok_or(DscError::UnrecognizedFormat)
}

/// Read a header and then opcodes up to and including `END`.
///
/// With `game` set the magic is not checked, only skipped.
pub fn read_stream<R: Read>(
    index: &SchemaIndex,
    game: Option<Game>,
    reader: &mut R,
) -> Result<Vec<DscOp>, DscError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;
    let game = match game {
        Some(game) => ScriptFormat::for_game(game)?.game,
        None => detect_game(&header)?,
    };
    debug!("reading {game} script");

    let mut ops = Vec::new();
    loop {
        let op = DscOp::read(index, game, reader)?;
        let end = op.is_end();
        ops.push(op);
        if end {
            break;
        }
    }
    debug!("read {} opcodes", ops.len());
    Ok(ops)
}

pub fn decode_stream(
    index: &SchemaIndex,
    bytes: &[u8],
    game: Option<Game>,
) -> Result<Vec<DscOp>, DscError> {
    let mut reader = bytes;
    read_stream(index, game, &mut reader)
}

/// Write the canonical header of the script's title and every opcode.
///
/// All opcodes must belong to the same title.
pub fn write_stream<W: Write>(ops: &[DscOp], writer: &mut W) -> Result<(), DscError> {
    let first = ops.first().ok_or(DscError::EmptyScript)?;
    let format = ScriptFormat::for_game(first.game)?;
    if let Some(op) = ops.iter().find(|op| op.game != first.game) {
        return Err(DscError::MixedGames {
            expected: first.game,
            found: op.game,
        });
    }

    writer.write_all(&format.header)?;
    for op in ops {
        op.write(writer)?;
    }
    Ok(())
}

pub fn encode_stream(ops: &[DscOp]) -> Result<Vec<u8>, DscError> {
    let len = HEADER_LEN + ops.iter().map(|op| op.layout().byte_len()).sum::<usize>();
    let mut out = Vec::with_capacity(len);
    write_stream(ops, &mut out)?;
    Ok(out)
}

const INDENT: &str = "  ";

/// Tracks which branch the following opcodes run in.
#[derive(Default)]
struct BranchScope {
    restricted: bool,
}

impl BranchScope {
    /// Indent depth for `op`, updating the scope first.
    fn depth(&mut self, op: &DscOp) -> usize {
        match op.name {
            "TIME" => {
                self.restricted = false;
                0
            }
            "PV_BRANCH_MODE" => {
                self.restricted = op.params.first().map_or(false, |mode| mode.raw() != 0);
                0
            }
            _ if self.restricted => 2,
            _ => 1,
        }
    }
}

/// Render a script as text, one `NAME(...);` per line.
///
/// `compat` writes raw `i` values with no indentation; otherwise the human
/// form is used and `indent` nests opcodes under `TIME` and branch scopes.
pub fn render_annotated(ops: &[DscOp], compat: bool, indent: bool) -> (String, Vec<Tag>) {
    let opts = if compat {
        TextOptions::compat()
    } else {
        TextOptions::human()
    };
    let indent = indent && !compat;

    let mut out = String::new();
    let mut tags = Vec::new();
    let mut scope = BranchScope::default();
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let depth = scope.depth(op);
        if indent {
            for _ in 0..depth {
                out.push_str(INDENT);
            }
        }

        let (text, op_tags) = op.to_annotated_text(opts);
        let offset = out.len();
        tags.extend(op_tags.into_iter().map(|tag| tag.shifted(offset)));
        out.push_str(&text);
        out.push(';');
    }
    (out, tags)
}

pub fn render_text(ops: &[DscOp], compat: bool, indent: bool) -> String {
    render_annotated(ops, compat, indent).0
}

/// Parse a text script.
///
/// Opcodes are separated by `;` or newlines. Blank lines and lines starting
/// with `#` or `//` are skipped. Errors carry the 1-based line number.
pub fn parse_script(index: &SchemaIndex, game: Game, text: &str) -> Result<Vec<DscOp>, DscError> {
    let mut ops = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        for statement in line.split(';').filter(|s| !s.trim().is_empty()) {
            let op = DscOp::from_text(index, game, statement).map_err(|source| DscError::Line {
                line: line_no + 1,
                source: Box::new(source),
            })?;
            ops.push(op);
        }
    }
    Ok(ops)
}
