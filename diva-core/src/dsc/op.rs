use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::schema::{OpLayout, ParamSpec, Resolved, SchemaIndex};
use super::DscError;
use crate::game::Game;
use crate::values::{parse_int, ParamKind, ParamValue, ValueError};

/// One decoded opcode: id, name and typed parameters for a game.
#[derive(Debug, Clone, PartialEq)]
pub struct DscOp {
    pub game: Game,
    pub name: &'static str,
    pub id: i32,
    pub params: Vec<ParamValue>,
    layout: &'static OpLayout,
}

/// A parameter handed to [`DscOp::from_name`] / [`DscOp::from_id`].
///
/// Values are coerced to the parameter's type; text goes through the same
/// conversion as the script text format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamArg<'a> {
    Value(ParamValue),
    Text(&'a str),
}

impl From<i64> for ParamArg<'_> {
    fn from(value: i64) -> Self {
        ParamArg::Value(ParamValue::Int(value))
    }
}

impl From<i32> for ParamArg<'_> {
    fn from(value: i32) -> Self {
        ParamArg::Value(ParamValue::Int(i64::from(value)))
    }
}

impl From<bool> for ParamArg<'_> {
    fn from(value: bool) -> Self {
        ParamArg::Value(ParamValue::Bool(value))
    }
}

impl From<ParamValue> for ParamArg<'_> {
    fn from(value: ParamValue) -> Self {
        ParamArg::Value(value)
    }
}

impl<'a> From<&'a str> for ParamArg<'a> {
    fn from(value: &'a str) -> Self {
        ParamArg::Text(value)
    }
}

impl ParamArg<'_> {
    fn resolve(&self, kind: ParamKind) -> Result<ParamValue, ValueError> {
        match self {
            ParamArg::Value(value) => value.coerce(kind),
            ParamArg::Text(text) => parse_param_text(kind, text),
        }
    }
}

/// Convert one argument of the text format.
///
/// `i<N>` is tried first as a raw integer; if that does not give a valid
/// value the text is parsed as `kind`'s natural form instead.
pub(crate) fn parse_param_text(kind: ParamKind, text: &str) -> Result<ParamValue, ValueError> {
    let text = text.trim();
    let escaped = text
        .strip_prefix('i')
        .and_then(|digits| parse_int(digits).ok())
        .map(|raw| ParamValue::from_raw(kind, raw));

    match escaped {
        Some(Ok(value)) => Ok(value),
        Some(Err(escape_err)) => ParamValue::parse(kind, text).map_err(|_| escape_err),
        None => ParamValue::parse(kind, text),
    }
}

impl DscOp {
    /// Build an opcode from already-typed parameters.
    ///
    /// The parameter list must match the layout exactly.
    pub(crate) fn from_parts(game: Game, resolved: Resolved, params: Vec<ParamValue>) -> Self {
        debug_assert_eq!(params.len(), resolved.layout.param_cnt);
        DscOp {
            game,
            name: resolved.schema.name,
            id: resolved.layout.id,
            params,
            layout: resolved.layout,
        }
    }

    pub fn from_name(
        index: &SchemaIndex,
        game: Game,
        name: &str,
        args: &[ParamArg<'_>],
    ) -> Result<Self, DscError> {
        let resolved = index.resolve_name(game, name)?;
        Self::from_args(game, resolved, args)
    }

    pub fn from_id(
        index: &SchemaIndex,
        game: Game,
        id: i32,
        args: &[ParamArg<'_>],
    ) -> Result<Self, DscError> {
        let resolved = index.resolve_id(game, id)?;
        Self::from_args(game, resolved, args)
    }

    /// Missing trailing arguments take their defaults; unnamed positions
    /// default to 0.
    fn from_args(game: Game, resolved: Resolved, args: &[ParamArg<'_>]) -> Result<Self, DscError> {
        let layout = resolved.layout;
        let op = resolved.schema.name;
        if args.len() > layout.param_cnt {
            return Err(DscError::TooManyParameters {
                op,
                expected: layout.param_cnt,
                got: args.len(),
            });
        }

        let mut params = Vec::with_capacity(layout.param_cnt);
        for index in 0..layout.param_cnt {
            let value = match args.get(index) {
                Some(arg) => arg
                    .resolve(layout.kind(index))
                    .map_err(|source| DscError::InvalidValue { op, index, source })?,
                None => default_for(op, layout.spec(index))?,
            };
            params.push(value);
        }

        Ok(Self::from_parts(game, resolved, params))
    }

    pub fn layout(&self) -> &'static OpLayout {
        self.layout
    }

    /// Parameter specs, if the opcode is typed.
    pub fn param_info(&self) -> Option<&'static [Option<ParamSpec>]> {
        self.layout.params
    }

    /// Parameter value by spec name, ignoring case.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.layout
            .position_of(name)
            .and_then(|index| self.params.get(index))
    }

    pub fn is_end(&self) -> bool {
        self.id == 0
    }

    /// Decode one opcode record.
    pub fn read<R: Read>(index: &SchemaIndex, game: Game, reader: &mut R) -> Result<Self, DscError> {
        let id = reader.read_i32::<LittleEndian>()?;
        let resolved = index.resolve_id(game, id)?;
        let layout = resolved.layout;

        let mut params = Vec::with_capacity(layout.param_cnt);
        for i in 0..layout.param_cnt {
            let mut field = [0u8; 4];
            reader.read_exact(&mut field)?;
            let value = ParamValue::from_le_bytes(layout.kind(i), field).map_err(|source| {
                DscError::TypeAssumption {
                    op: resolved.schema.name,
                    index: i,
                    source,
                }
            })?;
            params.push(value);
        }

        Ok(Self::from_parts(game, resolved, params))
    }

    pub fn from_bytes(index: &SchemaIndex, game: Game, mut bytes: &[u8]) -> Result<Self, DscError> {
        Self::read(index, game, &mut bytes)
    }

    /// Encode as `4 + 4 * param_cnt` little-endian bytes.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), DscError> {
        writer.write_i32::<LittleEndian>(self.id)?;
        for (index, value) in self.params.iter().enumerate() {
            let field = value.to_le_bytes().map_err(|source| DscError::InvalidValue {
                op: self.name,
                index,
                source,
            })?;
            writer.write_all(&field)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DscError> {
        let mut out = Vec::with_capacity(self.layout.byte_len());
        self.write(&mut out)?;
        Ok(out)
    }
}

/// Value used for a parameter that was not supplied.
pub(crate) fn default_for(op: &'static str, spec: Option<&ParamSpec>) -> Result<ParamValue, DscError> {
    match spec {
        None => Ok(ParamValue::Int(0)),
        Some(spec) => spec
            .default_value()
            .ok_or(DscError::MissingParameter { op, name: spec.name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsc::build_schema_index;
    use crate::values::{DivaTime, RawInt};

    #[test]
    fn from_id_fills_defaults() {
        let index = build_schema_index();
        let op = DscOp::from_id(&index, Game::FT, 24, &[1.into()]).unwrap();
        assert_eq!(op.name, "LYRIC");
        assert_eq!(op.params, vec![ParamValue::Int(1), ParamValue::Int(-1)]);
    }

    #[test]
    fn from_id_converts_types() {
        let index = build_schema_index();
        let op = DscOp::from_id(&index, Game::FT, 87, &[0.into(), "right".into(), 1000.into()])
            .unwrap();
        assert_eq!(op.name, "HAND_SCALE");
        match op.params[1] {
            ParamValue::Enum(hand) => {
                assert_eq!(hand, 1i64);
                assert_eq!(hand, "right");
            }
            other => panic!("expected enum, got {other:?}"),
        }
        match op.params[2] {
            ParamValue::Scaled(scale) => assert_eq!(scale.raw(), 1000),
            other => panic!("expected scaled int, got {other:?}"),
        }
    }

    #[test]
    fn bool_params_accept_text_and_ints() {
        let index = build_schema_index();
        for (arg, expected) in [
            (ParamArg::from(true), true),
            (ParamArg::from(1), true),
            (ParamArg::from("t"), true),
            (ParamArg::from("TRUE"), true),
            (ParamArg::from(false), false),
            (ParamArg::from(0), false),
            (ParamArg::from("f"), false),
            (ParamArg::from("false"), false),
        ] {
            let op = DscOp::from_name(&index, Game::FT, "MIKU_DISP", &[0.into(), arg]).unwrap();
            assert_eq!(op.params[1], ParamValue::Bool(expected));
        }
    }

    #[test]
    fn missing_required_and_extra_args_fail() {
        let index = build_schema_index();
        assert!(matches!(
            DscOp::from_name(&index, Game::FT, "HAND_SCALE", &[0.into()]),
            Err(DscError::MissingParameter { name: "hand", .. })
        ));
        assert!(matches!(
            DscOp::from_name(&index, Game::FT, "END", &[0.into()]),
            Err(DscError::TooManyParameters { .. })
        ));
    }

    #[test]
    fn binary_round_trip() {
        let index = build_schema_index();
        let op = DscOp::from_name(&index, Game::FT, "TIME", &["1:02.5".into()]).unwrap();
        assert_eq!(op.params[0], ParamValue::Time(DivaTime(6_250_000)));

        let bytes = op.to_bytes().unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(DscOp::from_bytes(&index, Game::FT, &bytes).unwrap(), op);
    }

    #[test]
    fn bool_fields_above_one_are_rejected() {
        let index = build_schema_index();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4i32.to_le_bytes());
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&2i32.to_le_bytes());
        let err = DscOp::from_bytes(&index, Game::FT, &bytes).unwrap_err();
        assert!(matches!(err, DscError::TypeAssumption { index: 1, .. }));
        assert_eq!(err.kind(), crate::ErrorKind::TypeAssumption);
    }

    #[test]
    fn truncated_records_fail() {
        let index = build_schema_index();
        let bytes = [1u8, 0, 0, 0, 5, 0];
        assert!(matches!(
            DscOp::from_bytes(&index, Game::FT, &bytes),
            Err(DscError::Truncated)
        ));
    }

    #[test]
    fn int_escape_falls_back_to_enum_names() {
        const WORDS: &[&str] = &["in", "i2", "out"];
        let kind = ParamKind::Enum(WORDS);
        assert_eq!(parse_param_text(kind, "i2").unwrap().raw(), 2);
        assert_eq!(parse_param_text(kind, "in").unwrap().raw(), 0);
        assert!(parse_param_text(kind, "i7").is_err());
    }

    #[test]
    fn every_layout_round_trips() {
        let index = build_schema_index();
        for schema in index.opcodes() {
            for game in Game::ALL {
                let Some(layout) = schema.layout(game) else {
                    continue;
                };
                let params = (0..layout.param_cnt)
                    .map(|i| {
                        let raw = match layout.kind(i) {
                            ParamKind::Bool => 1,
                            ParamKind::Enum(choices) => choices.len() as i64 - 1,
                            _ => i as i64 * 7 - 3,
                        };
                        ParamValue::from_raw(layout.kind(i), raw).unwrap()
                    })
                    .collect();
                let resolved = index.resolve_name(game, schema.name).unwrap();
                let op = DscOp::from_parts(game, resolved, params);
                let bytes = op.to_bytes().unwrap();
                assert_eq!(bytes.len(), layout.byte_len());
                assert_eq!(DscOp::from_bytes(&index, game, &bytes).unwrap(), op);
            }
        }
    }
}
