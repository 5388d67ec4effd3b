use std::collections::HashMap;

use log::warn;

use super::op_table::OPCODES;
use super::DscError;
use crate::game::Game;
use crate::values::{ParamKind, ParamValue};

/// Name, type and default of one opcode parameter.
///
/// A parameter without a default is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub desc: &'static str,
    pub kind: ParamKind,
    pub default: Option<i64>,
}

impl ParamSpec {
    pub fn required(&self) -> bool {
        self.default.is_none()
    }

    pub fn default_value(&self) -> Option<ParamValue> {
        self.default
            .and_then(|raw| ParamValue::from_raw(self.kind, raw).ok())
    }
}

/// Binary layout of an opcode for one game.
///
/// `params` is either absent (untyped opcode, every parameter a raw integer)
/// or exactly `param_cnt` long. `None` entries in it are parameters of
/// unknown meaning, read as raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpLayout {
    pub id: i32,
    pub param_cnt: usize,
    pub params: Option<&'static [Option<ParamSpec>]>,
}

impl OpLayout {
    pub fn spec(&self, index: usize) -> Option<&'static ParamSpec> {
        self.params
            .and_then(|params| params.get(index))
            .and_then(|spec| spec.as_ref())
    }

    /// Value type at `index`; unnamed positions are raw integers.
    pub fn kind(&self, index: usize) -> ParamKind {
        self.spec(index).map_or(ParamKind::Int, |spec| spec.kind)
    }

    /// Position of the parameter called `name`, ignoring case.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.params?.iter().position(|spec| {
            spec.map_or(false, |spec| spec.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn byte_len(&self) -> usize {
        4 + 4 * self.param_cnt
    }
}

/// Schema for one opcode name: a default layout plus per-game overrides.
///
/// A layout of `None` (in either place) marks the opcode as unavailable.
#[derive(Debug)]
pub struct OpcodeSchema {
    pub name: &'static str,
    pub desc: Option<&'static str>,
    pub default: Option<OpLayout>,
    pub overrides: &'static [(Game, Option<OpLayout>)],
}

impl OpcodeSchema {
    pub fn layout(&'static self, game: Game) -> Option<&'static OpLayout> {
        match self.overrides.iter().find(|(g, _)| *g == game) {
            Some((_, layout)) => layout.as_ref(),
            None => self.default.as_ref(),
        }
    }
}

pub(super) const fn op(id: i32, param_cnt: usize) -> Option<OpLayout> {
    Some(OpLayout {
        id,
        param_cnt,
        params: None,
    })
}

pub(super) const fn op_with(id: i32, params: &'static [Option<ParamSpec>]) -> Option<OpLayout> {
    Some(OpLayout {
        id,
        param_cnt: params.len(),
        params: Some(params),
    })
}

pub(super) const fn req(name: &'static str, desc: &'static str, kind: ParamKind) -> Option<ParamSpec> {
    Some(ParamSpec {
        name,
        desc,
        kind,
        default: None,
    })
}

pub(super) const fn opt(
    name: &'static str,
    desc: &'static str,
    kind: ParamKind,
    default: i64,
) -> Option<ParamSpec> {
    Some(ParamSpec {
        name,
        desc,
        kind,
        default: Some(default),
    })
}

/// An opcode resolved for a specific game.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub schema: &'static OpcodeSchema,
    pub layout: &'static OpLayout,
}

/// Lookup tables over the opcode schema table.
pub struct SchemaIndex {
    by_name: HashMap<&'static str, &'static OpcodeSchema>,
    by_id: HashMap<i32, HashMap<Game, &'static OpcodeSchema>>,
}

/// Build the name and id indices over the static opcode table.
pub fn build_schema_index() -> SchemaIndex {
    let mut by_name = HashMap::with_capacity(OPCODES.len());
    let mut by_id: HashMap<i32, HashMap<Game, &'static OpcodeSchema>> = HashMap::new();

    for schema in OPCODES {
        by_name.insert(schema.name, schema);

        for game in Game::ALL {
            let Some(layout) = schema.layout(game) else {
                continue;
            };
            if let Some(prev) = by_id.entry(layout.id).or_default().insert(game, schema) {
                warn!(
                    "opcode id {} for {} claimed by both {} and {}",
                    layout.id, game, prev.name, schema.name
                );
            }
        }
    }

    SchemaIndex { by_name, by_id }
}

impl SchemaIndex {
    /// Schema by name, ignoring case.
    pub fn opcode(&self, name: &str) -> Option<&'static OpcodeSchema> {
        self.by_name.get(name.to_uppercase().as_str()).copied()
    }

    /// All schemas, in table order.
    pub fn opcodes(&self) -> impl Iterator<Item = &'static OpcodeSchema> {
        OPCODES.iter()
    }

    pub fn resolve_name(&self, game: Game, name: &str) -> Result<Resolved, DscError> {
        let schema = self.opcode(name).ok_or_else(|| DscError::UnknownOpName {
            name: name.to_string(),
        })?;
        let layout = schema.layout(game).ok_or(DscError::UnsupportedOp {
            game,
            name: schema.name,
        })?;
        Ok(Resolved { schema, layout })
    }

    pub fn resolve_id(&self, game: Game, id: i32) -> Result<Resolved, DscError> {
        let schema = self
            .by_id
            .get(&id)
            .and_then(|games| games.get(&game))
            .ok_or(DscError::UnknownOpId { game, id })?;
        self.resolve_name(game, schema.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_invariants_hold() {
        for schema in OPCODES {
            assert_eq!(schema.name, schema.name.to_uppercase(), "{}", schema.name);
            let layouts = schema
                .overrides
                .iter()
                .filter_map(|(_, l)| l.as_ref())
                .chain(schema.default.as_ref());
            for layout in layouts {
                let Some(params) = layout.params else {
                    continue;
                };
                assert_eq!(params.len(), layout.param_cnt, "{}", schema.name);

                let names: Vec<&str> = params.iter().flatten().map(|p| p.name).collect();
                for (i, name) in names.iter().enumerate() {
                    assert_eq!(*name, name.to_lowercase(), "{}", schema.name);
                    assert!(!names[i + 1..].contains(name), "{}.{}", schema.name, name);
                }
                for spec in params.iter().flatten() {
                    if spec.default.is_some() {
                        assert!(spec.default_value().is_some(), "{}.{}", schema.name, spec.name);
                    }
                }
            }
        }
    }

    #[test]
    fn ids_are_unique_per_game() {
        let mut seen = HashMap::new();
        for schema in OPCODES {
            for game in Game::ALL {
                if let Some(layout) = schema.layout(game) {
                    assert!(
                        seen.insert((game, layout.id), schema.name).is_none(),
                        "{} {} {}",
                        game,
                        layout.id,
                        schema.name
                    );
                }
            }
        }
    }

    #[test]
    fn resolves_by_name_and_id() {
        let index = build_schema_index();
        let r = index.resolve_name(Game::FT, "hand_scale").unwrap();
        assert_eq!(r.schema.name, "HAND_SCALE");
        assert_eq!(r.layout.id, 87);
        assert_eq!(r.layout.param_cnt, 3);

        let r = index.resolve_id(Game::FT, 87).unwrap();
        assert_eq!(r.schema.name, "HAND_SCALE");
    }

    #[test]
    fn same_id_means_different_opcodes_per_game() {
        let index = build_schema_index();
        assert_eq!(index.resolve_id(Game::FT, 31).unwrap().schema.name, "MOVE_CAMERA");
        assert_eq!(index.resolve_id(Game::X, 31).unwrap().schema.name, "DUMMY");
    }

    #[test]
    fn unsupported_opcodes_are_rejected() {
        let index = build_schema_index();
        assert!(matches!(
            index.resolve_name(Game::F2, "HAND_SCALE"),
            Err(DscError::UnsupportedOp { .. })
        ));
        assert!(matches!(
            index.resolve_name(Game::PDA12, "AIM"),
            Err(DscError::UnsupportedOp { .. })
        ));
        assert!(matches!(
            index.resolve_name(Game::FT, "NOT_AN_OP"),
            Err(DscError::UnknownOpName { .. })
        ));
        assert!(matches!(
            index.resolve_id(Game::FT, 100_000),
            Err(DscError::UnknownOpId { .. })
        ));
    }

    #[test]
    fn overrides_change_layouts() {
        let index = build_schema_index();
        let ft = index.resolve_name(Game::FT, "LYRIC").unwrap().layout;
        let pda = index.resolve_name(Game::PDA12, "LYRIC").unwrap().layout;
        assert_eq!(ft.param_cnt, 2);
        assert_eq!(pda.param_cnt, 1);
        assert_eq!(ft.spec(1).unwrap().default, Some(-1));
        assert_eq!(ft.position_of("COLOR"), Some(1));
    }
}
