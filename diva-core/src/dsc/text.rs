//! Call-like text form of opcodes: `NAME(arg, name=arg, i<raw>, ...)`.
//!
//! [`DscOp::from_text`] is the strict parser. [`annotate`] runs the same
//! tokenizer but records every problem as an `Invalid` tag and keeps going,
//! for live highlighting in an editor. Offsets in tags are byte offsets.

use std::ops::Range;

use super::op::{default_for, parse_param_text};
use super::schema::{OpLayout, SchemaIndex};
use super::{DscError, DscOp};
use crate::game::Game;
use crate::values::ParamValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Op,
    OpName,
    ParamName { index: usize },
    ParamValue { index: usize },
    Invalid { reason: String },
}

/// A highlighted span of opcode text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub start: usize,
    pub end: usize,
    pub kind: TagKind,
}

impl Tag {
    fn new(span: Range<usize>, kind: TagKind) -> Self {
        Tag {
            start: span.start,
            end: span.end,
            kind,
        }
    }

    pub(crate) fn shifted(mut self, by: usize) -> Self {
        self.start += by;
        self.end += by;
        self
    }
}

/// Rendering switches for [`DscOp::to_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Emit `name=value` when the opcode has more than one parameter.
    pub show_names: bool,
    /// Emit every value as `i<raw>`.
    pub int_vars: bool,
    /// Drop parameters equal to their default where that stays unambiguous.
    pub hide_default: bool,
}

impl TextOptions {
    pub const fn human() -> Self {
        TextOptions {
            show_names: true,
            int_vars: false,
            hide_default: true,
        }
    }

    pub const fn compat() -> Self {
        TextOptions {
            show_names: false,
            int_vars: true,
            hide_default: false,
        }
    }
}

/// `NAME(...)` split into spans of the original text.
struct CallSyntax {
    op: Range<usize>,
    name: Range<usize>,
    open_paren: usize,
    args: Vec<ArgToken>,
}

/// One comma-separated argument, whitespace-trimmed.
struct ArgToken {
    span: Range<usize>,
    /// `name=` including the `=`, for named arguments.
    name_tag: Option<Range<usize>>,
    /// Trimmed parameter name, for named arguments.
    name: Option<Range<usize>>,
    value: Range<usize>,
}

enum Slot {
    Position(usize),
    UnknownName,
    Duplicate,
    Overflow,
}

impl Slot {
    fn reason(&self) -> &'static str {
        match self {
            Slot::Position(_) => "",
            Slot::UnknownName => "unknown parameter name",
            Slot::Duplicate => "duplicate parameter",
            Slot::Overflow => "too many parameters",
        }
    }
}

fn trim_span(text: &str, span: Range<usize>) -> Range<usize> {
    let s = &text[span.clone()];
    let start = span.start + (s.len() - s.trim_start().len());
    let end = (start + s.trim().len()).max(start);
    start..end
}

/// Split `text` into name and argument tokens.
///
/// On a malformed call the error is the span of the whole opcode.
fn split_call(text: &str) -> Result<CallSyntax, Range<usize>> {
    let start = text.len() - text.trim_start().len();
    let trimmed = text.trim_end();
    let end = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end().len().max(start);
    let op = start..end;
    let body = &text[op.clone()];

    let well_formed = body.matches('(').count() == 1
        && body.matches(')').count() == 1
        && !body.starts_with('(')
        && body.ends_with(')');
    if !well_formed {
        return Err(op);
    }

    let open_paren = start + body.find('(').ok_or(op.clone())?;
    let name = trim_span(text, start..open_paren);
    if name.is_empty() {
        return Err(op);
    }

    let interior = open_paren + 1..end - 1;
    let mut args = Vec::new();
    let mut piece_start = interior.start;
    for (i, b) in text[interior.clone()].bytes().enumerate() {
        if b == b',' {
            args.push(arg_token(text, piece_start..interior.start + i));
            piece_start = interior.start + i + 1;
        }
    }
    args.push(arg_token(text, piece_start..interior.end));

    Ok(CallSyntax {
        op,
        name,
        open_paren,
        args,
    })
}

fn arg_token(text: &str, raw: Range<usize>) -> ArgToken {
    let span = trim_span(text, raw);
    match text[span.clone()].find('=') {
        Some(eq) => {
            let eq = span.start + eq;
            let after = &text[eq + 1..span.end];
            let value_start = eq + 1 + (after.len() - after.trim_start().len());
            ArgToken {
                name_tag: Some(span.start..eq + 1),
                name: Some(trim_span(text, span.start..eq)),
                value: value_start..span.end,
                span,
            }
        }
        None => ArgToken {
            name_tag: None,
            name: None,
            value: span.clone(),
            span,
        },
    }
}

impl CallSyntax {
    /// An opcode without parameters written as `NAME()` has no arguments.
    fn drop_empty_args(&mut self, layout: &OpLayout) {
        if layout.param_cnt == 0 && self.args.len() == 1 && self.args[0].span.is_empty() {
            self.args.clear();
        }
    }

    /// Match arguments to parameter positions: named ones first, then the
    /// positional ones fill the lowest free positions in order.
    fn assign(&self, text: &str, layout: &OpLayout) -> Vec<Slot> {
        let mut used = vec![false; layout.param_cnt];
        let mut slots: Vec<Option<Slot>> = self.args.iter().map(|_| None).collect();

        for (slot, arg) in slots.iter_mut().zip(&self.args) {
            let Some(name) = &arg.name else {
                continue;
            };
            *slot = Some(match layout.position_of(&text[name.clone()]) {
                None => Slot::UnknownName,
                Some(pos) if used[pos] => Slot::Duplicate,
                Some(pos) => {
                    used[pos] = true;
                    Slot::Position(pos)
                }
            });
        }

        for slot in slots.iter_mut().filter(|s| s.is_none()) {
            *slot = Some(match used.iter().position(|u| !u) {
                Some(pos) => {
                    used[pos] = true;
                    Slot::Position(pos)
                }
                None => Slot::Overflow,
            });
        }

        slots
            .into_iter()
            .map(|s| s.unwrap_or(Slot::Overflow))
            .collect()
    }
}

impl DscOp {
    /// Parse one opcode in text form.
    pub fn from_text(index: &SchemaIndex, game: Game, text: &str) -> Result<Self, DscError> {
        let bad_format = || DscError::BadFormat {
            text: text.trim().to_string(),
        };
        let mut call = split_call(text).map_err(|_| bad_format())?;
        let resolved = index.resolve_name(game, &text[call.name.clone()])?;
        let layout = resolved.layout;
        let op = resolved.schema.name;
        call.drop_empty_args(layout);

        let mut supplied: Vec<Option<&str>> = vec![None; layout.param_cnt];
        for (arg, slot) in call.args.iter().zip(call.assign(text, layout)) {
            match slot {
                Slot::Position(pos) => {
                    let value = &text[arg.value.clone()];
                    if !value.is_empty() {
                        supplied[pos] = Some(value);
                    }
                }
                invalid => {
                    let name = arg
                        .name
                        .clone()
                        .map(|n| text[n].to_string())
                        .unwrap_or_default();
                    return Err(match invalid {
                        Slot::Duplicate => DscError::DuplicateParameter { op, name },
                        Slot::UnknownName => DscError::UnknownParameter { op, name },
                        _ => DscError::TooManyParameters {
                            op,
                            expected: layout.param_cnt,
                            got: call.args.len(),
                        },
                    });
                }
            }
        }

        let mut params = Vec::with_capacity(layout.param_cnt);
        for (pos, value) in supplied.into_iter().enumerate() {
            params.push(match value {
                Some(value) => parse_param_text(layout.kind(pos), value).map_err(|source| {
                    DscError::InvalidValue {
                        op,
                        index: pos,
                        source,
                    }
                })?,
                None => default_for(op, layout.spec(pos))?,
            });
        }

        Ok(DscOp::from_parts(game, resolved, params))
    }

    /// Which parameters `hide_default` drops.
    ///
    /// A default is kept if any later position has no spec, since such a
    /// position can only be written positionally. Without names only a
    /// trailing run of defaults can be dropped.
    fn hidden_params(&self, hide_default: bool, named: bool) -> Vec<bool> {
        let layout = self.layout();
        let n = self.params.len();
        let mut hidden = vec![false; n];
        if !hide_default {
            return hidden;
        }

        for (i, value) in self.params.iter().enumerate() {
            let later_gap = (i + 1..n).any(|j| layout.spec(j).is_none());
            hidden[i] = !later_gap
                && layout
                    .spec(i)
                    .map_or(false, |spec| spec.default == Some(value.raw()));
        }

        if !named {
            let mut trailing = true;
            for h in hidden.iter_mut().rev() {
                trailing &= *h;
                *h = trailing;
            }
        }
        hidden
    }

    /// Render as text together with highlighting tags.
    ///
    /// The tags match what [`annotate`] reports for the returned string.
    pub fn to_annotated_text(&self, opts: TextOptions) -> (String, Vec<Tag>) {
        let layout = self.layout();
        let named = opts.show_names && layout.param_cnt > 1;
        let hidden = self.hidden_params(opts.hide_default, named);

        let mut out = String::from(self.name);
        let mut tags = vec![Tag::new(0..out.len(), TagKind::OpName)];
        out.push('(');

        let mut first = true;
        for (index, value) in self.params.iter().enumerate() {
            if hidden[index] {
                continue;
            }
            if !first {
                out.push_str(", ");
            }
            first = false;

            if let Some(spec) = layout.spec(index).filter(|_| named) {
                let start = out.len();
                out.push_str(spec.name);
                out.push('=');
                tags.push(Tag::new(start..out.len(), TagKind::ParamName { index }));
            }

            let start = out.len();
            out.push_str(&render_value(value, opts.int_vars));
            tags.push(Tag::new(start..out.len(), TagKind::ParamValue { index }));
        }
        out.push(')');

        tags.insert(0, Tag::new(0..out.len(), TagKind::Op));
        (out, tags)
    }

    pub fn to_text(&self, opts: TextOptions) -> String {
        self.to_annotated_text(opts).0
    }
}

fn render_value(value: &ParamValue, int_vars: bool) -> String {
    if int_vars {
        value.to_int_var()
    } else {
        value.to_string()
    }
}

impl std::fmt::Display for DscOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(TextOptions::human()))
    }
}

/// Collects tags while walking one opcode's text.
struct Diagnostics<'t> {
    text: &'t str,
    tags: Vec<Tag>,
}

impl<'t> Diagnostics<'t> {
    fn tag(&mut self, span: Range<usize>, kind: TagKind) {
        self.tags.push(Tag::new(span, kind));
    }

    fn invalid(&mut self, span: Range<usize>, reason: impl Into<String>) {
        self.tag(
            span,
            TagKind::Invalid {
                reason: reason.into(),
            },
        );
    }

    fn visit_call(&mut self, index: &SchemaIndex, game: Game) {
        let text = self.text;
        let mut call = match split_call(text) {
            Ok(call) => call,
            Err(op) => {
                self.invalid(op, "bad format");
                return;
            }
        };
        self.tag(call.op.clone(), TagKind::Op);
        self.tag(call.name.clone(), TagKind::OpName);

        let layout = match index.resolve_name(game, &text[call.name.clone()]) {
            Ok(resolved) => resolved.layout,
            Err(DscError::UnsupportedOp { .. }) => {
                self.invalid(call.name.clone(), format!("op not valid for game {game}"));
                return;
            }
            Err(_) => {
                self.invalid(call.name.clone(), "unknown op name");
                return;
            }
        };
        call.drop_empty_args(layout);
        let slots = call.assign(text, layout);

        for pos in 0..layout.param_cnt {
            let Some(spec) = layout.spec(pos).filter(|spec| spec.required()) else {
                continue;
            };
            let supplied = call.args.iter().zip(&slots).any(|(arg, slot)| {
                matches!(slot, Slot::Position(p) if *p == pos) && !arg.value.is_empty()
            });
            if !supplied {
                self.invalid(
                    call.open_paren..call.op.end,
                    format!("missing required parameter {}", spec.name),
                );
            }
        }

        for (arg, slot) in call.args.iter().zip(slots) {
            match slot {
                Slot::Position(index) => self.visit_arg(arg, index, layout),
                invalid => self.invalid(arg.span.clone(), invalid.reason()),
            }
        }
    }

    fn visit_arg(&mut self, arg: &ArgToken, index: usize, layout: &OpLayout) {
        if let Some(name_tag) = &arg.name_tag {
            self.tag(name_tag.clone(), TagKind::ParamName { index });
        }
        self.tag(arg.value.clone(), TagKind::ParamValue { index });

        let value = &self.text[arg.value.clone()];
        if value.is_empty() {
            return;
        }
        if let Err(err) = parse_param_text(layout.kind(index), value) {
            self.invalid(
                arg.value.clone(),
                format!("cannot convert to correct type ({err})"),
            );
        }
    }
}

/// Tag one opcode's text for highlighting without failing.
///
/// Problems come back as `Invalid` tags; parsing continues past them where
/// the structure allows.
pub fn annotate(index: &SchemaIndex, game: Game, text: &str) -> Vec<Tag> {
    let mut diagnostics = Diagnostics {
        text,
        tags: Vec::new(),
    };
    diagnostics.visit_call(index, game);
    diagnostics.tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsc::build_schema_index;
    use crate::dsc::schema::{op_with, opt, OpcodeSchema, Resolved};
    use crate::values::ParamKind;

    fn tag(start: usize, end: usize, kind: TagKind) -> Tag {
        Tag { start, end, kind }
    }

    fn value(start: usize, end: usize, index: usize) -> Tag {
        tag(start, end, TagKind::ParamValue { index })
    }

    fn name(start: usize, end: usize, index: usize) -> Tag {
        tag(start, end, TagKind::ParamName { index })
    }

    fn invalid(start: usize, end: usize, reason: &str) -> Tag {
        tag(
            start,
            end,
            TagKind::Invalid {
                reason: reason.to_string(),
            },
        )
    }

    fn parse(text: &str) -> Result<DscOp, DscError> {
        DscOp::from_text(&build_schema_index(), Game::FT, text)
    }

    fn raws(op: &DscOp) -> Vec<i64> {
        op.params.iter().map(ParamValue::raw).collect()
    }

    #[test]
    fn parses_positional_and_named() {
        let op = parse("TIME(1)").unwrap();
        assert_eq!(op.id, 1);
        assert_eq!(raws(&op), vec![100_000]);

        let op = parse("LYRIC(1, 2)").unwrap();
        assert_eq!(raws(&op), vec![1, 2]);

        let op = parse("LYRIC(1)").unwrap();
        assert_eq!(raws(&op), vec![1, -1]);

        let op = parse("LYRIC(color=i3, 1)").unwrap();
        assert_eq!(raws(&op), vec![1, 3]);

        let op = parse(" miku_move ( Chara=0, x=1, y =2, z= i3 ) ;").unwrap();
        assert_eq!(op.name, "MIKU_MOVE");
        assert_eq!(raws(&op), vec![0, 1000, 2000, 3]);
    }

    #[test]
    fn named_then_positional_fill() {
        let op = parse("TARGET(type=cross, pos_x=i1, pos_y=i2, i3, amp=i5)").unwrap();
        assert_eq!(op.params[0].to_string(), "cross");
        assert_eq!(raws(&op), vec![2, 1, 2, 3, 1_200_000, 5, 2]);
    }

    #[test]
    fn unnamed_positions_default_to_zero() {
        let op = parse("MOUTH_ANIM(chara=0, id=10, in_time=i20, speed=i30)").unwrap();
        assert_eq!(raws(&op), vec![0, 0, 10, 20, 30]);
    }

    #[test]
    fn strict_parse_errors() {
        assert!(matches!(
            parse("HAND_SCALE(chara=0, chara=1000, 1)"),
            Err(DscError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            parse("HAND_SCALE(chara=0, scala=1000, 1)"),
            Err(DscError::UnknownParameter { .. })
        ));
        assert!(matches!(
            parse("HAND_SCALE(0, left, 1, 2)"),
            Err(DscError::TooManyParameters { expected: 3, got: 4, .. })
        ));
        assert!(matches!(
            parse("HAND_SCALE(0, scale=1)"),
            Err(DscError::MissingParameter { name: "hand", .. })
        ));
        assert!(matches!(
            parse("HAND_SCALE(0, true, 1)"),
            Err(DscError::InvalidValue { index: 1, .. })
        ));
        assert!(matches!(parse("TIME()"), Err(DscError::MissingParameter { .. })));
        for bad in ["HAND_SCALE 0,1,2;", "(0, 1)", "HAND_SCALE(0, (1, 2)", "A(1))", ""] {
            assert!(matches!(parse(bad), Err(DscError::BadFormat { .. })), "{bad}");
        }
        assert!(matches!(parse("BAD_SCALE(0)"), Err(DscError::UnknownOpName { .. })));
    }

    #[test]
    fn renders_human_and_compat() {
        let op = parse("HAND_SCALE(chara=0, hand=left, scale=1220)").unwrap();
        assert_eq!(
            op.to_text(TextOptions::human()),
            "HAND_SCALE(chara=0, hand=left, scale=122%)"
        );
        assert_eq!(op.to_text(TextOptions::compat()), "HAND_SCALE(i0, i0, i1220)");
        assert_eq!(op.to_text(TextOptions::default()), "HAND_SCALE(0, left, 122%)");

        let op = parse("CHANGE_FIELD(1)").unwrap();
        assert_eq!(op.to_text(TextOptions::human()), "CHANGE_FIELD(1)");
        let op = parse("END()").unwrap();
        assert_eq!(op.to_string(), "END()");
    }

    #[test]
    fn default_hiding() {
        let op = parse("LYRIC(1)").unwrap();
        assert_eq!(op.to_text(TextOptions::human()), "LYRIC(id=1)");

        // without names only trailing defaults go
        let opts = TextOptions {
            hide_default: true,
            ..TextOptions::default()
        };
        let op = parse("TARGET(triangle, 1, 2, 3, dist=1200, amp=1, freq=2)").unwrap();
        assert_eq!(
            op.to_text(opts),
            "TARGET(triangle, 1.000, 2.000, 3.000, 1200.000, 1.000)"
        );
        assert_eq!(
            op.to_text(TextOptions::human()),
            "TARGET(type=triangle, pos_x=1.000, pos_y=2.000, angle=3.000, amp=1.000)"
        );
    }

    #[test]
    fn defaults_before_unnamed_positions_stay() {
        static PROBE: OpcodeSchema = OpcodeSchema {
            name: "PROBE",
            desc: None,
            default: op_with(
                1,
                &[
                    opt("a", "", ParamKind::Int, 0),
                    None,
                    opt("b", "", ParamKind::Int, 0),
                ],
            ),
            overrides: &[],
        };
        let resolved = Resolved {
            schema: &PROBE,
            layout: PROBE.layout(Game::FT).unwrap(),
        };
        let params = vec![ParamValue::Int(0), ParamValue::Int(5), ParamValue::Int(0)];
        let op = DscOp::from_parts(Game::FT, resolved, params);
        assert_eq!(op.to_text(TextOptions::human()), "PROBE(a=0, 5)");
        assert_eq!(op.to_text(TextOptions::default()), "PROBE(0, 5, 0)");
    }

    #[test]
    fn text_round_trips() {
        let index = build_schema_index();
        for text in [
            "TIME(0)",
            "MUSIC_PLAY()",
            "CHANGE_FIELD(1)",
            "MIKU_DISP(chara=0, visible=False)",
            "MIKU_MOVE(chara=0, x=1, y=2, z=3)",
            "HAND_SCALE(chara=0, hand=left, scale=1220)",
            "TARGET(type=triangle_hold, pos_x=69, pos_y=420, angle=39, dist=1, amp=2, freq=3)",
            "MOUTH_ANIM(0, 7, 10, 20, 30)",
            "PV_BRANCH_MODE(success)",
            "LYRIC(3, -1)",
            "END()",
        ] {
            let op = DscOp::from_text(&index, Game::FT, text).unwrap();
            for opts in [TextOptions::human(), TextOptions::compat()] {
                let back = DscOp::from_text(&index, Game::FT, &op.to_text(opts)).unwrap();
                assert_eq!(back, op, "{text}");
            }
        }
    }

    #[test]
    fn annotated_text_matches_annotate() {
        let index = build_schema_index();
        for text in [
            "TIME(0)",
            "MUSIC_PLAY()",
            "MIKU_DISP(chara=0, visible=False)",
            "MIKU_MOVE(chara=0, x=1, y=2, z=3)",
            "HAND_SCALE(chara=0, hand=left, scale=1220)",
            "MOUTH_ANIM(0, 7, 10, 20, 30)",
            "END()",
        ] {
            let op = DscOp::from_text(&index, Game::FT, text).unwrap();
            for opts in [TextOptions::human(), TextOptions::compat()] {
                let (rendered, tags) = op.to_annotated_text(opts);
                assert_eq!(annotate(&index, Game::FT, &rendered), tags, "{rendered}");
            }
        }
    }

    fn annot(text: &str) -> Vec<Tag> {
        annotate(&build_schema_index(), Game::FT, text)
    }

    #[test]
    fn annotate_positional() {
        assert_eq!(
            annot("HAND_SCALE(i0,i1, i1000)"),
            vec![
                tag(0, 24, TagKind::Op),
                tag(0, 10, TagKind::OpName),
                value(11, 13, 0),
                value(14, 16, 1),
                value(18, 23, 2),
            ]
        );
    }

    #[test]
    fn annotate_named() {
        let expect = vec![
            tag(1, 40, TagKind::Op),
            tag(1, 11, TagKind::OpName),
            name(14, 20, 0),
            value(20, 21, 0),
            name(23, 30, 2),
            value(31, 35, 2),
            value(37, 38, 1),
        ];
        assert_eq!(annot(" HAND_SCALE ( chara=0, scale = 1000, 1 ) ;"), expect);
        assert_eq!(annot(" HAnD_SCaLE ( cHara=0, Scale = 1000, 1 ) ;"), expect);
    }

    #[test]
    fn annotate_bad_format() {
        assert_eq!(annot("HAND_SCALE 0,1,2;"), vec![invalid(0, 16, "bad format")]);
        assert_eq!(annot("(0, true, left)"), vec![invalid(0, 15, "bad format")]);
        assert_eq!(annot("HAND_SCALE(0, (true, left)"), vec![invalid(0, 26, "bad format")]);
        assert_eq!(annot("HAND_SCALE(0, true), left)"), vec![invalid(0, 26, "bad format")]);
    }

    #[test]
    fn annotate_bad_op_name() {
        assert_eq!(
            annot("BAD_SCALE(0,1,2);"),
            vec![
                tag(0, 16, TagKind::Op),
                tag(0, 9, TagKind::OpName),
                invalid(0, 9, "unknown op name"),
            ]
        );
        assert_eq!(
            annotate(&build_schema_index(), Game::F2, "HAND_SCALE(0,1,2)"),
            vec![
                tag(0, 17, TagKind::Op),
                tag(0, 10, TagKind::OpName),
                invalid(0, 10, "op not valid for game F2"),
            ]
        );
    }

    #[test]
    fn annotate_unknown_and_duplicate_names() {
        assert_eq!(
            annot(" HAND_SCALE ( chara=0, scala = 1000, 1 ) ;"),
            vec![
                tag(1, 40, TagKind::Op),
                tag(1, 11, TagKind::OpName),
                invalid(12, 40, "missing required parameter scale"),
                name(14, 20, 0),
                value(20, 21, 0),
                invalid(23, 35, "unknown parameter name"),
                value(37, 38, 1),
            ]
        );
        assert_eq!(
            annot(" HAND_SCALE ( chara=0, chara = 1000, 1 ) ;"),
            vec![
                tag(1, 40, TagKind::Op),
                tag(1, 11, TagKind::OpName),
                invalid(12, 40, "missing required parameter scale"),
                name(14, 20, 0),
                value(20, 21, 0),
                invalid(23, 35, "duplicate parameter"),
                value(37, 38, 1),
            ]
        );
    }

    #[test]
    fn annotate_missing_and_extra_args() {
        assert_eq!(
            annot("HAND_SCALE(chara=0, scale=1000);"),
            vec![
                tag(0, 31, TagKind::Op),
                tag(0, 10, TagKind::OpName),
                invalid(10, 31, "missing required parameter hand"),
                name(11, 17, 0),
                value(17, 18, 0),
                name(20, 26, 2),
                value(26, 30, 2),
            ]
        );
        assert_eq!(
            annot("HAND_SCALE(chara=0, 1, 2, scale=1000, 3);"),
            vec![
                tag(0, 40, TagKind::Op),
                tag(0, 10, TagKind::OpName),
                name(11, 17, 0),
                value(17, 18, 0),
                value(20, 21, 1),
                invalid(23, 24, "too many parameters"),
                name(26, 32, 2),
                value(32, 36, 2),
                invalid(38, 39, "too many parameters"),
            ]
        );
    }

    #[test]
    fn annotate_wrong_types() {
        let tags = annot("HAND_SCALE(0, true, left)");
        assert_eq!(tags.len(), 7);
        assert_eq!(tags[3], value(14, 18, 1));
        assert!(matches!(
            &tags[4].kind,
            TagKind::Invalid { reason } if reason.starts_with("cannot convert to correct type (")
        ));
        assert_eq!((tags[4].start, tags[4].end), (14, 18));
        assert_eq!(tags[5], value(20, 24, 2));
        assert_eq!((tags[6].start, tags[6].end), (20, 24));
    }

    #[test]
    fn annotate_time_out_of_range() {
        let text = "TIME(999999999999999:00:00)";
        let tags = annot(text);
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[2], value(5, 26, 0));
        assert!(matches!(
            &tags[3].kind,
            TagKind::Invalid { reason } if reason.starts_with("cannot convert to correct type (")
        ));
        assert_eq!((tags[3].start, tags[3].end), (5, 26));
        assert!(matches!(parse(text), Err(DscError::InvalidValue { index: 0, .. })));
    }

    #[test]
    fn single_terminator_only() {
        assert_eq!(parse("TIME(1) ; ").unwrap().id, 1);
        assert!(matches!(parse("TIME(1);;"), Err(DscError::BadFormat { .. })));
        assert_eq!(
            annot("END();;"),
            vec![invalid(0, 6, "bad format")]
        );
    }

    #[test]
    fn annotate_empty_args() {
        assert_eq!(
            annot("TIME()"),
            vec![
                tag(0, 6, TagKind::Op),
                tag(0, 4, TagKind::OpName),
                invalid(4, 6, "missing required parameter time"),
                value(5, 5, 0),
            ]
        );
        assert_eq!(
            annot("END( )"),
            vec![tag(0, 6, TagKind::Op), tag(0, 3, TagKind::OpName)]
        );
        assert_eq!(
            annot("TIME(  )"),
            vec![
                tag(0, 8, TagKind::Op),
                tag(0, 4, TagKind::OpName),
                invalid(4, 8, "missing required parameter time"),
                value(7, 7, 0),
            ]
        );
    }
}
