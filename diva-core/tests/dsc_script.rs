use diva_core::dsc::{
    annotate, decode_stream, encode_stream, parse_script, render_text, DscError, DscOp, TagKind,
    HEADER_LEN,
};
use diva_core::{build_schema_index, ErrorKind, Game, TextOptions};

#[test]
fn short_script_encodes_and_decodes() {
    let index = build_schema_index();
    let ops = parse_script(&index, Game::FT, "TIME(0); MUSIC_PLAY(); END();").unwrap();
    assert_eq!(ops.len(), 3);

    let sizes: Vec<usize> = ops.iter().map(|op| op.to_bytes().unwrap().len()).collect();
    assert_eq!(sizes, vec![8, 4, 4]);

    let bytes = encode_stream(&ops).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN + 16);
    assert_eq!(decode_stream(&index, &bytes, None).unwrap(), ops);
}

#[test]
fn duplicate_parameter_is_an_error_and_an_invalid_tag() {
    let index = build_schema_index();
    let text = "HAND_SCALE(chara=0, chara=1000, 1)";

    let err = DscOp::from_text(&index, Game::FT, text).unwrap_err();
    assert!(matches!(err, DscError::DuplicateParameter { .. }));
    assert_eq!(err.kind(), ErrorKind::Schema);

    let tags = annotate(&index, Game::FT, text);
    let second = text.rfind("chara").unwrap();
    let dup = tags
        .iter()
        .find(|tag| matches!(&tag.kind, TagKind::Invalid { reason } if reason == "duplicate parameter"))
        .unwrap();
    assert_eq!(dup.start, second);
    assert_eq!(&text[dup.start..dup.end], "chara=1000");
}

#[test]
fn compat_text_round_trips_through_a_binary_script() {
    let index = build_schema_index();
    let script = "
        TIME(0);
        MIKU_DISP(0, true);
        LYRIC(3);
        PV_BRANCH_MODE(success);
        CHANGE_FIELD(2);
        TIME(1.5);
        END();
    ";
    let ops = parse_script(&index, Game::FT, script).unwrap();
    let bytes = encode_stream(&ops).unwrap();
    let decoded = decode_stream(&index, &bytes, None).unwrap();

    for compat in [false, true] {
        let text = render_text(&decoded, compat, true);
        assert_eq!(parse_script(&index, Game::FT, &text).unwrap(), ops);
    }

    let compat = render_text(&decoded, true, false);
    assert!(compat.lines().all(|line| !line.starts_with(' ')));
    assert!(compat.contains("TIME(i150000);"));
}

#[test]
fn human_text_hides_defaults() {
    let index = build_schema_index();
    let op = DscOp::from_text(&index, Game::FT, "LYRIC(id=7, color=-1)").unwrap();
    assert_eq!(op.to_text(TextOptions::human()), "LYRIC(id=7)");
    assert_eq!(op.to_string(), "LYRIC(id=7)");
    assert_eq!(
        op.to_text(TextOptions::default()),
        "LYRIC(7, -1)"
    );
}

#[test]
fn scripts_are_bound_to_one_game() {
    let index = build_schema_index();
    let err = parse_script(&index, Game::F, "HAND_SCALE(0, left, 500);").unwrap_err();
    match err {
        DscError::Line { line, source } => {
            assert_eq!(line, 1);
            assert!(matches!(*source, DscError::UnsupportedOp { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
