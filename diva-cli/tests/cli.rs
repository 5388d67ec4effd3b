use std::fs;

use diva_cli::{convert_script, pack_dir, unpack_file, CliError, PackOptions, ScriptOptions};
use diva_core::farc::IvMode;
use diva_core::Game;

#[test]
fn pack_then_unpack_restores_files() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("spr_test");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("b.bin"), b"test2").unwrap();
    fs::write(dir.join("a.txt"), b"test1").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();

    for variant in ["FArc", "FArC", "FARC", "FARC_FT"] {
        let opts = PackOptions {
            variant: variant.to_string(),
            compress: true,
            iv: IvMode::Zero,
            force: true,
            ..PackOptions::default()
        };
        let archive = pack_dir(&dir, &opts).unwrap();
        assert_eq!(archive, tmp.path().join("spr_test.farc"));

        let out = unpack_file(&archive, true).unwrap();
        assert_eq!(out, dir);
        assert_eq!(fs::read(out.join("a.txt")).unwrap(), b"test1");
        assert_eq!(fs::read(out.join("b.bin")).unwrap(), b"test2");
        assert!(out.join("nested").is_dir());
    }
}

#[test]
fn existing_outputs_need_force() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("data");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("x"), b"x").unwrap();

    let archive = pack_dir(&dir, &PackOptions::default()).unwrap();
    let err = pack_dir(&dir, &PackOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::Exists(_)));

    let err = unpack_file(&archive, false).unwrap_err();
    assert!(matches!(err, CliError::Exists(_)));

    fs::write(dir.join("stale"), b"old").unwrap();
    unpack_file(&archive, true).unwrap();
    assert!(!dir.join("stale").exists());
    assert_eq!(fs::read(dir.join("x")).unwrap(), b"x");
}

#[test]
fn unknown_variants_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = PackOptions {
        variant: "FARC_X".to_string(),
        ..PackOptions::default()
    };
    let err = pack_dir(tmp.path(), &opts).unwrap_err();
    assert!(matches!(err, CliError::Farc(_)));
}

#[test]
fn scripts_convert_both_ways() {
    let tmp = tempfile::tempdir().unwrap();
    let text_path = tmp.path().join("pv_001.dsc.txt");
    fs::write(
        &text_path,
        "# intro\nTIME(0);\nMIKU_DISP(0, true);\nMUSIC_PLAY();\nTIME(2);\nEND();\n",
    )
    .unwrap();

    let opts = ScriptOptions {
        game: Some(Game::FT),
        ..ScriptOptions::default()
    };
    let binary = convert_script(&text_path, &opts).unwrap();
    assert_eq!(binary, tmp.path().join("pv_001.dsc"));

    let rendered = convert_script(
        &binary,
        &ScriptOptions {
            force: true,
            ..ScriptOptions::default()
        },
    )
    .unwrap();
    assert_eq!(rendered, text_path);
    let text = fs::read_to_string(&rendered).unwrap();
    assert!(text.starts_with("TIME(0);\n"));
    assert!(text.ends_with("END();\n"));

    let again = convert_script(&rendered, &ScriptOptions { force: true, ..opts }).unwrap();
    assert_eq!(fs::read(again).unwrap(), fs::read(&binary).unwrap());
}

#[test]
fn script_errors_name_the_line() {
    let tmp = tempfile::tempdir().unwrap();
    let text_path = tmp.path().join("broken.txt");
    fs::write(&text_path, "TIME(0);\nNOT_AN_OP(1);\n").unwrap();

    let err = convert_script(&text_path, &ScriptOptions::default()).unwrap_err();
    assert!(err.to_string().starts_with("line 2:"));
}
