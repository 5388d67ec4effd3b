//! The opcode table.
//!
//! One entry per opcode name, sorted by name. `default` applies to every game
//! without an override; a `None` layout means the opcode does not exist for
//! that game.

use super::schema::{op, op_with, opt, req, OpcodeSchema};
use crate::game::Game;
use crate::values::ParamKind;

const CHARA_SIZES: &[&str] = &["normal", "unk2", "unk3"];

const CAMERA_MODES: &[&str] = &["unk1", "unk2", "unk3"];

const HANDS: &[&str] = &["left", "right"];

const BRANCH_MODES: &[&str] = &["none", "normal", "success"];

const TARGET_TYPES_FT: &[&str] = &[
    "triangle",
    "circle",
    "cross",
    "square",
    "triangle_hold",
    "circle_hold",
    "cross_hold",
    "square_hold",
    "random",
    "random_hold",
    "repeat",
    "unimp_star",
    "slide_l",
    "slide_r",
    "unimp_chainstar",
    "chainslide_l",
    "chainslide_r",
    "unk17",
    "triangle_success",
    "circle_success",
    "cross_success",
    "square_success",
    "unimp_star_success",
    "slide_l_success",
    "slide_r_success",
];

pub(super) static OPCODES: &[OpcodeSchema] = &[
    OpcodeSchema {
        name: "AGEAGE_CTRL",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(105, 8))],
    },
    OpcodeSchema {
        name: "AIM",
        desc: None,
        default: op(46, 3),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "ANNOTATION",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(110, 5))],
    },
    OpcodeSchema {
        name: "AOTO_CAP",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(97, 1))],
    },
    OpcodeSchema {
        name: "AUTO_BLINK",
        desc: None,
        default: op(56, 2),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "AUTO_CAPTURE_BEGIN",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(97, 1)), (Game::X, op(97, 1))],
    },
    OpcodeSchema {
        name: "BANK_BRANCH",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(131, 2))],
    },
    OpcodeSchema {
        name: "BANK_END",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(132, 2))],
    },
    OpcodeSchema {
        name: "BAR_POINT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(85, 1))],
    },
    OpcodeSchema {
        name: "BAR_TIME_SET",
        desc: None,
        default: op(28, 2),
        overrides: &[],
    },
    OpcodeSchema {
        name: "BEAT_POINT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(86, 1))],
    },
    OpcodeSchema {
        name: "BLOOM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(93, 2)), (Game::FT, op(93, 2)), (Game::X, op(93, 2))],
    },
    OpcodeSchema {
        name: "CHANGE_FIELD",
        desc: Some("Change the PV field."),
        default: op_with(
            14,
            &[
                req("id", "field number", ParamKind::Int),
            ],
        ),
        overrides: &[(Game::F2, op(14, 2)), (Game::X, op(14, 2))],
    },
    OpcodeSchema {
        name: "CHARA_ALPHA",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(96, 4)), (Game::FT, op(96, 4)), (Game::X, op(96, 4))],
    },
    OpcodeSchema {
        name: "CHARA_COLOR",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(72, 2)),
            (Game::FT, op(72, 2)),
            (Game::X, op(72, 2)),
            (Game::F, op(72, 2)),
        ],
    },
    OpcodeSchema {
        name: "CHARA_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(124, 3))],
    },
    OpcodeSchema {
        name: "CHARA_EFFECT_CHARA_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(126, 3))],
    },
    OpcodeSchema {
        name: "CHARA_HEIGHT_ADJUST",
        desc: None,
        default: op(60, 2),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "CHARA_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(103, 3))],
    },
    OpcodeSchema {
        name: "CHARA_POS_ADJUST",
        desc: None,
        default: op(62, 4),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "CHARA_SHADOW_QUALITY",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(74, 2))],
    },
    OpcodeSchema {
        name: "CHARA_SIZE",
        desc: Some("Sets a character's size scale."),
        default: op_with(
            59,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("size", "chara size", ParamKind::Enum(CHARA_SIZES)),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "CHROMATIC_ABERRATION",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(80, 3))],
    },
    OpcodeSchema {
        name: "CLOTH_WET",
        desc: None,
        default: op(50, 2),
        overrides: &[(Game::PDA12, op(35, 1)), (Game::PSP1, op(35, 1))],
    },
    OpcodeSchema {
        name: "COLOR_COLLE",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(94, 3))],
    },
    OpcodeSchema {
        name: "COLOR_CORRECTION",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(94, 3)), (Game::X, op(94, 3))],
    },
    OpcodeSchema {
        name: "COMMON_EFFECT_AET_FRONT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(118, 2))],
    },
    OpcodeSchema {
        name: "COMMON_EFFECT_AET_FRONT_LOW",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(119, 2))],
    },
    OpcodeSchema {
        name: "COMMON_EFFECT_PARTICLE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(120, 2))],
    },
    OpcodeSchema {
        name: "COMMON_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(76, 2))],
    },
    OpcodeSchema {
        name: "CREDIT_TITLE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(84, 1))],
    },
    OpcodeSchema {
        name: "CROSSFADE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(103, 1))],
    },
    OpcodeSchema {
        name: "DATA_CAMERA",
        desc: Some("Set camera data."),
        default: op_with(
            13,
            &[
                req("mode", "camera mode?", ParamKind::Enum(CAMERA_MODES)),
                req("id", "camera number?", ParamKind::Int),
            ],
        ),
        overrides: &[],
    },
    OpcodeSchema {
        name: "DATA_CAMERA_START",
        desc: Some("(Re)starts camera data(?)."),
        default: op_with(
            66,
            &[
                req("mode", "camera mode?", ParamKind::Enum(CAMERA_MODES)),
                req("id", "camera number?", ParamKind::Int),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None), (Game::PSP2, None)],
    },
    OpcodeSchema {
        name: "DOF",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(95, 3)), (Game::FT, op(95, 3)), (Game::X, op(95, 3))],
    },
    OpcodeSchema {
        name: "DUMMY",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(31, 21))],
    },
    OpcodeSchema {
        name: "EDIT_BLUSH",
        desc: None,
        default: op(48, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_CAMERA",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(81, 22)), (Game::FT, op(81, 24)), (Game::F, op(81, 24))],
    },
    OpcodeSchema {
        name: "EDIT_CAMERA_BOX",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(108, 112)), (Game::X, op(103, 112))],
    },
    OpcodeSchema {
        name: "EDIT_CHANGE_FIELD",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(110, 1)), (Game::X, op(105, 1))],
    },
    OpcodeSchema {
        name: "EDIT_DISP",
        desc: None,
        default: op(44, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_EFFECT",
        desc: None,
        default: op(43, 2),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_EXPRESSION",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(78, 2)), (Game::FT, op(78, 2)), (Game::F, op(78, 2))],
    },
    OpcodeSchema {
        name: "EDIT_EYE",
        desc: None,
        default: op(41, 2),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_EYELID",
        desc: None,
        default: op(40, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_EYELID_ANIM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(75, 3)), (Game::FT, op(75, 3)), (Game::F, op(75, 3))],
    },
    OpcodeSchema {
        name: "EDIT_EYE_ANIM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(79, 3)), (Game::FT, op(79, 3)), (Game::F, op(79, 3))],
    },
    OpcodeSchema {
        name: "EDIT_FACE",
        desc: None,
        default: op(30, 1),
        overrides: &[(Game::PDA12, op(30, 2)), (Game::PSP1, op(30, 2))],
    },
    OpcodeSchema {
        name: "EDIT_HAND_ANIM",
        desc: None,
        default: op(45, 2),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_INSTRUMENT_ITEM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(76, 2)), (Game::FT, op(76, 2)), (Game::F, op(76, 2))],
    },
    OpcodeSchema {
        name: "EDIT_ITEM",
        desc: None,
        default: op(42, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_LYRIC",
        desc: Some("Display an edit lyric."),
        default: op_with(
            34,
            &[
                req("id", "lyric line number", ParamKind::Int),
                req("end_time", "time to hide lyric at", ParamKind::Int),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_MODE_SELECT",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(82, 1)), (Game::FT, op(82, 1)), (Game::F, op(82, 1))],
    },
    OpcodeSchema {
        name: "EDIT_MOTION",
        desc: None,
        default: op(27, 4),
        overrides: &[(Game::PDA12, op(27, 2)), (Game::PSP1, op(27, 2))],
    },
    OpcodeSchema {
        name: "EDIT_MOTION_F",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(91, 6))],
    },
    OpcodeSchema {
        name: "EDIT_MOTION_LOOP",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(77, 4)), (Game::FT, op(77, 4)), (Game::F, op(77, 4))],
    },
    OpcodeSchema {
        name: "EDIT_MOT_SMOOTH_LEN",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(64, 2)),
            (Game::FT, op(64, 2)),
            (Game::X, op(64, 2)),
            (Game::F, op(64, 2)),
        ],
    },
    OpcodeSchema {
        name: "EDIT_MOUTH",
        desc: None,
        default: op(36, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_MOUTH_ANIM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(80, 2)), (Game::FT, op(80, 2)), (Game::F, op(80, 2))],
    },
    OpcodeSchema {
        name: "EDIT_MOVE",
        desc: None,
        default: op(38, 7),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_MOVE_XYZ",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(74, 9)), (Game::FT, op(74, 9)), (Game::F, op(74, 9))],
    },
    OpcodeSchema {
        name: "EDIT_SHADOW",
        desc: None,
        default: op(39, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EDIT_STAGE_PARAM",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(109, 1)), (Game::X, op(104, 1))],
    },
    OpcodeSchema {
        name: "EDIT_TARGET",
        desc: None,
        default: op(35, 5),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "EFFECT",
        desc: None,
        default: op(9, 6),
        overrides: &[(Game::PDA12, op(9, 5)), (Game::PSP1, op(9, 5))],
    },
    OpcodeSchema {
        name: "EFFECT_OFF",
        desc: None,
        default: op(11, 1),
        overrides: &[],
    },
    OpcodeSchema {
        name: "ENABLE_COMMON_LIGHT_TO_CHARA",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(127, 2))],
    },
    OpcodeSchema {
        name: "ENABLE_FXAA",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(128, 2))],
    },
    OpcodeSchema {
        name: "ENABLE_REFLECTION",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(130, 2))],
    },
    OpcodeSchema {
        name: "ENABLE_TEMPORAL_AA",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(129, 2))],
    },
    OpcodeSchema {
        name: "END",
        desc: Some("Ends the DSC file."),
        default: op(0, 0),
        overrides: &[],
    },
    OpcodeSchema {
        name: "EVENT_JUDGE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(105, 36))],
    },
    OpcodeSchema {
        name: "EXPRESSION",
        desc: None,
        default: op(22, 4),
        overrides: &[(Game::PDA12, op(22, 3)), (Game::PSP1, op(22, 3))],
    },
    OpcodeSchema {
        name: "EYE_ANIM",
        desc: None,
        default: op(18, 3),
        overrides: &[(Game::PDA12, op(18, 2)), (Game::PSP1, op(18, 2))],
    },
    OpcodeSchema {
        name: "FACE_TYPE",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(89, 1))],
    },
    OpcodeSchema {
        name: "FADE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(115, 2))],
    },
    OpcodeSchema {
        name: "FADEIN_FIELD",
        desc: None,
        default: op(10, 2),
        overrides: &[],
    },
    OpcodeSchema {
        name: "FADEOUT_FIELD",
        desc: None,
        default: op(17, 2),
        overrides: &[],
    },
    OpcodeSchema {
        name: "FADE_MODE",
        desc: None,
        default: op(55, 1),
        overrides: &[(Game::PDA12, op(39, 1)), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "FOG",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(92, 3)), (Game::FT, op(92, 3)), (Game::X, op(92, 3))],
    },
    OpcodeSchema {
        name: "FOG_ENABLE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(107, 2))],
    },
    OpcodeSchema {
        name: "GAZE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(148, 2))],
    },
    OpcodeSchema {
        name: "HAND_ANIM",
        desc: None,
        default: op(20, 5),
        overrides: &[(Game::PDA12, op(20, 4)), (Game::PSP1, op(20, 4))],
    },
    OpcodeSchema {
        name: "HAND_ITEM",
        desc: None,
        default: op(47, 3),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "HAND_SCALE",
        desc: Some("Change the size of a character's hands."),
        default: None,
        overrides: &[
            (Game::FT, op_with(
                87,
                &[
                    req("chara", "chara slot", ParamKind::Int),
                    req("hand", "which hand to change", ParamKind::Enum(HANDS)),
                    req("scale", "scale size", ParamKind::Scaled { min: 0, max: 1000 }),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "HIDE_FIELD",
        desc: None,
        default: op(15, 1),
        overrides: &[],
    },
    OpcodeSchema {
        name: "IBL_COLOR",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(78, 2))],
    },
    OpcodeSchema {
        name: "ITEM_ALPHA",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(101, 4)), (Game::FT, op(101, 4)), (Game::X, op(101, 4))],
    },
    OpcodeSchema {
        name: "ITEM_ANIM",
        desc: None,
        default: op(61, 4),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "ITEM_ANIM_ATTACH",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(85, 3))],
    },
    OpcodeSchema {
        name: "ITEM_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(123, 3))],
    },
    OpcodeSchema {
        name: "LIGHT_AUTH",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(114, 2))],
    },
    OpcodeSchema {
        name: "LIGHT_POS",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(88, 4))],
    },
    OpcodeSchema {
        name: "LIGHT_ROT",
        desc: None,
        default: op(51, 3),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "LOOK_ANIM",
        desc: None,
        default: op(21, 4),
        overrides: &[(Game::PDA12, op(21, 3)), (Game::PSP1, op(21, 3))],
    },
    OpcodeSchema {
        name: "LOOK_CAMERA",
        desc: None,
        default: op(23, 5),
        overrides: &[(Game::PDA12, op(23, 4)), (Game::PSP1, op(23, 4))],
    },
    OpcodeSchema {
        name: "LOOK_CAMERA_FACE_LIMIT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(122, 5))],
    },
    OpcodeSchema {
        name: "LYRIC",
        desc: Some("Display a lyric."),
        default: op_with(
            24,
            &[
                req("id", "lyric line number", ParamKind::Int),
                opt("color", "color of lyrics", ParamKind::Int, -1),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                24,
                &[
                    req("id", "lyric line number", ParamKind::Int),
                ],
            )),
            (Game::PSP1, op_with(
                24,
                &[
                    req("id", "lyric line number", ParamKind::Int),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "LYRIC_2",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(107, 2))],
    },
    OpcodeSchema {
        name: "LYRIC_READ",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(108, 2))],
    },
    OpcodeSchema {
        name: "LYRIC_READ_2",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(109, 2))],
    },
    OpcodeSchema {
        name: "MANUAL_CAPTURE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(98, 1)), (Game::X, op(98, 1))],
    },
    OpcodeSchema {
        name: "MAN_CAP",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(98, 1))],
    },
    OpcodeSchema {
        name: "MARKER",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(125, 2))],
    },
    OpcodeSchema {
        name: "MIKUDAYO_ADJUST",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(106, 7))],
    },
    OpcodeSchema {
        name: "MIKU_DISP",
        desc: Some("Show or hide a character."),
        default: op_with(
            4,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("visible", "visible or not", ParamKind::Bool),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                4,
                &[
                    req("visible", "visible or not", ParamKind::Bool),
                ],
            )),
            (Game::PSP1, op_with(
                4,
                &[
                    req("visible", "visible or not", ParamKind::Bool),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "MIKU_MOVE",
        desc: Some("Move a character."),
        default: op_with(
            2,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("x", "x position", ParamKind::Decimal { places: 3 }),
                req("y", "y position", ParamKind::Decimal { places: 3 }),
                req("z", "z position", ParamKind::Decimal { places: 3 }),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                2,
                &[
                    req("x", "x position", ParamKind::Decimal { places: 3 }),
                    req("y", "y position", ParamKind::Decimal { places: 3 }),
                    req("z", "z position", ParamKind::Decimal { places: 3 }),
                ],
            )),
            (Game::PSP1, op_with(
                2,
                &[
                    req("x", "x position", ParamKind::Decimal { places: 3 }),
                    req("y", "y position", ParamKind::Decimal { places: 3 }),
                    req("z", "z position", ParamKind::Decimal { places: 3 }),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "MIKU_ROT",
        desc: Some("Rotate a character."),
        default: op_with(
            3,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("angle", "angle", ParamKind::Int),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                3,
                &[
                    req("angle", "angle", ParamKind::Int),
                ],
            )),
            (Game::PSP1, op_with(
                3,
                &[
                    req("angle", "angle", ParamKind::Int),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "MIKU_SHADOW",
        desc: Some("Show or hide a character's shadow."),
        default: op_with(
            5,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("visible", "shadow visible or not(?) (does nothing in AFT)", ParamKind::Bool),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                5,
                &[
                    req("visible", "shadow visible or not(?) (does nothing in AFT)", ParamKind::Bool),
                ],
            )),
            (Game::PSP1, op_with(
                5,
                &[
                    req("visible", "shadow visible or not(?) (does nothing in AFT)", ParamKind::Bool),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "MODE_SELECT",
        desc: None,
        default: op(26, 2),
        overrides: &[(Game::PDA12, op(26, 1)), (Game::PSP1, op(26, 1))],
    },
    OpcodeSchema {
        name: "MOUTH_ANIM",
        desc: Some("Set a character's mouth animation."),
        default: op_with(
            19,
            &[
                req("chara", "chara slot", ParamKind::Int),
                None,
                req("id", "mouth animation number", ParamKind::Int),
                req("in_time", "animation in time? (ms)", ParamKind::Int),
                req("speed", "animation speed? (ms)", ParamKind::Int),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                19,
                &[
                    req("id", "mouth animation number", ParamKind::Int),
                    req("in_time", "animation in time? (ms)", ParamKind::Int),
                    req("speed", "animation speed? (ms)", ParamKind::Int),
                ],
            )),
            (Game::PSP1, op_with(
                19,
                &[
                    req("id", "mouth animation number", ParamKind::Int),
                    req("in_time", "animation in time? (ms)", ParamKind::Int),
                    req("speed", "animation speed? (ms)", ParamKind::Int),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "MOVE_CAMERA",
        desc: None,
        default: op(31, 21),
        overrides: &[(Game::PDA12, op(31, 19)), (Game::PSP1, op(31, 19)), (Game::X, None)],
    },
    OpcodeSchema {
        name: "MOVE_FIELD",
        desc: None,
        default: op(16, 3),
        overrides: &[],
    },
    OpcodeSchema {
        name: "MOVIE_CUT",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(102, 1)), (Game::X, op(102, 1))],
    },
    OpcodeSchema {
        name: "MOVIE_CUT_CHG",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(102, 1))],
    },
    OpcodeSchema {
        name: "MOVIE_DISP",
        desc: None,
        default: op_with(
            68,
            &[
                req("visible", "visible or not", ParamKind::Bool),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None), (Game::PSP2, None)],
    },
    OpcodeSchema {
        name: "MOVIE_PLAY",
        desc: Some("Start movie playback."),
        default: op_with(
            67,
            &[
                req("play", "play or not (must be true for AFT to do anything)", ParamKind::Bool),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None), (Game::PSP2, None)],
    },
    OpcodeSchema {
        name: "MUSIC_PLAY",
        desc: Some("Start music playback."),
        default: op(25, 0),
        overrides: &[],
    },
    OpcodeSchema {
        name: "NEAR_CLIP",
        desc: None,
        default: op(49, 2),
        overrides: &[(Game::PDA12, op(34, 2)), (Game::PSP1, op(34, 2))],
    },
    OpcodeSchema {
        name: "OSAGE_MV_CCL",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(71, 3)),
            (Game::FT, op(71, 3)),
            (Game::X, op(71, 3)),
            (Game::F, op(71, 3)),
        ],
    },
    OpcodeSchema {
        name: "OSAGE_STEP",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(70, 3)),
            (Game::FT, op(70, 3)),
            (Game::X, op(70, 3)),
            (Game::F, op(70, 3)),
        ],
    },
    OpcodeSchema {
        name: "PARTS_DISP",
        desc: None,
        default: op(57, 3),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "PSE",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(106, 2))],
    },
    OpcodeSchema {
        name: "PV_AUTH_LIGHT_PRIORITY",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(88, 2)), (Game::X, op(88, 2))],
    },
    OpcodeSchema {
        name: "PV_BRANCH_MODE",
        desc: Some("Restricts future commands to a either normal or success branch."),
        default: op_with(
            65,
            &[
                req("branch", "which branch to set", ParamKind::Enum(BRANCH_MODES)),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None), (Game::PSP2, None)],
    },
    OpcodeSchema {
        name: "PV_CHARA_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(89, 3)), (Game::X, op(89, 3))],
    },
    OpcodeSchema {
        name: "PV_END",
        desc: Some("Ends PV playback."),
        default: op(32, 0),
        overrides: &[],
    },
    OpcodeSchema {
        name: "PV_END_FADEOUT",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(83, 2)),
            (Game::FT, op(83, 2)),
            (Game::X, op(83, 2)),
            (Game::F, op(83, 2)),
        ],
    },
    OpcodeSchema {
        name: "PV_STAGE_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(90, 3)), (Game::X, op(90, 3))],
    },
    OpcodeSchema {
        name: "REFLECTION",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(79, 2))],
    },
    OpcodeSchema {
        name: "REFLECTION_QUALITY",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(82, 2))],
    },
    OpcodeSchema {
        name: "RESERVE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(87, 9)), (Game::X, op(117, 2))],
    },
    OpcodeSchema {
        name: "SATURATE",
        desc: None,
        default: op(54, 1),
        overrides: &[(Game::PDA12, op(38, 1)), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "SCENE_FADE",
        desc: None,
        default: op(52, 6),
        overrides: &[(Game::PDA12, op(36, 6)), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "SCENE_ROT",
        desc: None,
        default: op(63, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "SET_CAMERA",
        desc: None,
        default: op(12, 6),
        overrides: &[],
    },
    OpcodeSchema {
        name: "SET_CHARA",
        desc: None,
        default: op(37, 1),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "SET_MOTION",
        desc: Some("Set a character's motion."),
        default: op(7, 4),
        overrides: &[(Game::PDA12, op(7, 3)), (Game::PSP1, op(7, 3))],
    },
    OpcodeSchema {
        name: "SET_PLAYDATA",
        desc: None,
        default: op(8, 2),
        overrides: &[(Game::PDA12, op(8, 1)), (Game::PSP1, op(8, 1))],
    },
    OpcodeSchema {
        name: "SET_STAGE_EFFECT_ENV",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(116, 2))],
    },
    OpcodeSchema {
        name: "SE_EFFECT",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(73, 1)),
            (Game::FT, op(73, 1)),
            (Game::X, op(73, 1)),
            (Game::F, op(73, 1)),
        ],
    },
    OpcodeSchema {
        name: "SHADOWHEIGHT",
        desc: Some("Set the height of a character's shadow(?)."),
        default: op_with(
            29,
            &[
                req("chara", "chara slot", ParamKind::Int),
                req("height", "height (length?) of the shadow(?) (does nothing in AFT)", ParamKind::Int),
            ],
        ),
        overrides: &[
            (Game::PDA12, op_with(
                29,
                &[
                    req("height", "height (length?) of the shadow(?) (does nothing in AFT)", ParamKind::Int),
                ],
            )),
            (Game::PSP1, op_with(
                29,
                &[
                    req("height", "height (length?) of the shadow(?) (does nothing in AFT)", ParamKind::Int),
                ],
            )),
        ],
    },
    OpcodeSchema {
        name: "SHADOWPOS",
        desc: None,
        default: op(33, 3),
        overrides: &[(Game::PDA12, op(33, 2)), (Game::PSP1, op(33, 2))],
    },
    OpcodeSchema {
        name: "SHADOW_CAST",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(90, 2))],
    },
    OpcodeSchema {
        name: "SHADOW_RANGE",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(86, 1))],
    },
    OpcodeSchema {
        name: "SHIMMER",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(100, 3)), (Game::FT, op(100, 3)), (Game::X, op(100, 3))],
    },
    OpcodeSchema {
        name: "SONG_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(112, 3))],
    },
    OpcodeSchema {
        name: "SONG_EFFECT_ALPHA_SORT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(121, 3))],
    },
    OpcodeSchema {
        name: "SONG_EFFECT_ATTACH",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(113, 3))],
    },
    OpcodeSchema {
        name: "STAGE_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(111, 2))],
    },
    OpcodeSchema {
        name: "STAGE_LIGHT",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(104, 3))],
    },
    OpcodeSchema {
        name: "STAGE_SHADOW",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(81, 2))],
    },
    OpcodeSchema {
        name: "STAGE_SHADOW_QUALITY",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(75, 2))],
    },
    OpcodeSchema {
        name: "SUBFRAMERENDER",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(104, 1))],
    },
    OpcodeSchema {
        name: "TARGET",
        desc: Some("Add a rhythm game note."),
        default: op_with(
            6,
            &[
                req("type", "note type id", ParamKind::Int),
                req("pos_x", "x position", ParamKind::Decimal { places: 3 }),
                req("pos_y", "y position", ParamKind::Decimal { places: 3 }),
                req("angle", "fly angle", ParamKind::Decimal { places: 3 }),
                opt("dist", "fly distance", ParamKind::Decimal { places: 3 }, 1200000),
                opt("amp", "flying wave amplitude", ParamKind::Decimal { places: 3 }, 500),
                opt("freq", "flying wave frequency", ParamKind::Int, 2),
            ],
        ),
        overrides: &[
            (Game::F2, op(6, 12)),
            (Game::FT, op_with(
                6,
                &[
                    req("type", "note type id", ParamKind::Enum(TARGET_TYPES_FT)),
                    req("pos_x", "x position", ParamKind::Decimal { places: 3 }),
                    req("pos_y", "y position", ParamKind::Decimal { places: 3 }),
                    req("angle", "fly angle", ParamKind::Decimal { places: 3 }),
                    opt("dist", "fly distance", ParamKind::Decimal { places: 3 }, 1200000),
                    opt("amp", "flying wave amplitude", ParamKind::Decimal { places: 3 }, 500),
                    opt("freq", "flying wave frequency", ParamKind::Int, 2),
                ],
            )),
            (Game::X, op(6, 12)),
            (Game::F, op(6, 11)),
        ],
    },
    OpcodeSchema {
        name: "TARGET_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(91, 11)), (Game::X, op(91, 11))],
    },
    OpcodeSchema {
        name: "TARGET_FLAG",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(84, 1))],
    },
    OpcodeSchema {
        name: "TARGET_FLYING_TIME",
        desc: None,
        default: op_with(
            58,
            &[
                req("time", "flying time", ParamKind::Int),
            ],
        ),
        overrides: &[(Game::PDA12, None), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "TECH_DEMO_GESUTRE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(149, 2))],
    },
    OpcodeSchema {
        name: "TIME",
        desc: Some("Wait until a certain game time."),
        default: op_with(
            1,
            &[
                req("time", "time to wait until", ParamKind::Time),
            ],
        ),
        overrides: &[],
    },
    OpcodeSchema {
        name: "TONE_MAP",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(77, 2))],
    },
    OpcodeSchema {
        name: "TONE_TRANS",
        desc: None,
        default: op(53, 6),
        overrides: &[(Game::PDA12, op(37, 6)), (Game::PSP1, None)],
    },
    OpcodeSchema {
        name: "TOON",
        desc: None,
        default: None,
        overrides: &[(Game::FT, op(99, 3))],
    },
    OpcodeSchema {
        name: "TOON_EDGE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(99, 3)), (Game::X, op(99, 3))],
    },
    OpcodeSchema {
        name: "TOON＿EDGE",
        desc: None,
        default: None,
        overrides: &[(Game::F2, op(106, 2))],
    },
    OpcodeSchema {
        name: "VR_CHARA_PSMOVE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(143, 2))],
    },
    OpcodeSchema {
        name: "VR_CHEER",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(142, 2))],
    },
    OpcodeSchema {
        name: "VR_CHEMICAL_LIGHT_COLOR",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(150, 2))],
    },
    OpcodeSchema {
        name: "VR_LIVE_CHARA_VOICE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(162, 2))],
    },
    OpcodeSchema {
        name: "VR_LIVE_CHEER",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(154, 5))],
    },
    OpcodeSchema {
        name: "VR_LIVE_CLONE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(156, 7))],
    },
    OpcodeSchema {
        name: "VR_LIVE_FLY",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(161, 5))],
    },
    OpcodeSchema {
        name: "VR_LIVE_GESTURE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(155, 3))],
    },
    OpcodeSchema {
        name: "VR_LIVE_HAIR_OSAGE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(152, 9))],
    },
    OpcodeSchema {
        name: "VR_LIVE_LOOK_CAMERA",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(153, 9))],
    },
    OpcodeSchema {
        name: "VR_LIVE_MOB",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(151, 5))],
    },
    OpcodeSchema {
        name: "VR_LIVE_MOVIE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(141, 2))],
    },
    OpcodeSchema {
        name: "VR_LIVE_ONESHOT_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(158, 6))],
    },
    OpcodeSchema {
        name: "VR_LIVE_PRESENT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(159, 9))],
    },
    OpcodeSchema {
        name: "VR_LIVE_TRANSFORM",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(160, 5))],
    },
    OpcodeSchema {
        name: "VR_LOOP_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(157, 7))],
    },
    OpcodeSchema {
        name: "VR_MOVE_PATH",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(144, 2))],
    },
    OpcodeSchema {
        name: "VR_SET_BASE",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(145, 2))],
    },
    OpcodeSchema {
        name: "VR_TECH_DEMO_EFFECT",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(146, 2))],
    },
    OpcodeSchema {
        name: "VR_TRANSFORM",
        desc: None,
        default: None,
        overrides: &[(Game::X, op(147, 2))],
    },
    OpcodeSchema {
        name: "WIND",
        desc: None,
        default: None,
        overrides: &[
            (Game::F2, op(69, 3)),
            (Game::FT, op(69, 3)),
            (Game::X, op(69, 3)),
            (Game::F, op(69, 3)),
        ],
    },
];
