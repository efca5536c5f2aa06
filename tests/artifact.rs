use json_arena::{
    build_from_str, compile_str, emit, emit_to_writer, ArenaKind, EmitOptions, Error, ErrorKind,
    SizeMode,
};
use rstest::rstest;

const INPUT: &str = r#"{"title":"arena","tags":["a","b","a"],"ratio":0.75,"count":-3,"ok":true}"#;

#[rstest]
fn emission_is_deterministic() {
    let options = EmitOptions::new("sample");
    let first = compile_str(INPUT, &options).unwrap();
    let second = compile_str(INPUT, &options).unwrap();
    assert_eq!(first, second);
}

#[rstest]
fn artifact_has_module_shape() {
    let source = compile_str(INPUT, &EmitOptions::new("sample")).unwrap();

    assert!(source.starts_with("// @generated by json2rs. Do not edit.\n"));
    assert!(source.contains("pub mod sample {"));
    assert!(source.contains("use ::json_arena::{Document, Member, Span, Value, ValueRef};"));
    assert!(source.contains("pub static DOCUMENT: Document<'static> = Document {"));
    assert!(source.contains("text: \"titlearenatagsabratiocountok\","));
    assert!(source.contains("root: ValueRef::object(0),"));
    assert!(source.contains("pub fn root() -> Value<'static> {"));
    assert!(source.ends_with("}\n"));
}

#[rstest]
fn large_mode_hoists_arenas() {
    let options = EmitOptions::new("sample").with_mode(SizeMode::Large);
    let source = compile_str(INPUT, &options).unwrap();

    assert!(source.contains("static INTS: [i64; 1] = ["));
    assert!(source.contains("static FLOATS: [f64; 1] = ["));
    assert!(source.contains("const TEXT: &str = "));
    assert!(source.contains("static MEMBERS: [Member; 5] = ["));
    assert!(source.contains("ints: &INTS,"));
    assert!(source.contains("text: TEXT,"));
    assert!(!source.contains("ints: &["));
}

#[rstest]
#[case::standard(SizeMode::Standard)]
#[case::large(SizeMode::Large)]
fn size_mode_does_not_change_content(#[case] mode: SizeMode) {
    let built = build_from_str(INPUT).unwrap();
    let source = emit(&built.document(), &EmitOptions::new("sample").with_mode(mode)).unwrap();
    assert!(source.contains("ValueRef::TRUE"));
    assert!(source.contains("-3,"));
    assert!(source.contains("0.75,"));
}

#[rstest]
fn arena_limit_is_enforced_before_writing() {
    let built = build_from_str(INPUT).unwrap();
    let options = EmitOptions::new("sample").with_arena_limit(Some(4));
    let mut out = Vec::new();

    let err = emit_to_writer(&mut out, &built.document(), &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmissionOverflow);
    match err {
        Error::EmissionOverflow { kind, limit, .. } => {
            assert_eq!(kind, ArenaKind::Text);
            assert_eq!(limit, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.is_empty());
}

#[rstest]
#[case::keyword("match")]
#[case::leading_digit("1st")]
#[case::dash("my-doc")]
#[case::empty("")]
fn invalid_module_names_are_rejected(#[case] name: &str) {
    let err = compile_str(INPUT, &EmitOptions::new(name)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidName);
}

#[rstest]
fn custom_crate_path_is_used() {
    let options = EmitOptions::new("sample").with_crate_path("crate::arena");
    let source = compile_str(INPUT, &options).unwrap();
    assert!(source.contains("use crate::arena::{Document, Member, Span, Value, ValueRef};"));
}

#[rstest]
fn parse_errors_carry_a_location() {
    let err = compile_str("{\n  \"a\": [1, 2,\n}", &EmitOptions::new("broken")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    let location = err.location().expect("location");
    assert_eq!(location.line, 3);
}
