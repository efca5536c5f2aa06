use json_arena::build_from_str;
use rstest::rstest;
use serde_json::json;

fn same(left: &str, right: &str) -> bool {
    let (left, right) = (build_from_str(left).unwrap(), build_from_str(right).unwrap());
    let (left, right) = (left.document(), right.document());
    left.root() == right.root()
}

#[rstest]
#[case::member_order(r#"{"a":1,"b":2}"#, r#"{"b":2,"a":1}"#)]
#[case::nested_order(r#"{"x":{"p":[1],"q":null}}"#, r#"{"x":{"q":null,"p":[1]}}"#)]
#[case::repeated_key_collapses(r#"{"k":1,"k":9}"#, r#"{"k":1}"#)]
#[case::empty("{}", "{}")]
#[case::strings(r#""é""#, r#""é""#)]
#[case::exponent("1.5e2", "150.0")]
fn equal_documents(#[case] left: &str, #[case] right: &str) {
    assert!(same(left, right));
    assert!(same(right, left));
}

#[rstest]
#[case::int_vs_float("1", "1.0")]
#[case::array_order("[1,2]", "[2,1]")]
#[case::array_length("[1]", "[1,1]")]
#[case::first_binding_differs(r#"{"k":9,"k":1}"#, r#"{"k":1}"#)]
#[case::missing_key(r#"{"a":1}"#, r#"{"a":1,"b":2}"#)]
#[case::kind("null", "false")]
#[case::empty_containers("[]", "{}")]
fn different_documents(#[case] left: &str, #[case] right: &str) {
    assert!(!same(left, right));
    assert!(!same(right, left));
}

#[rstest]
fn comparison_with_json_values() {
    let built = build_from_str(r#"{"n":1,"f":0.5,"s":"x","l":[null,true]}"#).unwrap();
    let doc = built.document();
    let root = doc.root();

    assert_eq!(root, json!({"l": [null, true], "s": "x", "f": 0.5, "n": 1}));
    assert_eq!(json!({"n": 1, "f": 0.5, "s": "x", "l": [null, true]}), root);
    assert_ne!(root, json!({"n": 1.0, "f": 0.5, "s": "x", "l": [null, true]}));
    assert_ne!(root, json!({"n": 1}));
}

#[rstest]
fn values_from_different_documents_compare_structurally() {
    let first = build_from_str(r#"{"shared":{"a":[1,2]},"extra":0}"#).unwrap();
    let second = build_from_str(r#"[{"a":[1,2]}]"#).unwrap();
    let (first, second) = (first.document(), second.document());

    let left = first.root().at("shared").unwrap();
    let right = second.root().at(0).unwrap();
    assert_eq!(left, right);
    assert_ne!(first.root(), second.root());
}
