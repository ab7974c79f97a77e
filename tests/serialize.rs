use jsontree::{
    parse, serialize, serialize_to_vec, serialize_to_writer, serialize_with_options,
    EncodeOptions, ErrorKind, ErrorStage, HexCase, Node, NodeList,
};
use rstest::rstest;

#[rstest]
fn reproduces_compact_input() {
    let input = r#"{"a":1,"b":[1,2,3]}"#;
    let tree = parse(input).unwrap();
    assert_eq!(serialize(&tree).unwrap(), input);
}

#[rstest]
fn reemits_two_byte_escape() {
    let tree = parse(r#""\u00e9""#).unwrap();
    assert_eq!(serialize(&tree).unwrap(), r#""\u00e9""#);

    let upper = EncodeOptions::new().with_hex_case(HexCase::Upper);
    assert_eq!(serialize_with_options(&tree, &upper).unwrap(), r#""\u00E9""#);
}

#[rstest]
#[case("\"\u{1F600}\"", "\"\u{1F600}\"")]
#[case(r#""a\"b\\c\/d""#, r#""a\"b\\c\/d""#)]
#[case(r#""\u0001\n\t""#, r#""\u0001\n\t""#)]
#[case(r#""\u20ac""#, r#""\u20ac""#)]
fn string_escapes_round_trip(#[case] input: &str, #[case] expected: &str) {
    let tree = parse(input).unwrap();
    assert_eq!(serialize(&tree).unwrap(), expected);
}

#[rstest]
fn raw_unicode_when_escaping_disabled() {
    let tree = Node::from("caf\u{e9}/");
    let options = EncodeOptions::new()
        .with_escape_unicode(false)
        .with_escape_slash(false);
    assert_eq!(
        serialize_with_options(&tree, &options).unwrap(),
        "\"caf\u{e9}/\""
    );
}

#[rstest]
fn floats_reparse_as_floats() {
    let mut array = Node::array();
    for value in [0.1, 1.0, -2.5e-8, 1e21] {
        array.push(Node::Float(value)).unwrap();
    }
    let text = serialize(&array).unwrap();
    let back = parse(&text).unwrap();
    assert_eq!(back, array);
}

#[rstest]
fn rejects_key_inside_array() {
    let key = Node::key("k", Node::Int(1)).unwrap();
    let array = Node::Array(NodeList::from(vec![Node::Int(0), key]));
    let err = serialize(&array).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType);
    assert_eq!(err.stage, ErrorStage::Serialize);
}

#[rstest]
fn rejects_non_key_inside_object() {
    let object = Node::Object(NodeList::from(vec![Node::from("loose")]));
    assert_eq!(serialize(&object).unwrap_err().kind, ErrorKind::InvalidType);
}

#[rstest]
fn rejects_key_with_two_values() {
    let mut object = parse(r#"{"k":1}"#).unwrap();
    object
        .children_mut()
        .and_then(|children| children.first_mut())
        .unwrap()
        .push(Node::Int(2))
        .unwrap();
    let err = serialize(&object).unwrap_err();
    assert_eq!(err.kind, ErrorKind::KeyHasMultipleChildren);
    assert_eq!(err.code(), 2);
}

#[rstest]
fn byte_and_writer_outputs_match() {
    let tree = parse(r#"{"s":"x","n":[true,false]}"#).unwrap();
    let text = serialize(&tree).unwrap();
    assert_eq!(serialize_to_vec(&tree).unwrap(), text.as_bytes());

    let mut out = Vec::new();
    serialize_to_writer(&mut out, &tree).unwrap();
    assert_eq!(out, text.as_bytes());
}
