//! Schema DSL tests: syntax (parse success/failure) and kind resolution.

use pdatagen::schema::{OneOfField, VariantKind};
use pdatagen::{parse, FieldKind, Literal, PrimitiveType, SchemaError};

fn single_struct(body: &str) -> String {
    format!(
        r#"
file test {{
    module "ptest";
    struct Thing wraps otlptest::Thing {{
{body}
    }}
}}
"#
    )
}

// ==================== Syntax: valid schemas ====================

#[test]
fn parse_minimal_file() {
    let f = parse(r#"file empty { module "pempty"; }"#).expect("parse");
    assert_eq!(f.name, "empty");
    assert_eq!(f.module, "pempty");
    assert!(f.structs.is_empty());
    assert_eq!(f.wrapper_file_name(), "generated_empty.rs");
}

#[test]
fn parse_imports_and_doc_comments() {
    let src = r#"
// plain comments are ignored
file logs {
    module "plog";
    imports {
        "crate::internal::{Map, Orig, Slice, Wrap}";
        "crate::proto::otlplogs";
    }
    test_imports { "crate::internal::fill_test_map"; }

    /// LogRecord is a log entry.
    ///
    /// Second paragraph.
    struct LogRecord wraps otlplogs::LogRecord {
        /* block comment */
        severity_text: string test "INFO";
    }
}
"#;
    let f = parse(src).expect("parse");
    assert_eq!(f.imports, vec!["crate::internal::{Map, Orig, Slice, Wrap}", "crate::proto::otlplogs"]);
    assert_eq!(f.test_imports, vec!["crate::internal::fill_test_map"]);
    let s = f.get_struct("LogRecord").expect("struct");
    assert_eq!(s.description, vec!["LogRecord is a log entry.", "", "Second paragraph."]);
    assert_eq!(s.orig_full_name, "otlplogs::LogRecord");
    assert_eq!(s.snake_name(), "log_record");
    assert_eq!(s.slice_name(), "LogRecordSlice");
}

#[test]
fn parse_all_primitive_types() {
    let src = single_struct(
        r#"
        a: bool test true;
        b: int32 test -5;
        c: int64 = 7 test 9;
        d: uint32 test 17;
        e: uint64 test 1234567890;
        f: double test 1.5;
        g: string = "none" test "x";
        h: bytes test [1, 2, 255];
"#,
    );
    let f = parse(&src).expect("parse");
    let fields = &f.structs[0].fields;
    assert_eq!(fields.len(), 8);
    let kinds: Vec<&str> = fields.iter().map(|f| f.kind.keyword()).collect();
    assert_eq!(kinds, vec!["bool", "int32", "int64", "uint32", "uint64", "double", "string", "bytes"]);
    match &fields[2].kind {
        FieldKind::Primitive(p) => {
            assert_eq!(p.ty, PrimitiveType::Int64);
            assert_eq!(p.default, Literal::Int(7));
            assert_eq!(p.test, Literal::Int(9));
        }
        other => panic!("unexpected kind {other:?}"),
    }
    match &fields[7].kind {
        FieldKind::Primitive(p) => assert_eq!(p.test, Literal::Bytes(vec![1, 2, 255])),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn primitive_default_falls_back_to_zero() {
    let f = parse(&single_struct("name: string test \"x\";")).expect("parse");
    match &f.structs[0].fields[0].kind {
        FieldKind::Primitive(p) => assert_eq!(p.default, Literal::String(String::new())),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn parse_composite_kinds() {
    let src = single_struct(
        r#"
        body: message AnyValue;
        records: repeated LogRecord;
        attributes: map;
"#,
    );
    let f = parse(&src).expect("parse");
    let fields = &f.structs[0].fields;
    assert!(matches!(&fields[0].kind, FieldKind::MessageValue(m) if m.struct_name == "AnyValue"));
    assert!(matches!(&fields[1].kind, FieldKind::RepeatedMessage(r) if r.struct_name == "LogRecord"));
    assert!(matches!(&fields[2].kind, FieldKind::KVMapping(_)));
    assert_eq!(fields[0].kind.referenced_structs(), vec!["AnyValue"]);
    assert!(fields[2].kind.referenced_structs().is_empty());
}

#[test]
fn parse_oneof() {
    let src = single_struct(
        r#"
        value: oneof AnyValueType otlpcommon::any_value::Value {
            str: StringValue string test "v";
            int: IntValue int64 test 3;
            array: ArrayValue message ArrayValue;
        }
"#,
    );
    let f = parse(&src).expect("parse");
    let FieldKind::OneOf(OneOfField {
        type_name,
        orig_enum,
        variants,
    }) = &f.structs[0].fields[0].kind
    else {
        panic!("expected oneof");
    };
    assert_eq!(type_name, "AnyValueType");
    assert_eq!(orig_enum, "otlpcommon::any_value::Value");
    assert_eq!(variants.len(), 3);
    assert_eq!(variants[0].orig_variant, "StringValue");
    assert!(matches!(
        &variants[1].kind,
        VariantKind::Primitive { ty: PrimitiveType::Int64, test: Literal::Int(3) }
    ));
    assert!(matches!(&variants[2].kind, VariantKind::Message(s) if s == "ArrayValue"));
    assert_eq!(f.structs[0].fields[0].kind.referenced_structs(), vec!["ArrayValue"]);
}

#[test]
fn parse_escaped_string_literal() {
    let f = parse(&single_struct(r#"name: string test "a \"quoted\" value";"#)).expect("parse");
    match &f.structs[0].fields[0].kind {
        FieldKind::Primitive(p) => assert_eq!(p.test.to_string(), r#""a \"quoted\" value""#),
        other => panic!("unexpected kind {other:?}"),
    }
}

// ==================== Syntax: invalid schemas ====================

#[test]
fn parse_unclosed_brace_fails() {
    let r = parse(r#"file f { module "p"; struct S wraps a::S { x: map; }"#);
    assert!(matches!(r, Err(SchemaError::Parse(_))), "unclosed brace should fail: {r:?}");
}

#[test]
fn parse_missing_semicolon_fails() {
    assert!(matches!(parse(&single_struct("x: map")), Err(SchemaError::Parse(_))));
}

#[test]
fn parse_two_files_fails() {
    let src = r#"file a { module "a"; } file b { module "b"; }"#;
    assert!(matches!(parse(src), Err(SchemaError::Parse(_))));
}

#[test]
fn parse_missing_module_fails() {
    assert!(matches!(parse("file f { }"), Err(SchemaError::MissingModule(name)) if name == "f"));
}

// ==================== Kind resolution ====================

#[test]
fn unknown_kind_fails() {
    match parse(&single_struct("x: float test 1.0;")) {
        Err(SchemaError::UnknownKind { location, kind }) => {
            assert_eq!(location, "Thing.x");
            assert_eq!(kind, "float");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn wrong_literal_type_fails() {
    assert!(matches!(
        parse(&single_struct("x: uint32 test -1;")),
        Err(SchemaError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        parse(&single_struct("x: string test 5;")),
        Err(SchemaError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        parse(&single_struct("x: int32 test 3000000000;")),
        Err(SchemaError::InvalidLiteral { .. })
    ));
}

#[test]
fn primitive_without_test_value_fails() {
    assert!(matches!(
        parse(&single_struct("x: string;")),
        Err(SchemaError::MissingTestValue { .. })
    ));
}

#[test]
fn composite_with_literal_fails() {
    assert!(matches!(
        parse(&single_struct("x: map test 1;")),
        Err(SchemaError::UnexpectedLiteral { .. })
    ));
}

#[test]
fn arity_mismatch_fails() {
    match parse(&single_struct("x: message;")) {
        Err(SchemaError::Arity { expected, found, .. }) => {
            assert_eq!(expected, 1);
            assert_eq!(found, 0);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        parse(&single_struct("x: map Extra;")),
        Err(SchemaError::Arity { .. })
    ));
}

#[test]
fn oneof_without_variants_fails() {
    assert!(matches!(
        parse(&single_struct("x: oneof T a::b::Value { }")),
        Err(SchemaError::EmptyOneOf { .. })
    ));
}

#[test]
fn body_on_non_oneof_fails() {
    assert!(matches!(
        parse(&single_struct("x: map { a: A string test \"\"; }")),
        Err(SchemaError::UnexpectedBody { .. })
    ));
}

#[test]
fn oneof_variant_with_unknown_kind_fails() {
    match parse(&single_struct("x: oneof T a::Value { v: V float test 1.0; }")) {
        Err(SchemaError::UnknownKind { location, .. }) => assert_eq!(location, "Thing.x.v"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn string_literal_with_non_rust_escape_fails() {
    match parse(&single_struct(r#"s: string test "\q";"#)) {
        Err(SchemaError::InvalidLiteral { location, ty, .. }) => {
            assert_eq!(location, "Thing.s");
            assert_eq!(ty, "string");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        parse(&single_struct(r#"s: string = "\x80" test "ok";"#)),
        Err(SchemaError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        parse(&single_struct(r#"v: oneof T a::Value { s: S string test "\u{D800}"; }"#)),
        Err(SchemaError::InvalidLiteral { .. })
    ));
    assert!(parse(&single_struct(r#"s: string test "tab\t\u{e9}\x41";"#)).is_ok());
}

#[test]
fn parse_enum_kind() {
    let f = parse(&single_struct(
        "severity_number: enum SeverityNumber test 9;\nkind: enum SpanKind = 1 test 2;",
    ))
    .expect("parse");
    let fields = &f.structs[0].fields;
    match &fields[0].kind {
        FieldKind::Enum(e) => {
            assert_eq!(e.type_name, "SeverityNumber");
            assert_eq!(e.default, 0);
            assert_eq!(e.test, 9);
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert!(matches!(&fields[1].kind, FieldKind::Enum(e) if e.default == 1 && e.test == 2));
    assert_eq!(fields[0].kind.keyword(), "enum");
    assert!(fields[0].kind.referenced_structs().is_empty());
}

#[test]
fn enum_kind_errors() {
    assert!(matches!(
        parse(&single_struct("s: enum test 1;")),
        Err(SchemaError::Arity { expected: 1, found: 0, .. })
    ));
    assert!(matches!(
        parse(&single_struct("s: enum SeverityNumber;")),
        Err(SchemaError::MissingTestValue { .. })
    ));
    match parse(&single_struct("s: enum SeverityNumber test \"INFO\";")) {
        Err(SchemaError::InvalidLiteral { ty, .. }) => assert_eq!(ty, "enum"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        parse(&single_struct("s: enum SeverityNumber test 3000000000;")),
        Err(SchemaError::InvalidLiteral { .. })
    ));
}
