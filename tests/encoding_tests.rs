// tests/encoding_tests.rs

use matchers_lang::ast::{Argument, Expression, Literal, Node, Operator, Step};
use matchers_lang::{Ast, parse, parse_matchers, to_json, to_json_pretty, to_yaml};
use serde_json::json;

fn decode(value: serde_json::Value) -> Result<Node, serde_json::Error> {
    serde_json::from_value(value)
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_filter() {
    let node = parse(r#"interfaces.name=="eth1""#).unwrap();
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "expression": {
                "op": 1,
                "args": [
                    {"path": [{"ident": "interfaces"}, {"ident": "name"}]},
                    {"string": "eth1"}
                ]
            }
        })
    );
}

#[test]
fn test_encode_index_and_pipe() {
    let node = parse(r#"matchers.base | routes.running.0.table-id="main""#).unwrap();
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "expression": {
                "op": 1,
                "args": [{"path": [{"ident": "matchers"}, {"ident": "base"}]}]
            },
            "pipe": {
                "expression": {
                    "op": 2,
                    "args": [
                        {"path": [
                            {"ident": "routes"},
                            {"ident": "running"},
                            {"idx": 0},
                            {"ident": "table-id"}
                        ]},
                        {"string": "main"}
                    ]
                }
            }
        })
    );
}

#[test]
fn test_encode_merge_and_numbers() {
    let node = Node::new(Expression::new(
        Operator::Merge,
        Argument::Path(vec![Step::identifier("a")]),
        Some(Argument::Literal(Literal::Integer(254))),
    ));
    assert_eq!(
        to_json(&node).unwrap(),
        r#"{"expression":{"op":3,"args":[{"path":[{"ident":"a"}]},{"num":254}]}}"#
    );
}

#[test]
fn test_encode_ast_keeps_order() {
    let ast = parse_matchers([("zeta", "a"), ("alpha", "b")]).unwrap();
    let json = to_json(&ast).unwrap();
    assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
}

#[test]
fn test_pretty_and_yaml_output() {
    let node = parse("interfaces").unwrap();
    let pretty = to_json_pretty(&node).unwrap();
    assert!(pretty.contains('\n'));

    let yaml = to_yaml(&node).unwrap();
    assert!(yaml.contains("ident: interfaces"));
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_round_trip() {
    let ast = parse_matchers([
        ("default-gw", r#"routes.running.destination=="0.0.0.0/0""#),
        (
            "bridge",
            r#"matchers.default-gw | routes.running.next-hop-interface="br1" | routes.running.0.table-id"#,
        ),
    ])
    .unwrap();

    let json = to_json(&ast).unwrap();
    let decoded: Ast = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, ast);
}

#[test]
fn test_decode_float_literal() {
    let node = decode(json!({
        "expression": {"op": 1, "args": [{"path": [{"ident": "mtu"}]}, {"num": 1.5}]}
    }))
    .unwrap();
    assert_eq!(
        node.expression.rhs,
        Some(Argument::Literal(Literal::Float(1.5)))
    );
}

#[test]
fn test_decode_missing_or_zero_operator_is_filter() {
    for encoded in [
        json!({"expression": {"args": [{"path": [{"ident": "a"}]}]}}),
        json!({"expression": {"op": 0, "args": [{"path": [{"ident": "a"}]}]}}),
    ] {
        let node = decode(encoded).unwrap();
        assert_eq!(node.expression.operator, Operator::Filter);
        assert!(node.pipe.is_none());
    }
}

#[test]
fn test_decode_rejects_unknown_operator() {
    let err = decode(json!({"expression": {"op": 9, "args": [{"path": [{"ident": "a"}]}]}}))
        .unwrap_err();
    assert!(err.to_string().contains("unknown operator code 9"));
}

#[test]
fn test_decode_rejects_bad_steps() {
    let ambiguous = decode(json!({
        "expression": {"op": 1, "args": [{"path": [{"idx": 0, "ident": "a"}]}]}
    }));
    assert!(ambiguous.is_err());

    let empty = decode(json!({"expression": {"op": 1, "args": [{"path": [{}]}]}}));
    assert!(empty.is_err());
}

#[test]
fn test_decode_rejects_bad_arguments() {
    let test_cases = vec![
        json!({"expression": {"op": 1, "args": []}}),
        json!({"expression": {"op": 1, "args": [{}]}}),
        json!({"expression": {"op": 1, "args": [{"path": []}]}}),
        json!({"expression": {"op": 1, "args": [{"string": "a", "num": 1}]}}),
        json!({"expression": {"op": 1, "args": [{"string": "a"}, {"string": "b"}, {"string": "c"}]}}),
    ];

    for encoded in test_cases {
        assert!(decode(encoded.clone()).is_err(), "Failed for: {}", encoded);
    }
}
