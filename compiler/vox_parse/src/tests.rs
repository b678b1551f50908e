use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vox_ir::{AstNode, StandardOperators};
use vox_lexer::LexErrorKind;

use super::*;

fn sexpr(node: &AstNode) -> String {
    let mut out = node.text().to_string();
    if !node.children.is_empty() {
        let children: Vec<String> = node.children.iter().map(sexpr).collect();
        out = format!("({out} {})", children.join(" "));
    }
    out
}

fn parse_tree(source: &str) -> AstNode {
    match parse_source(source, &StandardOperators) {
        Ok(Some(tree)) => tree,
        other => panic!("{source:?} did not parse to a tree: {other:?}"),
    }
}

#[test]
fn lex_errors_surface_through_parse_source() {
    let err = parse_source("1 + 'open", &StandardOperators).unwrap_err();
    match err {
        SyntaxError::Lex(lex) => assert_eq!(lex.kind, LexErrorKind::UnterminatedString),
        SyntaxError::Parse(parse) => panic!("expected a lex error, got {parse}"),
    }
}

#[test]
fn printed_expressions_normalize_parentheses() {
    assert_eq!(parse_tree("((2 + 3)) * (4)").to_expression_string(), "(2 + 3) * 4");
    assert_eq!(parse_tree("2+3*4").to_expression_string(), "2 + 3 * 4");
    assert_eq!(
        parse_tree("Max( [a] ,-1 )").to_expression_string(),
        "Max([a], -1)"
    );
    assert_eq!(
        parse_tree("true?1:(false?2:3)").to_expression_string(),
        "true ? 1 : false ? 2 : 3"
    );
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        "[abc]",
        Just("'x'".to_string()),
        Just("true".to_string()),
        Just("[hp]".to_string()),
        Just("Now()".to_string()),
    ];
    leaf.prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "=", "<>", "<", ">=", "and", "or"]),
                inner.clone(),
            )
                .prop_map(|(a, op, b)| format!("({a} {op} {b})")),
            inner.clone().prop_map(|a| format!("-{a}")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("({c} ? {a} : {b})")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("Max({a}, {b})")),
        ]
    })
}

proptest! {
    #[test]
    fn printed_tree_reparses_to_same_shape(source in expression()) {
        let tree = parse_tree(&source);
        let printed = tree.to_expression_string();
        let reparsed = parse_tree(&printed);
        prop_assert_eq!(sexpr(&reparsed), sexpr(&tree), "printed as {}", printed);
    }
}
