use pretty_assertions::assert_eq;
use vox_ir::{Span, StandardOperators, TokenKind, UNARY_MINUS};

use super::*;

fn lex(source: &str) -> Vec<Token> {
    match tokenize(source, &StandardOperators) {
        Ok(tokens) => tokens,
        Err(err) => panic!("failed to lex {source:?}: {err}"),
    }
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<String> {
    lex(source).into_iter().map(|t| t.text).collect()
}

fn lex_err(source: &str) -> LexError {
    match tokenize(source, &StandardOperators) {
        Ok(tokens) => panic!("expected error for {source:?}, got {tokens:?}"),
        Err(err) => err,
    }
}

// === Literals ===

#[test]
fn empty_and_blank_sources() {
    assert!(lex("").is_empty());
    assert!(lex("  \t\r\n ").is_empty());
}

#[test]
fn numbers() {
    assert_eq!(texts("12 + 3.5"), vec!["12", "+", "3.5"]);
    assert_eq!(kinds("12"), vec![TokenKind::Number]);
}

#[test]
fn number_keeps_whole_decimal_run() {
    // Validity of the digits is a compile-time concern.
    assert_eq!(texts("1.2.3"), vec!["1.2.3"]);
}

#[test]
fn delimited_literals_keep_delimiters() {
    let tokens = lex("'hi there' #2016-02-21# [player.hp]");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::String, TokenKind::Date, TokenKind::TableField]
    );
    assert_eq!(tokens[0].text, "'hi there'");
    assert_eq!(tokens[1].text, "#2016-02-21#");
    assert_eq!(tokens[2].text, "[player.hp]");
    assert_eq!(tokens[2].field_name(), "player.hp");
}

#[test]
fn keywords_any_case() {
    assert_eq!(
        kinds("TRUE False null NULL"),
        vec![
            TokenKind::Boolean,
            TokenKind::Boolean,
            TokenKind::Null,
            TokenKind::Null
        ]
    );
}

#[test]
fn keyword_prefix_is_an_identifier() {
    assert_eq!(kinds("trueish"), vec![TokenKind::TableField]);
    assert_eq!(kinds("nullable"), vec![TokenKind::TableField]);
    assert_eq!(kinds("order"), vec![TokenKind::TableField]);
}

// === Identifiers ===

#[test]
fn function_versus_bare_field() {
    assert_eq!(
        kinds("Max (a, b)"),
        vec![
            TokenKind::Function,
            TokenKind::LeftParen,
            TokenKind::TableField,
            TokenKind::Comma,
            TokenKind::TableField,
            TokenKind::RightParen,
        ]
    );
    let tokens = lex("name");
    assert_eq!(tokens[0].field_name(), "name");
}

#[test]
fn and_or_are_operators() {
    let tokens = lex("a AND b or c");
    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].precedence, 13);
    assert_eq!(tokens[3].kind, TokenKind::Operator);
    assert_eq!(tokens[3].precedence, 14);
}

// === Operators ===

#[test]
fn two_character_operators() {
    assert_eq!(
        texts("1 <= 2 >= 3 <> 4 != 5"),
        vec!["1", "<=", "2", ">=", "3", "<>", "4", "!=", "5"]
    );
}

#[test]
fn operator_precedence_from_table() {
    let tokens = lex("1 + 2 * 3");
    assert_eq!(tokens[1].precedence, 6);
    assert_eq!(tokens[3].precedence, 5);
    assert!(tokens[1].left_associative);
}

#[test]
fn unary_minus_at_literal_positions() {
    let tokens = lex("-1 - -2");
    assert_eq!(tokens[0].text, UNARY_MINUS);
    assert_eq!(tokens[0].precedence, 3);
    assert!(!tokens[0].left_associative);
    assert_eq!(tokens[2].text, "-");
    assert_eq!(tokens[2].precedence, 6);
    assert_eq!(tokens[3].text, UNARY_MINUS);
}

#[test]
fn minus_after_closing_paren_is_binary() {
    let tokens = lex("(1) - 2");
    assert_eq!(tokens[3].text, "-");
}

#[test]
fn minus_after_open_paren_comma_and_ternary_is_unary() {
    let tokens = lex("f(-1, -2) ? -3 : -4");
    let unary = tokens.iter().filter(|t| t.text == UNARY_MINUS).count();
    assert_eq!(unary, 4);
}

#[test]
fn structural_tokens() {
    assert_eq!(
        kinds("a ? b : c"),
        vec![
            TokenKind::TableField,
            TokenKind::QuestionMark,
            TokenKind::TableField,
            TokenKind::Colon,
            TokenKind::TableField,
        ]
    );
}

#[test]
fn spans_cover_source_text() {
    let source = "[hp] >= 10";
    for token in lex(source) {
        assert_eq!(&source[token.span.to_range()], token.text);
    }
}

// === Errors ===

#[test]
fn unterminated_delimiters() {
    assert_eq!(lex_err("'abc").kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex_err("1 + #2016").kind, LexErrorKind::UnterminatedDate);
    assert_eq!(lex_err("[hp > 3").kind, LexErrorKind::UnterminatedField);
}

#[test]
fn unterminated_error_span_starts_at_delimiter() {
    let err = lex_err("1 + 'abc");
    assert_eq!(err.span, Span::new(4, 8));
}

#[test]
fn unexpected_characters() {
    assert_eq!(
        lex_err("1 % 2").kind,
        LexErrorKind::UnexpectedCharacter { ch: '%' }
    );
    assert_eq!(
        lex_err("a & b").kind,
        LexErrorKind::UnexpectedCharacter { ch: '&' }
    );
}

#[test]
fn digit_where_no_value_may_start() {
    assert_eq!(
        lex_err("1 2").kind,
        LexErrorKind::UnexpectedCharacter { ch: '2' }
    );
    assert_eq!(
        lex_err("(1) 2").kind,
        LexErrorKind::UnexpectedCharacter { ch: '2' }
    );
}

#[test]
fn operator_missing_from_table() {
    assert_eq!(
        lex_err("!a").kind,
        LexErrorKind::UnknownOperator {
            op: "!".to_string()
        }
    );
}

#[test]
fn error_display_names_location() {
    let err = lex_err("'abc");
    assert_eq!(
        err.to_string(),
        "unterminated string literal, expected closing `'` (at 0..4)"
    );
}
