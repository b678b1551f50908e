//! Lexer tokens.

use std::fmt;

use crate::operator::{Associativity, OperatorSpec};
use crate::Span;

/// Kind of an expression token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Real number, e.g. `12` or `3.5`.
    Number,
    /// Quoted string, e.g. `'hello'` (quotes included in the text).
    String,
    /// `true` / `false`, any letter case.
    Boolean,
    /// `null`, any letter case.
    Null,
    LeftParen,
    RightParen,
    /// Field reference, either `[field.path]` or a bare identifier.
    TableField,
    /// Unary or binary operator, including `and` / `or`.
    Operator,
    /// Function name; arity is decided by the parser.
    Function,
    Comma,
    /// Date literal, e.g. `#2016-02-21#` (delimiters included in the text).
    Date,
    Colon,
    QuestionMark,
}

impl TokenKind {
    /// Tokens that become leaf nodes of the syntax tree.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::TableField
                | TokenKind::Date
        )
    }

    /// Human-readable name for diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::TableField => "field",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::Comma => "`,`",
            TokenKind::Date => "date",
            TokenKind::Colon => "`:`",
            TokenKind::QuestionMark => "`?`",
        }
    }
}

/// A single token, produced in source order and never mutated afterwards.
///
/// `precedence` and `left_associative` are only meaningful for operator and
/// ternary tokens; every other kind carries the defaults.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub precedence: u8,
    pub left_associative: bool,
}

impl Token {
    /// Create a non-operator token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            precedence: 0,
            left_associative: true,
        }
    }

    /// Create an operator token carrying its resolved precedence.
    pub fn operator(text: impl Into<String>, spec: OperatorSpec, span: Span) -> Self {
        Token {
            kind: TokenKind::Operator,
            text: text.into(),
            span,
            precedence: spec.precedence,
            left_associative: spec.associativity == Associativity::LeftToRight,
        }
    }

    /// Field name with surrounding brackets stripped.
    ///
    /// Bare identifiers are returned unchanged.
    pub fn field_name(&self) -> &str {
        self.text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(&self.text)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {:?}", self.kind, self.text, self.span)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: '{}'", self.kind, self.text)
    }
}
