//! Parse error types.

use vox_ir::Span;
use vox_lexer::LexError;

/// A grammar error, located at the token that exposed it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind} (at {span})")]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { span, kind }
    }
}

/// What went wrong while building the tree.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// `(` still open at end of input.
    #[error("expected `)` to close this `(`")]
    UnclosedParen,
    /// `)` with no `(` to match.
    #[error("unexpected `)` without a matching `(`")]
    UnmatchedCloseParen,
    /// `?` never followed by its `:`.
    #[error("expected `:` to complete this `?`")]
    UnclosedTernary,
    /// `:` with no pending `?`.
    #[error("unexpected `:` without a matching `?`")]
    UnmatchedColon,
    /// `,` outside a function's argument list.
    #[error("`,` is only allowed between function arguments")]
    MisplacedComma,
    /// `()` that does not follow a function name.
    #[error("empty parentheses")]
    EmptyGroup,
    /// A function name not followed by `(`.
    #[error("expected `(` after function `{name}`")]
    ExpectedArguments { name: String },
    /// An operator or function without enough operands built beneath it.
    #[error("missing operand for `{operator}`")]
    MissingOperand { operator: String },
    /// Two values with no operator between them.
    #[error("unexpected operand, expected an operator")]
    UnexpectedOperand,
    /// An operator the table does not know.
    #[error("unknown operator `{op}`")]
    UnknownOperator { op: String },
}

impl ParseErrorKind {
    /// A short suggestion for common authoring mistakes.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ParseErrorKind::UnclosedParen | ParseErrorKind::UnmatchedCloseParen => {
                Some("check that every `(` has a matching `)`")
            }
            ParseErrorKind::UnclosedTernary | ParseErrorKind::UnmatchedColon => {
                Some("a conditional is written `condition ? then : otherwise`")
            }
            ParseErrorKind::UnexpectedOperand => {
                Some("combine values with an operator such as `+` or `and`")
            }
            ParseErrorKind::EmptyGroup => Some("parentheses must contain an expression"),
            _ => None,
        }
    }
}

/// Failure of the whole text-to-tree pipeline.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span,
            SyntaxError::Parse(err) => err.span,
        }
    }
}
