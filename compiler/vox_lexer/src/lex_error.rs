//! Lexer error types.
//!
//! Errors carry WHERE (`span`) and WHAT (`kind`); the lexer stops at the
//! first error, so there is no recovery context to report.

use vox_ir::Span;

/// A lexer error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} (at {span})")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// `'` opened and never closed.
    #[error("unterminated string literal, expected closing `'`")]
    UnterminatedString,
    /// `#` opened and never closed.
    #[error("unterminated date literal, expected closing `#`")]
    UnterminatedDate,
    /// `[` opened and never closed.
    #[error("unterminated field reference, expected closing `]`")]
    UnterminatedField,
    /// A character outside the accepted set, or a digit where no value may
    /// start.
    #[error("unexpected character `{ch}`")]
    UnexpectedCharacter { ch: char },
    /// Operator text the operator table does not know, e.g. a lone `!`.
    #[error("unknown operator `{op}`")]
    UnknownOperator { op: String },
}
