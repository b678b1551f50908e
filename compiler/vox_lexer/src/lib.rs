//! Lexer for vox expressions.
//!
//! Two layers, as in a raw-scanner / cooker split:
//!
//! 1. `RawToken` (logos) recognizes lexemes with no context: numbers, quoted
//!    strings, dates, bracketed fields, identifiers, operator spellings and
//!    punctuation. Unterminated delimiters get their own raw kinds so the
//!    error can name the missing delimiter.
//! 2. The cooking loop in [`tokenize`] carries the one piece of state the
//!    language needs, "may a value start here?", which decides unary versus
//!    binary minus and whether a digit may begin a number. It also resolves
//!    keywords case-insensitively and looks operator precedence up in the
//!    supplied [`OperatorTable`].

mod lex_error;

use logos::Logos;
use tracing::trace;
use vox_ir::{OperatorTable, Span, Token, TokenKind, UNARY_MINUS};

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // Digits and at most a run of decimal points; no exponent notation.
    #[regex(r"[0-9][0-9.]*")]
    Number,

    #[regex(r"'[^']*'")]
    String,
    #[regex(r"'[^']*")]
    UnterminatedString,

    #[regex(r"#[^#]*#")]
    Date,
    #[regex(r"#[^#]*")]
    UnterminatedDate,

    #[regex(r"\[[^\]]*\]")]
    Field,
    #[regex(r"\[[^\]]*")]
    UnterminatedField,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"<=|>=|<>|!=|[-+*/=<>!]")]
    Operator,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
}

/// Tokenize an expression source string.
///
/// Returns tokens in source order. Whitespace produces no tokens; an empty or
/// blank source yields an empty list.
pub fn tokenize(source: &str, operators: &impl OperatorTable) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    let mut can_be_literal = true;

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();

        let Ok(raw) = raw else {
            let ch = slice.chars().next().unwrap_or('\0');
            return Err(LexError::new(LexErrorKind::UnexpectedCharacter { ch }, span));
        };

        let token = match raw {
            RawToken::Number => {
                if !can_be_literal {
                    let ch = slice.chars().next().unwrap_or('0');
                    return Err(LexError::new(LexErrorKind::UnexpectedCharacter { ch }, span));
                }
                can_be_literal = false;
                Token::new(TokenKind::Number, slice, span)
            }
            RawToken::String => {
                can_be_literal = false;
                Token::new(TokenKind::String, slice, span)
            }
            RawToken::Date => {
                can_be_literal = false;
                Token::new(TokenKind::Date, slice, span)
            }
            RawToken::Field => {
                can_be_literal = false;
                Token::new(TokenKind::TableField, slice, span)
            }
            RawToken::UnterminatedString => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span));
            }
            RawToken::UnterminatedDate => {
                return Err(LexError::new(LexErrorKind::UnterminatedDate, span));
            }
            RawToken::UnterminatedField => {
                return Err(LexError::new(LexErrorKind::UnterminatedField, span));
            }
            RawToken::Ident => {
                let token = cook_identifier(slice, span, lexer.remainder(), operators)?;
                can_be_literal = token.kind == TokenKind::Operator;
                token
            }
            RawToken::Operator => {
                let token = if can_be_literal && slice == "-" {
                    let spec = lookup_operator(UNARY_MINUS, span, operators)?;
                    Token::operator(UNARY_MINUS, spec, span)
                } else {
                    let spec = lookup_operator(slice, span, operators)?;
                    Token::operator(slice, spec, span)
                };
                can_be_literal = true;
                token
            }
            RawToken::LParen => {
                can_be_literal = true;
                Token::new(TokenKind::LeftParen, slice, span)
            }
            RawToken::RParen => {
                can_be_literal = false;
                Token::new(TokenKind::RightParen, slice, span)
            }
            RawToken::Comma => {
                can_be_literal = true;
                Token::new(TokenKind::Comma, slice, span)
            }
            RawToken::Question => {
                can_be_literal = true;
                let mut token = Token::new(TokenKind::QuestionMark, slice, span);
                token.left_associative = false;
                token
            }
            RawToken::Colon => {
                can_be_literal = true;
                Token::new(TokenKind::Colon, slice, span)
            }
        };

        trace!(kind = ?token.kind, text = %token.text, %span, "token");
        tokens.push(token);
    }

    Ok(tokens)
}

fn lookup_operator(
    text: &str,
    span: Span,
    operators: &impl OperatorTable,
) -> Result<vox_ir::OperatorSpec, LexError> {
    operators.operator_spec(text).ok_or_else(|| {
        LexError::new(
            LexErrorKind::UnknownOperator {
                op: text.to_string(),
            },
            span,
        )
    })
}

/// Classify a letter-led identifier.
///
/// Keywords match case-insensitively; the raw scanner already guarantees the
/// word boundary, so `trueish` never reaches here as `true`. Anything that is
/// not a keyword is a function name when the next non-blank character is `(`
/// and a bare field reference otherwise.
fn cook_identifier(
    slice: &str,
    span: Span,
    remainder: &str,
    operators: &impl OperatorTable,
) -> Result<Token, LexError> {
    let lower = slice.to_ascii_lowercase();
    match lower.as_str() {
        "true" | "false" => Ok(Token::new(TokenKind::Boolean, slice, span)),
        "null" => Ok(Token::new(TokenKind::Null, slice, span)),
        "and" | "or" => {
            let spec = lookup_operator(&lower, span, operators)?;
            Ok(Token::operator(slice, spec, span))
        }
        _ if remainder.trim_start().starts_with('(') => {
            Ok(Token::new(TokenKind::Function, slice, span))
        }
        _ => Ok(Token::new(TokenKind::TableField, slice, span)),
    }
}

#[cfg(test)]
mod tests;
