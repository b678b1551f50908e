//! Parser for vox expressions.
//!
//! [`parse`] turns a token list into an [`AstNode`] with an operator-precedence
//! (shunting-yard) pass extended with function-call arity tracking and the
//! `? :` conditional. [`parse_source`] runs the lexer first.
//!
//! Precedence and arity come from an [`OperatorTable`], so the grammar follows
//! whatever operators the runtime registry carries.

mod error;
mod parser;

use vox_ir::{AstNode, OperatorTable};

pub use error::{ParseError, ParseErrorKind, SyntaxError};
pub use parser::parse;

/// Tokenize and parse `source`.
///
/// Returns `Ok(None)` when the source holds no tokens.
pub fn parse_source(
    source: &str,
    operators: &impl OperatorTable,
) -> Result<Option<AstNode>, SyntaxError> {
    let tokens = vox_lexer::tokenize(source, operators)?;
    Ok(parse(tokens, operators)?)
}

#[cfg(test)]
mod tests;
