//! Vox IR - shared data types for the expression engine.
//!
//! Everything here is plain data with no evaluation behaviour:
//!
//! - [`Span`]: byte range into the expression source
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`OperatorSpec`] / [`OperatorTable`]: the seam through which the lexer
//!   and parser learn precedence and arity without depending on runtime values
//! - [`AstNode`]: parser output, printable back to expression text

mod ast;
mod operator;
mod span;
mod token;

pub use ast::AstNode;
pub use operator::{
    standard_operators, Associativity, OperatorSpec, OperatorTable, StandardOperators, TERNARY,
    UNARY_MINUS,
};
pub use span::Span;
pub use token::{Token, TokenKind};
