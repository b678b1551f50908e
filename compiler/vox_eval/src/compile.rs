//! Lowering from [`AstNode`] to [`EvalNode`].
//!
//! Literal parsing is lenient: a malformed number becomes NaN and a date
//! literal that does not parse becomes the current local time. Neither is an
//! error, so a typo in a formula degrades instead of disabling it.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};
use vox_ir::{AstNode, Span, TokenKind};
use vox_runtime::{ops, Arity, Callable, Registry, Value};
use vox_stack::ensure_sufficient_stack;

use crate::EvalNode;

/// Compilation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at {span})")]
pub struct CompileError {
    pub span: Span,
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, span: Span) -> Self {
        CompileError { span, kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileErrorKind {
    /// A token kind with no evaluable form, such as a stray `(`.
    #[error("{} cannot be evaluated", .kind.display_name())]
    UnsupportedConstruct { kind: TokenKind },
    #[error("unknown operator `{op}`")]
    UnknownOperator { op: String },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
}

/// Compile a syntax tree against `registry`.
pub fn compile(ast: &AstNode, registry: &Registry) -> Result<EvalNode, CompileError> {
    let node = lower(ast, registry)?;
    debug!(nodes = node.node_count(), "compiled expression");
    Ok(node)
}

fn lower(ast: &AstNode, registry: &Registry) -> Result<EvalNode, CompileError> {
    ensure_sufficient_stack(|| lower_node(ast, registry))
}

fn lower_node(ast: &AstNode, registry: &Registry) -> Result<EvalNode, CompileError> {
    let token = &ast.token;
    let node = match token.kind {
        TokenKind::Number => EvalNode::Const(Value::Float(parse_number(&token.text))),
        TokenKind::String => EvalNode::Const(Value::string(strip_delimiter(&token.text, '\''))),
        TokenKind::Date => EvalNode::Const(Value::Date(parse_date_literal(&token.text))),
        TokenKind::Boolean => EvalNode::Const(Value::Boolean(token.text.eq_ignore_ascii_case("true"))),
        TokenKind::Null => EvalNode::Const(Value::Null),
        TokenKind::TableField => EvalNode::field(token.field_name()),
        TokenKind::Operator => {
            let Some(op) = registry.find_operator(&token.text) else {
                return Err(CompileError::new(
                    CompileErrorKind::UnknownOperator {
                        op: token.text.clone(),
                    },
                    token.span,
                ));
            };
            check_arity(op.name(), Arity::Fixed(op.arity()), ast)?;
            EvalNode::OperatorCall(Arc::clone(op), lower_children(ast, registry)?)
        }
        TokenKind::Function => match registry.find_callable(&token.text) {
            Some(Callable::Function(func)) => {
                check_arity(func.name(), func.arity(), ast)?;
                EvalNode::FunctionCall(func, lower_children(ast, registry)?)
            }
            Some(Callable::Operator(op)) => {
                check_arity(op.name(), Arity::Fixed(op.arity()), ast)?;
                EvalNode::OperatorCall(op, lower_children(ast, registry)?)
            }
            None => {
                return Err(CompileError::new(
                    CompileErrorKind::UnknownFunction {
                        name: token.text.clone(),
                    },
                    token.span,
                ))
            }
        },
        TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::Comma
        | TokenKind::Colon
        | TokenKind::QuestionMark => {
            return Err(CompileError::new(
                CompileErrorKind::UnsupportedConstruct { kind: token.kind },
                token.span,
            ))
        }
    };
    Ok(node)
}

fn lower_children(ast: &AstNode, registry: &Registry) -> Result<Vec<EvalNode>, CompileError> {
    ast.children
        .iter()
        .map(|child| lower(child, registry))
        .collect()
}

fn check_arity(name: &str, expected: Arity, ast: &AstNode) -> Result<(), CompileError> {
    let got = ast.children.len();
    if expected.accepts(got) {
        return Ok(());
    }
    Err(CompileError::new(
        CompileErrorKind::ArityMismatch {
            name: name.to_string(),
            expected,
            got,
        },
        ast.token.span,
    ))
}

/// Number literals are always floats; `1.2.3` is NaN.
fn parse_number(text: &str) -> f64 {
    text.parse().unwrap_or(f64::NAN)
}

fn strip_delimiter(text: &str, delimiter: char) -> &str {
    text.strip_prefix(delimiter)
        .and_then(|rest| rest.strip_suffix(delimiter))
        .unwrap_or(text)
}

fn parse_date_literal(text: &str) -> chrono::NaiveDateTime {
    let inner = strip_delimiter(text, '#');
    ops::parse_date(inner).unwrap_or_else(|| {
        warn!(literal = inner, "unparsable date literal, using the current time");
        Local::now().naive_local()
    })
}
