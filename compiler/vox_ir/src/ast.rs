//! Abstract syntax tree produced by the parser.
//!
//! The tree is token-shaped: every node keeps the token it was built from and
//! its children in source order. Arity follows the token kind: zero for
//! literals and fields, one for unary minus, two for binary operators, three
//! for the ternary, and whatever the call site supplied for functions.

use std::fmt;

use vox_stack::ensure_sufficient_stack;

use crate::operator::{TERNARY, UNARY_MINUS};
use crate::{Token, TokenKind};

/// A syntax-tree node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AstNode {
    pub token: Token,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Leaf node for a literal or field token.
    pub fn leaf(token: Token) -> Self {
        AstNode {
            token,
            children: Vec::new(),
        }
    }

    pub fn with_children(token: Token, children: Vec<AstNode>) -> Self {
        AstNode { token, children }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.token.text
    }

    #[inline]
    pub fn precedence(&self) -> u8 {
        self.token.precedence
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        ensure_sufficient_stack(|| 1 + self.children.iter().map(AstNode::node_count).sum::<usize>())
    }

    fn is_ternary(&self) -> bool {
        self.kind() == TokenKind::Operator && self.token.text == TERNARY
    }

    fn is_unary_minus(&self) -> bool {
        self.kind() == TokenKind::Operator && self.token.text == UNARY_MINUS
    }

    /// Rebuild expression text from the tree.
    ///
    /// The output is operator-equivalent to the source, not character
    /// identical: whitespace is normalized and only the parentheses needed to
    /// preserve the tree shape are emitted.
    pub fn to_expression_string(&self) -> String {
        self.to_string()
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }

    /// Whether `child` at `position` must be wrapped to survive a re-parse
    /// under this binary operator.
    fn needs_parens(&self, child: &AstNode, position: usize) -> bool {
        if child.kind() != TokenKind::Operator || child.children.len() < 2 {
            return false;
        }
        if child.is_ternary() {
            return true;
        }
        match child.precedence().cmp(&self.precedence()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => {
                let left_assoc = self.token.left_associative;
                (left_assoc && position == 1) || (!left_assoc && position == 0)
            }
        }
    }
}

/// Children are released from an explicit stack, so dropping a deep chain
/// does not recurse.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_expression(f))
    }
}

impl AstNode {
    fn write_expression(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TokenKind::Operator if self.is_ternary() && self.children.len() == 3 => {
                let [cond, then, otherwise] = [&self.children[0], &self.children[1], &self.children[2]];
                cond.write_operand(f, cond.is_ternary())?;
                f.write_str(" ? ")?;
                then.write_operand(f, then.is_ternary())?;
                f.write_str(" : ")?;
                write!(f, "{otherwise}")
            }
            TokenKind::Operator if self.is_unary_minus() && self.children.len() == 1 => {
                let operand = &self.children[0];
                f.write_str("-")?;
                let wrap = operand.kind() == TokenKind::Operator && !operand.is_unary_minus();
                operand.write_operand(f, wrap)
            }
            TokenKind::Operator if self.children.len() == 2 => {
                let (left, right) = (&self.children[0], &self.children[1]);
                left.write_operand(f, self.needs_parens(left, 0))?;
                write!(f, " {} ", self.token.text)?;
                right.write_operand(f, self.needs_parens(right, 1))
            }
            TokenKind::Function => {
                write!(f, "{}(", self.token.text)?;
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            _ => f.write_str(&self.token.text),
        }
    }
}
