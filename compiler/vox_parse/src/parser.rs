//! Shunting-yard tree builder.
//!
//! Tokens arrive in infix order. Literals go straight to the output stack;
//! operators, functions and grouping markers wait on the pending stack until
//! a looser operator, a closing delimiter, or end of input reduces them. Each
//! pending entry carries the operand count its reduction will pop, which is
//! how function arity (known only at `)`) and the three-operand ternary
//! (synthesized at `:`) fit the same reduction step.
//!
//! The builder also tracks whether the last token completed an operand, so a
//! binary operator needs a left operand and two operands need an operator
//! between them. Each function argument gets its own floor on the output
//! stack; an operator inside one argument can never take operands built for
//! another.

use tracing::trace;
use vox_ir::{AstNode, OperatorTable, Token, TokenKind, TERNARY, UNARY_MINUS};

use crate::{ParseError, ParseErrorKind};

/// An entry on the pending stack.
struct Pending {
    token: Token,
    /// Operands taken on reduction.
    arity: usize,
    /// Output depth when a group (`(`, `?` or a function call) opened.
    /// Reductions inside the group may not reach below it.
    floor: usize,
}

/// Build a syntax tree from tokens.
///
/// Returns `Ok(None)` for an empty token list.
pub fn parse(tokens: Vec<Token>, operators: &impl OperatorTable) -> Result<Option<AstNode>, ParseError> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut builder = TreeBuilder {
        operators,
        pending: Vec::new(),
        output: Vec::new(),
        after_operand: false,
    };

    let mut prev = None;
    for token in tokens {
        if prev == Some(TokenKind::Function) && token.kind != TokenKind::LeftParen {
            return Err(builder.expected_arguments());
        }
        let kind = token.kind;
        builder.push(token, prev)?;
        prev = Some(kind);
    }
    if prev == Some(TokenKind::Function) {
        return Err(builder.expected_arguments());
    }

    let root = builder.finish()?;
    if let Some(root) = &root {
        trace!(nodes = root.node_count(), "parsed expression");
    }
    Ok(root)
}

struct TreeBuilder<'t, T> {
    operators: &'t T,
    pending: Vec<Pending>,
    output: Vec<AstNode>,
    /// The last token completed an operand (a literal, field or `)`).
    after_operand: bool,
}

impl<T: OperatorTable> TreeBuilder<'_, T> {
    fn push(&mut self, token: Token, prev: Option<TokenKind>) -> Result<(), ParseError> {
        let starts_operand = token.kind.is_literal()
            || matches!(token.kind, TokenKind::Function | TokenKind::LeftParen);
        if starts_operand && self.after_operand {
            return Err(ParseError::new(ParseErrorKind::UnexpectedOperand, token.span));
        }
        self.after_operand = token.kind.is_literal() || token.kind == TokenKind::RightParen;

        match token.kind {
            kind if kind.is_literal() => {
                self.output.push(AstNode::leaf(token));
                Ok(())
            }
            TokenKind::Operator => self.push_operator(token, prev),
            TokenKind::Function => {
                self.open_group(token, 1);
                Ok(())
            }
            TokenKind::LeftParen | TokenKind::QuestionMark => {
                self.open_group(token, 0);
                Ok(())
            }
            TokenKind::Comma => self.argument_separator(&token),
            TokenKind::RightParen => self.close_paren(&token, prev),
            TokenKind::Colon => self.ternary(&token),
            // `is_literal` covers the remaining kinds.
            _ => Ok(()),
        }
    }

    fn open_group(&mut self, token: Token, arity: usize) {
        let floor = self.output.len();
        self.pending.push(Pending {
            token,
            arity,
            floor,
        });
    }

    fn push_operator(&mut self, token: Token, prev: Option<TokenKind>) -> Result<(), ParseError> {
        let Some(spec) = self.operators.operator_spec(&token.text) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownOperator {
                    op: token.text.clone(),
                },
                token.span,
            ));
        };
        let has_left_operand = matches!(prev, Some(kind) if kind.is_literal() || kind == TokenKind::RightParen);
        if spec.arity >= 2 && !has_left_operand {
            return Err(ParseError::new(
                ParseErrorKind::MissingOperand {
                    operator: display_text(&token).to_string(),
                },
                token.span,
            ));
        }
        self.reduce_tighter(token.precedence, token.left_associative)?;
        self.pending.push(Pending {
            token,
            arity: spec.arity,
            floor: 0,
        });
        Ok(())
    }

    /// Reduce pending operators that bind at least as tightly as an incoming
    /// one of `precedence`. Equal precedence reduces only for left-associative
    /// incoming operators.
    fn reduce_tighter(&mut self, precedence: u8, left_associative: bool) -> Result<(), ParseError> {
        while self.pending.last().is_some_and(|top| {
            top.token.kind == TokenKind::Operator
                && (top.token.precedence < precedence
                    || (left_associative && top.token.precedence == precedence))
        }) {
            if let Some(top) = self.pending.pop() {
                self.reduce(top)?;
            }
        }
        Ok(())
    }

    /// Reduce everything above the innermost group marker of kind `until`,
    /// then pop and return that marker.
    ///
    /// Running out of stack, or meeting a `(` that is not the target, reports
    /// `missing`; meeting a stray `?` reports it as unclosed.
    fn reduce_to_marker(
        &mut self,
        until: TokenKind,
        at: &Token,
        missing: ParseErrorKind,
    ) -> Result<Pending, ParseError> {
        loop {
            let Some(top) = self.pending.pop() else {
                return Err(ParseError::new(missing, at.span));
            };
            match top.token.kind {
                kind if kind == until => return Ok(top),
                TokenKind::LeftParen => return Err(ParseError::new(missing, at.span)),
                TokenKind::QuestionMark => {
                    return Err(ParseError::new(ParseErrorKind::UnclosedTernary, top.token.span));
                }
                _ => self.reduce(top)?,
            }
        }
    }

    fn argument_separator(&mut self, comma: &Token) -> Result<(), ParseError> {
        let mut paren =
            self.reduce_to_marker(TokenKind::LeftParen, comma, ParseErrorKind::MisplacedComma)?;
        let function_name = match self.pending.last() {
            Some(function) if function.token.kind == TokenKind::Function => function.token.text.clone(),
            _ => return Err(ParseError::new(ParseErrorKind::MisplacedComma, comma.span)),
        };
        if self.output.len() <= paren.floor {
            return Err(ParseError::new(
                ParseErrorKind::MissingOperand {
                    operator: function_name,
                },
                comma.span,
            ));
        }
        self.single_operand_above(paren.floor)?;

        if let Some(function) = self.pending.last_mut() {
            function.arity += 1;
        }
        // The next argument starts from an empty group.
        paren.floor = self.output.len();
        self.pending.push(paren);
        Ok(())
    }

    /// A finished group or argument must have built exactly one tree above
    /// `floor`.
    fn single_operand_above(&self, floor: usize) -> Result<(), ParseError> {
        match self.output.get(floor + 1) {
            Some(extra) => Err(ParseError::new(
                ParseErrorKind::UnexpectedOperand,
                extra.token.span,
            )),
            None => Ok(()),
        }
    }

    fn close_paren(&mut self, paren: &Token, prev: Option<TokenKind>) -> Result<(), ParseError> {
        if prev == Some(TokenKind::LeftParen) {
            // `()` is only valid as an empty argument list.
            let below = self.pending.len().checked_sub(2);
            match below.and_then(|i| self.pending.get_mut(i)) {
                Some(function) if function.token.kind == TokenKind::Function => function.arity = 0,
                _ => return Err(ParseError::new(ParseErrorKind::EmptyGroup, paren.span)),
            }
        }

        let group = self.reduce_to_marker(
            TokenKind::LeftParen,
            paren,
            ParseErrorKind::UnmatchedCloseParen,
        )?;
        self.single_operand_above(group.floor)?;

        if self
            .pending
            .last()
            .is_some_and(|top| top.token.kind == TokenKind::Function)
        {
            if let Some(function) = self.pending.pop() {
                self.reduce(function)?;
            }
        }
        Ok(())
    }

    /// At `:` the then-branch is complete. Reduce it, reduce the condition's
    /// pending operators (all bind tighter than the ternary), and leave the
    /// ternary pending so the else-branch is built before it reduces.
    fn ternary(&mut self, colon: &Token) -> Result<(), ParseError> {
        let question = self.reduce_to_marker(
            TokenKind::QuestionMark,
            colon,
            ParseErrorKind::UnmatchedColon,
        )?;

        if self.output.len() <= question.floor {
            return Err(ParseError::new(
                ParseErrorKind::MissingOperand {
                    operator: "?".to_string(),
                },
                colon.span,
            ));
        }
        let Some(then_branch) = self.output.pop() else {
            return Err(ParseError::new(ParseErrorKind::UnmatchedColon, colon.span));
        };

        let Some(spec) = self.operators.operator_spec(TERNARY) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownOperator {
                    op: TERNARY.to_string(),
                },
                colon.span,
            ));
        };
        let token = Token::operator(TERNARY, spec, question.token.span.merge(colon.span));

        self.reduce_tighter(token.precedence, token.left_associative)?;

        self.output.push(then_branch);
        self.pending.push(Pending {
            token,
            arity: spec.arity,
            floor: 0,
        });
        Ok(())
    }

    /// Pop `pending.arity` built subtrees and attach them, in source order,
    /// under the pending token.
    fn reduce(&mut self, pending: Pending) -> Result<(), ParseError> {
        let floor = if pending.token.kind == TokenKind::Function {
            pending.floor
        } else {
            self.group_floor()
        };

        let available = self.output.len().saturating_sub(floor);
        if available < pending.arity {
            return Err(ParseError::new(
                ParseErrorKind::MissingOperand {
                    operator: display_text(&pending.token).to_string(),
                },
                pending.token.span,
            ));
        }

        let children = self.output.split_off(self.output.len() - pending.arity);
        trace!(
            token = %pending.token.text,
            arity = pending.arity,
            "reduce"
        );
        self.output
            .push(AstNode::with_children(pending.token, children));
        Ok(())
    }

    /// Output depth of the innermost open `(` or `?`.
    fn group_floor(&self) -> usize {
        self.pending
            .iter()
            .rev()
            .find(|p| matches!(p.token.kind, TokenKind::LeftParen | TokenKind::QuestionMark))
            .map_or(0, |p| p.floor)
    }

    fn expected_arguments(&self) -> ParseError {
        let (name, span) = self
            .pending
            .last()
            .map(|p| (p.token.text.clone(), p.token.span))
            .unwrap_or_default();
        ParseError::new(ParseErrorKind::ExpectedArguments { name }, span)
    }

    fn finish(mut self) -> Result<Option<AstNode>, ParseError> {
        while let Some(top) = self.pending.pop() {
            match top.token.kind {
                TokenKind::LeftParen => {
                    return Err(ParseError::new(ParseErrorKind::UnclosedParen, top.token.span));
                }
                TokenKind::QuestionMark => {
                    return Err(ParseError::new(ParseErrorKind::UnclosedTernary, top.token.span));
                }
                _ => self.reduce(top)?,
            }
        }

        if let Some(extra) = self.output.get(1) {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedOperand,
                extra.token.span,
            ));
        }
        Ok(self.output.pop())
    }
}

/// Operator text as the author wrote it.
fn display_text(token: &Token) -> &str {
    if token.text == UNARY_MINUS {
        "-"
    } else {
        &token.text
    }
}
