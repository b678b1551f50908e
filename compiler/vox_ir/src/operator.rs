//! Operator metadata shared by the lexer, parser and registry.
//!
//! The lexer needs precedence at scan time and the parser needs arity and
//! associativity at reduction time, but neither should depend on runtime
//! values. [`OperatorTable`] is the seam: the runtime registry implements it,
//! and [`StandardOperators`] provides the built-in table on its own.

/// Registry key of the unary negation operator.
///
/// The lexer emits this text for a `-` found where a value is expected, which
/// keeps unary and binary minus distinct all the way to the registry.
pub const UNARY_MINUS: &str = "~-";

/// Registry key of the ternary conditional operator, synthesized at `:`.
pub const TERNARY: &str = "?:";

/// Operator associativity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Associativity {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Static shape of an operator.
///
/// Lower `precedence` binds tighter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OperatorSpec {
    pub arity: usize,
    pub precedence: u8,
    pub associativity: Associativity,
}

impl OperatorSpec {
    pub const fn binary(precedence: u8) -> Self {
        OperatorSpec {
            arity: 2,
            precedence,
            associativity: Associativity::LeftToRight,
        }
    }

    pub const fn new(arity: usize, precedence: u8, associativity: Associativity) -> Self {
        OperatorSpec {
            arity,
            precedence,
            associativity,
        }
    }

    #[inline]
    pub fn is_left_associative(&self) -> bool {
        self.associativity == Associativity::LeftToRight
    }
}

/// Lookup of operator shapes by token text.
///
/// Implementations must match case-insensitively (`AND` resolves like `and`).
pub trait OperatorTable {
    fn operator_spec(&self, text: &str) -> Option<OperatorSpec>;
}

impl<T: OperatorTable + ?Sized> OperatorTable for &T {
    fn operator_spec(&self, text: &str) -> Option<OperatorSpec> {
        (**self).operator_spec(text)
    }
}

/// The built-in operator set.
static STANDARD: &[(&str, OperatorSpec)] = &[
    (
        UNARY_MINUS,
        OperatorSpec::new(1, 3, Associativity::RightToLeft),
    ),
    ("*", OperatorSpec::binary(5)),
    ("/", OperatorSpec::binary(5)),
    ("+", OperatorSpec::binary(6)),
    ("-", OperatorSpec::binary(6)),
    (">", OperatorSpec::binary(8)),
    ("<", OperatorSpec::binary(8)),
    (">=", OperatorSpec::binary(8)),
    ("<=", OperatorSpec::binary(8)),
    ("=", OperatorSpec::binary(9)),
    ("<>", OperatorSpec::binary(9)),
    ("!=", OperatorSpec::binary(9)),
    ("and", OperatorSpec::binary(13)),
    ("or", OperatorSpec::binary(14)),
    (TERNARY, OperatorSpec::new(3, 15, Associativity::RightToLeft)),
];

/// Built-in operators as `(registry key, shape)` pairs.
pub fn standard_operators() -> &'static [(&'static str, OperatorSpec)] {
    STANDARD
}

/// Operator table containing only the built-in operators.
///
/// Used where no registry is at hand (lexer and parser unit tests, tooling).
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardOperators;

impl OperatorTable for StandardOperators {
    fn operator_spec(&self, text: &str) -> Option<OperatorSpec> {
        STANDARD
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(text))
            .map(|(_, spec)| *spec)
    }
}
