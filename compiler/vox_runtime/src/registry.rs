//! Operator and function registry.
//!
//! The registry is the single callable namespace for both evaluators. It is
//! built once through [`RegistryBuilder`] and immutable afterwards; share it
//! across threads as a [`SharedRegistry`].
//!
//! Names are matched case-insensitively (`MAX`, `max` and `Max` are one
//! entry). Operators are keyed by their token text, with the reserved keys
//! [`UNARY_MINUS`](vox_ir::UNARY_MINUS) and [`TERNARY`](vox_ir::TERNARY) for
//! unary negation and the conditional.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use tracing::debug;
use vox_ir::{Associativity, OperatorSpec, OperatorTable};

use crate::convert::{FromValue, IntoEvalResult};
use crate::errors::{argument_type, arity_mismatch};
use crate::shared::SharedRegistry;
use crate::{EvalContext, EvalError, EvalResult, Value, ValueKind};

/// Native routine bound to a registry entry.
///
/// Receives the evaluation context and the already evaluated arguments.
pub type NativeFn = Arc<dyn Fn(&dyn EvalContext, &[Value]) -> EvalResult + Send + Sync>;

/// How many arguments a routine accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    Variadic { min: usize },
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => count == n,
            Arity::Variadic { min } => count >= min,
        }
    }

    /// The exact count, for fixed arities.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Arity::Fixed(n) => Some(n),
            Arity::Variadic { .. } => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{n}"),
            Arity::Variadic { min } => write!(f, "at least {min}"),
        }
    }
}

/// A registered operator.
pub struct OperatorInfo {
    name: String,
    spec: OperatorSpec,
    evaluate: NativeFn,
}

impl OperatorInfo {
    pub fn new(
        name: impl Into<String>,
        spec: OperatorSpec,
        evaluate: impl Fn(&dyn EvalContext, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        OperatorInfo {
            name: name.into(),
            spec,
            evaluate: Arc::new(evaluate),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn spec(&self) -> OperatorSpec {
        self.spec
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.spec.arity
    }

    #[inline]
    pub fn precedence(&self) -> u8 {
        self.spec.precedence
    }

    #[inline]
    pub fn associativity(&self) -> Associativity {
        self.spec.associativity
    }

    /// Apply the operator to evaluated operands.
    pub fn call(&self, ctx: &dyn EvalContext, args: &[Value]) -> EvalResult {
        if args.len() != self.spec.arity {
            return Err(arity_mismatch(
                &self.name,
                Arity::Fixed(self.spec.arity),
                args.len(),
            ));
        }
        (self.evaluate)(ctx, args)
    }
}

impl fmt::Debug for OperatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorInfo")
            .field("name", &self.name)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// A registered function.
pub struct FunctionInfo {
    name: String,
    arity: Arity,
    params: Vec<ValueKind>,
    returns: ValueKind,
    evaluate: NativeFn,
}

impl FunctionInfo {
    /// Untyped function: parameters and result are recorded as `Any`.
    pub fn new(
        name: impl Into<String>,
        arity: Arity,
        evaluate: impl Fn(&dyn EvalContext, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let params = arity.fixed().map_or_else(Vec::new, |n| vec![ValueKind::Any; n]);
        FunctionInfo {
            name: name.into(),
            arity,
            params,
            returns: ValueKind::Any,
            evaluate: Arc::new(evaluate),
        }
    }

    /// Record a declared signature.
    #[must_use]
    pub fn with_signature(mut self, params: Vec<ValueKind>, returns: ValueKind) -> Self {
        self.params = params;
        self.returns = returns;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn params(&self) -> &[ValueKind] {
        &self.params
    }

    pub fn returns(&self) -> ValueKind {
        self.returns
    }

    /// Apply the function to evaluated arguments.
    pub fn call(&self, ctx: &dyn EvalContext, args: &[Value]) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(arity_mismatch(&self.name, self.arity, args.len()));
        }
        (self.evaluate)(ctx, args)
    }
}

impl fmt::Debug for FunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInfo")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

/// Either kind of registry entry, as found by [`Registry::find_callable`].
#[derive(Clone, Debug)]
pub enum Callable {
    Operator(Arc<OperatorInfo>),
    Function(Arc<FunctionInfo>),
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Operator(op) => op.name(),
            Callable::Function(func) => func.name(),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Callable::Operator(op) => Arity::Fixed(op.arity()),
            Callable::Function(func) => func.arity(),
        }
    }
}

/// What to do when a name is registered twice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Overwrite,
}

/// Registration failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{entry} `{name}` is already registered")]
    Duplicate { entry: &'static str, name: String },
    #[error("operator `{name}` takes {arity} operands, expected 1 to 3")]
    InvalidOperatorArity { name: String, arity: usize },
}

/// Immutable operator and function table.
pub struct Registry {
    operators: FxHashMap<String, Arc<OperatorInfo>>,
    functions: FxHashMap<String, Arc<FunctionInfo>>,
}

impl Registry {
    /// Start an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide registry holding only the standard library.
    ///
    /// Built on first use. Hosts that register their own functions build a
    /// registry with [`RegistryBuilder::with_standard_library`] instead.
    pub fn standard() -> SharedRegistry {
        static STANDARD: OnceLock<SharedRegistry> = OnceLock::new();
        STANDARD
            .get_or_init(|| RegistryBuilder::with_standard_library().build_shared())
            .clone()
    }

    pub fn find_operator(&self, text: &str) -> Option<&Arc<OperatorInfo>> {
        lookup(&self.operators, text)
    }

    pub fn find_function(&self, name: &str) -> Option<&Arc<FunctionInfo>> {
        lookup(&self.functions, name)
    }

    /// Resolve a name used in call position. Functions shadow operators of the
    /// same name.
    pub fn find_callable(&self, name: &str) -> Option<Callable> {
        if let Some(func) = self.find_function(name) {
            return Some(Callable::Function(Arc::clone(func)));
        }
        self.find_operator(name)
            .map(|op| Callable::Operator(Arc::clone(op)))
    }

    pub fn operators(&self) -> impl Iterator<Item = &Arc<OperatorInfo>> {
        self.operators.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Arc<FunctionInfo>> {
        self.functions.values()
    }
}

fn lookup<'a, T>(map: &'a FxHashMap<String, T>, name: &str) -> Option<&'a T> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        map.get(&name.to_ascii_lowercase())
    } else {
        map.get(name)
    }
}

impl OperatorTable for Registry {
    fn operator_spec(&self, text: &str) -> Option<OperatorSpec> {
        self.find_operator(text).map(|op| op.spec())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operators: Vec<_> = self.operators.values().map(|op| op.name()).collect();
        operators.sort_unstable();
        let mut functions: Vec<_> = self.functions.values().map(|func| func.name()).collect();
        functions.sort_unstable();
        f.debug_struct("Registry")
            .field("operators", &operators)
            .field("functions", &functions)
            .finish()
    }
}

/// Collects registrations, then freezes them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    policy: DuplicatePolicy,
    operators: FxHashMap<String, Arc<OperatorInfo>>,
    functions: FxHashMap<String, Arc<FunctionInfo>>,
}

impl RegistryBuilder {
    /// An empty builder. Without the standard library even `+` is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with the built-in operators and functions.
    pub fn with_standard_library() -> Self {
        let mut builder = Self::new();
        crate::stdlib::install(&mut builder);
        builder
    }

    #[must_use]
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn register_operator(&mut self, info: OperatorInfo) -> Result<(), RegistryError> {
        if !(1..=3).contains(&info.arity()) {
            return Err(RegistryError::InvalidOperatorArity {
                name: info.name,
                arity: info.spec.arity,
            });
        }
        let key = info.name.to_ascii_lowercase();
        if self.policy == DuplicatePolicy::Reject && self.operators.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                entry: "operator",
                name: info.name,
            });
        }
        debug!(operator = %info.name, precedence = info.precedence(), "register operator");
        self.operators.insert(key, Arc::new(info));
        Ok(())
    }

    pub fn register_function(&mut self, info: FunctionInfo) -> Result<(), RegistryError> {
        let key = info.name.to_ascii_lowercase();
        if self.policy == DuplicatePolicy::Reject && self.functions.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                entry: "function",
                name: info.name,
            });
        }
        debug!(function = %info.name, arity = %info.arity, "register function");
        self.functions.insert(key, Arc::new(info));
        Ok(())
    }

    /// Register an operator from a raw routine.
    pub fn operator(
        &mut self,
        name: &str,
        spec: OperatorSpec,
        evaluate: impl Fn(&dyn EvalContext, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        self.register_operator(OperatorInfo::new(name, spec, evaluate))
    }

    /// Register a function from a raw routine. The routine sees the context
    /// and may accept a variable number of arguments.
    pub fn function(
        &mut self,
        name: &str,
        arity: Arity,
        evaluate: impl Fn(&dyn EvalContext, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        self.register_function(FunctionInfo::new(name, arity, evaluate))
    }

    pub fn function0<R, F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        R: IntoEvalResult,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let evaluate = move |_: &dyn EvalContext, _: &[Value]| -> EvalResult { f().into_eval_result() };
        self.register_function(
            FunctionInfo::new(name, Arity::Fixed(0), evaluate).with_signature(Vec::new(), R::KIND),
        )
    }

    pub fn function1<A, R, F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        A: FromValue,
        R: IntoEvalResult,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let fn_name: Arc<str> = Arc::from(name);
        let evaluate = move |_: &dyn EvalContext, args: &[Value]| -> EvalResult {
            let a = typed_arg::<A>(&fn_name, args, 0)?;
            f(a).into_eval_result()
        };
        self.register_function(
            FunctionInfo::new(name, Arity::Fixed(1), evaluate).with_signature(vec![A::KIND], R::KIND),
        )
    }

    pub fn function2<A, B, R, F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        A: FromValue,
        B: FromValue,
        R: IntoEvalResult,
        F: Fn(A, B) -> R + Send + Sync + 'static,
    {
        let fn_name: Arc<str> = Arc::from(name);
        let evaluate = move |_: &dyn EvalContext, args: &[Value]| -> EvalResult {
            let a = typed_arg::<A>(&fn_name, args, 0)?;
            let b = typed_arg::<B>(&fn_name, args, 1)?;
            f(a, b).into_eval_result()
        };
        self.register_function(
            FunctionInfo::new(name, Arity::Fixed(2), evaluate)
                .with_signature(vec![A::KIND, B::KIND], R::KIND),
        )
    }

    pub fn function3<A, B, C, R, F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        A: FromValue,
        B: FromValue,
        C: FromValue,
        R: IntoEvalResult,
        F: Fn(A, B, C) -> R + Send + Sync + 'static,
    {
        let fn_name: Arc<str> = Arc::from(name);
        let evaluate = move |_: &dyn EvalContext, args: &[Value]| -> EvalResult {
            let a = typed_arg::<A>(&fn_name, args, 0)?;
            let b = typed_arg::<B>(&fn_name, args, 1)?;
            let c = typed_arg::<C>(&fn_name, args, 2)?;
            f(a, b, c).into_eval_result()
        };
        self.register_function(
            FunctionInfo::new(name, Arity::Fixed(3), evaluate)
                .with_signature(vec![A::KIND, B::KIND, C::KIND], R::KIND),
        )
    }

    /// Insert without the duplicate check; used for built-ins.
    pub(crate) fn insert_operator(&mut self, info: OperatorInfo) {
        self.operators
            .insert(info.name.to_ascii_lowercase(), Arc::new(info));
    }

    pub(crate) fn insert_function(&mut self, info: FunctionInfo) {
        self.functions
            .insert(info.name.to_ascii_lowercase(), Arc::new(info));
    }

    pub fn build(self) -> Registry {
        debug!(
            operators = self.operators.len(),
            functions = self.functions.len(),
            "registry built"
        );
        Registry {
            operators: self.operators,
            functions: self.functions,
        }
    }

    pub fn build_shared(self) -> SharedRegistry {
        SharedRegistry::new(self.build())
    }
}

fn typed_arg<A: FromValue>(name: &str, args: &[Value], index: usize) -> Result<A, EvalError> {
    let Some(value) = args.get(index) else {
        return Err(arity_mismatch(name, Arity::Fixed(index + 1), args.len()));
    };
    A::from_value(value).ok_or_else(|| argument_type(name, index, A::KIND, value.kind()))
}
