//! Vox runtime: the value model and the callable registry.
//!
//! - [`Value`]: dynamic value with total conversions (`as_number`, `as_bool`,
//!   `as_string`) and identical coercion rules for every evaluator
//! - [`ops`]: arithmetic and duck-typed [`compare`](ops::compare)
//! - [`EvalContext`]: field lookup, with [`MapContext`] and
//!   [`ReflectionContext`] implementations
//! - [`Registry`]: operators and functions bound to native routines, built
//!   with [`RegistryBuilder`]

mod context;
mod convert;
pub mod errors;
mod object;
pub mod ops;
mod registry;
mod shared;
mod stdlib;
mod value;

pub use context::{EmptyContext, EvalContext, MapContext, ReflectionContext};
pub use convert::{FromValue, IntoEvalResult, IntoValue};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use object::{HostObject, ObjectRef};
pub use registry::{
    Arity, Callable, DuplicatePolicy, FunctionInfo, NativeFn, OperatorInfo, Registry,
    RegistryBuilder, RegistryError,
};
pub use shared::SharedRegistry;
pub use value::{Value, ValueKind, DATE_DISPLAY_FORMAT};
