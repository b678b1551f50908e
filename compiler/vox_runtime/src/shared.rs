//! Thread-safe shared registry handle.

use std::fmt;
use std::sync::Arc;

use vox_ir::{OperatorSpec, OperatorTable};

use crate::Registry;

/// Cheaply clonable, immutable handle to a [`Registry`].
///
/// Compiled expressions and scripts hold `Arc`s to individual entries, so a
/// handle is only needed while compiling.
#[derive(Clone)]
pub struct SharedRegistry(Arc<Registry>);

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        SharedRegistry(Arc::new(registry))
    }
}

impl std::ops::Deref for SharedRegistry {
    type Target = Registry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl OperatorTable for SharedRegistry {
    fn operator_spec(&self, text: &str) -> Option<OperatorSpec> {
        self.0.operator_spec(text)
    }
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRegistry({:?})", &*self.0)
    }
}
