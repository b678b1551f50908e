//! Host object references.
//!
//! The engine never owns host data. A host exposes an object by implementing
//! [`HostObject`] and wrapping it in an [`ObjectRef`]; expressions can then
//! read its fields by dotted path (see `ReflectionContext`) and host functions
//! can downcast it back to the concrete type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::Value;

/// A host-side object visible to expressions.
pub trait HostObject: Send + Sync {
    /// Name shown in diagnostics and `Debug` output.
    fn type_name(&self) -> &str;

    /// Read a named field. `None` when the object has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a host object.
///
/// Equality is identity: two refs are equal only when they point at the same
/// allocation.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn HostObject>);

impl ObjectRef {
    pub fn new(object: impl HostObject + 'static) -> Self {
        ObjectRef(Arc::new(object))
    }

    pub fn from_arc(object: Arc<dyn HostObject>) -> Self {
        ObjectRef(object)
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<Value> {
        self.0.field(name)
    }

    /// Borrow the underlying object as `T`, if it is one.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }
}
