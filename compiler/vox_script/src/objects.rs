//! Resolution of `ObjectRef` block ids to host objects.

use rustc_hash::FxHashMap;
use vox_runtime::ObjectRef;

/// Maps the ids stored in `ObjectRef` blocks to live host objects.
pub trait ObjectResolver {
    fn resolve(&self, id: &str) -> Option<ObjectRef>;
}

/// Resolver for scripts without object references.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObjects;

impl ObjectResolver for NoObjects {
    fn resolve(&self, _id: &str) -> Option<ObjectRef> {
        None
    }
}

/// Id-keyed object table.
#[derive(Clone, Debug, Default)]
pub struct ObjectTable {
    objects: FxHashMap<String, ObjectRef>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, object: ObjectRef) -> Option<ObjectRef> {
        self.objects.insert(id.into(), object)
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, object: ObjectRef) -> Self {
        self.insert(id, object);
        self
    }
}

impl ObjectResolver for ObjectTable {
    fn resolve(&self, id: &str) -> Option<ObjectRef> {
        self.objects.get(id).cloned()
    }
}
