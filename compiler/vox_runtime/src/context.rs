//! Evaluation contexts: where field references get their values.

use rustc_hash::FxHashMap;

use crate::{ObjectRef, Value};

/// Resolves field names to values for one evaluation.
///
/// Missing fields are `Null`, never an error.
pub trait EvalContext {
    fn get_field(&self, name: &str) -> Value;
}

impl<T: EvalContext + ?Sized> EvalContext for &T {
    fn get_field(&self, name: &str) -> Value {
        (**self).get_field(name)
    }
}

/// A context with no fields.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyContext;

impl EvalContext for EmptyContext {
    fn get_field(&self, _name: &str) -> Value {
        Value::Null
    }
}

/// Name-to-value mapping. Names match exactly.
#[derive(Clone, Debug, Default)]
pub struct MapContext {
    fields: FxHashMap<String, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Insert or replace a field, returning the previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl EvalContext for MapContext {
    fn get_field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = MapContext::new();
        for (name, value) in iter {
            ctx.set_field(name, value);
        }
        ctx
    }
}

/// Resolves dotted paths (`player.stats.hp`) against a host object graph.
///
/// Each segment reads a field of the object produced by the previous one.
/// The result is `Null` as soon as a segment is missing, yields `Null`, or
/// lands on a value that is not an object while segments remain.
#[derive(Clone, Debug, Default)]
pub struct ReflectionContext {
    source: Option<ObjectRef>,
}

impl ReflectionContext {
    pub fn new(source: ObjectRef) -> Self {
        ReflectionContext {
            source: Some(source),
        }
    }

    pub fn source(&self) -> Option<&ObjectRef> {
        self.source.as_ref()
    }
}

impl EvalContext for ReflectionContext {
    fn get_field(&self, name: &str) -> Value {
        let Some(source) = &self.source else {
            return Value::Null;
        };
        if name.is_empty() {
            return Value::Null;
        }

        let mut segments = name.split('.');
        let mut current = match segments.next().and_then(|first| source.field(first)) {
            Some(value) => value,
            None => return Value::Null,
        };
        for segment in segments {
            current = match &current {
                Value::Object(object) => object.field(segment).unwrap_or_default(),
                _ => return Value::Null,
            };
        }
        current
    }
}
