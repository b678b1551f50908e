//! Serialized script blocks.

use serde::{Deserialize, Serialize};

/// One entry of a flat script.
///
/// Serialized with the kind and its payload side by side:
///
/// ```json
/// [
///   { "kind": "Function", "payload": { "name": "Max", "arity": 2 } },
///   { "kind": "Integer", "payload": 3 },
///   { "kind": "Float", "payload": 7.5 }
/// ]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum Block {
    /// Call; the next `arity` subtrees are its arguments.
    Function(FunctionBlock),
    /// Host object, looked up by id when the script is compiled.
    ObjectRef(String),
    Boolean(bool),
    String(String),
    Integer(i64),
    Float(f64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionBlock {
    pub name: String,
    /// Declared argument count. When omitted, the callee's fixed arity is
    /// used; variadic callees must declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
}

impl Block {
    /// A call block with a declared arity.
    pub fn call(name: impl Into<String>, arity: usize) -> Self {
        Block::Function(FunctionBlock {
            name: name.into(),
            arity: Some(arity),
        })
    }

    pub fn string(text: impl Into<String>) -> Self {
        Block::String(text.into())
    }

    pub fn object(id: impl Into<String>) -> Self {
        Block::ObjectRef(id.into())
    }
}
