//! Opaque JSON documents and the node-query primitive used to rewrite them.
//!
//! Templates route by tag, not by position, so every mutation starts with
//! [`find_node_by_field_mut`]: "the entry of the array at `path` whose
//! `field` equals `value`". Paths are JSON pointers (RFC 6901). A lookup
//! that finds nothing is an error; the synthesizer never silently skips a
//! target.

use reality_core::{RealityError, Result};
use serde_json::{Map, Value};

/// A structured configuration document.
///
/// Key order is preserved exactly as loaded; only the fields the
/// synthesizer targets ever change.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wrap an already-parsed JSON value
    #[must_use]
    pub const fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Borrow the document root
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    /// Take the document root
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Look up a node by JSON pointer
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.root.pointer(pointer)
    }

    /// Serialize as pretty JSON with a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }
}

/// Find the element of the array at `path` whose `field` equals `value`.
pub fn find_node_by_field<'a>(
    document: &'a Value,
    path: &str,
    field: &str,
    value: &str,
) -> Result<&'a Value> {
    document
        .pointer(path)
        .and_then(Value::as_array)
        .ok_or_else(|| RealityError::path_not_found(path))?
        .iter()
        .find(|node| matches_field(node, field, value))
        .ok_or_else(|| RealityError::path_not_found(selector(path, field, value)))
}

/// Mutable variant of [`find_node_by_field`].
pub fn find_node_by_field_mut<'a>(
    document: &'a mut Value,
    path: &str,
    field: &str,
    value: &str,
) -> Result<&'a mut Value> {
    document
        .pointer_mut(path)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| RealityError::path_not_found(path))?
        .iter_mut()
        .find(|node| matches_field(node, field, value))
        .ok_or_else(|| RealityError::path_not_found(selector(path, field, value)))
}

/// The object at `pointer` below `node`.
///
/// `label` names `node` in error messages (e.g. `/inbounds[tag=reality-in]`).
pub fn object_at_mut<'a>(
    node: &'a mut Value,
    pointer: &str,
    label: &str,
) -> Result<&'a mut Map<String, Value>> {
    node.pointer_mut(pointer)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| RealityError::path_not_found(format!("{label}{pointer}")))
}

/// The non-empty array at `pointer` below `node`.
pub fn array_at_mut<'a>(
    node: &'a mut Value,
    pointer: &str,
    label: &str,
) -> Result<&'a mut Vec<Value>> {
    node.pointer_mut(pointer)
        .and_then(Value::as_array_mut)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| RealityError::path_not_found(format!("{label}{pointer}")))
}

/// The first element of the array at `pointer`, which must be an object.
pub fn first_object_mut<'a>(
    node: &'a mut Value,
    pointer: &str,
    label: &str,
) -> Result<&'a mut Map<String, Value>> {
    array_at_mut(node, pointer, label)?
        .first_mut()
        .and_then(Value::as_object_mut)
        .ok_or_else(|| RealityError::path_not_found(format!("{label}{pointer}/0")))
}

/// Human-readable address of a tagged node, used in logs and errors
#[must_use]
pub fn selector(path: &str, field: &str, value: &str) -> String {
    format!("{path}[{field}={value}]")
}

fn matches_field(node: &Value, field: &str, value: &str) -> bool {
    node.get(field).and_then(Value::as_str) == Some(value)
}
