//! Depth-first search over untyped JSON trees.
//!
//! The embedded script payloads the strategies work with are loosely
//! structured and have no fixed schema, so lookups happen by walking a
//! `serde_json::Value` tree rather than deserializing into types. The
//! input is always freshly parsed JSON, hence acyclic; no cycle
//! detection is needed and traversal is O(nodes).

use serde_json::{Map, Value};

/// Search-truthiness of a value.
///
/// Empty objects, empty arrays, empty strings, zero, `false`, and
/// `null` all read as "not found", and the search continues past them.
/// A legitimately empty-but-present value is therefore
/// indistinguishable from an absent one. That is a known sharp edge,
/// kept deliberately: the platform payload handling was tuned against
/// this exact behavior, and strict presence-checking would change which
/// nodes match for some inputs.
fn is_found(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Find the first value stored under `key` anywhere in `node`.
///
/// Objects are checked for the key directly before recursing into their
/// values in iteration order; arrays recurse element by element. The
/// first hit whose value is search-truthy (see [`is_found`]) wins and
/// short-circuits the rest of the walk.
pub fn find_key<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if let Some(value) = map.get(key) {
                if is_found(value) {
                    return Some(value);
                }
            }
            map.values().find_map(|value| find_key(value, key))
        }
        Value::Array(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}

/// Find the first object node satisfying `pred`, depth-first.
///
/// Same traversal order as [`find_key`] but matching a predicate on the
/// object itself instead of looking up a key; the first match wins and
/// short-circuits.
pub fn find_node<'a, F>(node: &'a Value, pred: &F) -> Option<&'a Value>
where
    F: Fn(&Map<String, Value>) -> bool,
{
    match node {
        Value::Object(map) => {
            if pred(map) {
                return Some(node);
            }
            map.values().find_map(|value| find_node(value, pred))
        }
        Value::Array(items) => items.iter().find_map(|item| find_node(item, pred)),
        _ => None,
    }
}
