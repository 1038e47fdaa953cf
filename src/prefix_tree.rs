//! Purpose: Convert between flat dotted-key mappings and nested mappings.
//! Exports: `make_prefix_tree`, `flatten_prefix_tree`.
//! Role: Catalog parameter files are authored flat; consumers want nesting.
//! Invariants: No key-format validation; keys without dots stay top-level.
//! Invariants: Collisions resolve last-write-wins in map iteration order.

use serde_json::{Map, Value};

/// Build a nested mapping from a flat mapping with dot-delimited keys.
///
/// `{"abc.xyz": 1, "abc.def": 2, "www": 3}` becomes
/// `{"abc": {"xyz": 1, "def": 2}, "www": 3}`.
///
/// When one key is a strict prefix of another (`"a"` and `"a.b"` both
/// present), the later entry in iteration order wins at the conflicting
/// node: a leaf sitting on a needed prefix is replaced by a subtree, and a
/// subtree sitting on a full key is replaced by the leaf.
pub fn make_prefix_tree(flat: &Map<String, Value>) -> Map<String, Value> {
    let mut tree = Map::new();
    for (key, value) in flat {
        insert_dotted(&mut tree, key, value.clone());
    }
    tree
}

fn insert_dotted(tree: &mut Map<String, Value>, key: &str, value: Value) {
    let mut node = tree;
    let mut remaining = key;
    while let Some((head, rest)) = remaining.split_once('.') {
        let slot = node
            .entry(head.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        node = match slot {
            Value::Object(child) => child,
            _ => return,
        };
        remaining = rest;
    }
    node.insert(remaining.to_string(), value);
}

/// Walk a nested mapping back to a flat mapping with dot-delimited keys.
///
/// Inverse of [`make_prefix_tree`] for trees without prefix conflicts.
/// Empty subtrees contribute no entries, so they do not survive a round
/// trip.
pub fn flatten_prefix_tree(tree: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into("", tree, &mut flat);
    flat
}

fn flatten_into(prefix: &str, node: &Map<String, Value>, flat: &mut Map<String, Value>) {
    for (key, value) in node {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(child) => flatten_into(&dotted, child, flat),
            leaf => {
                flat.insert(dotted, leaf.clone());
            }
        }
    }
}
