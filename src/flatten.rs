//! Purpose: Lazily flatten arbitrarily nested JSON arrays into their leaves.
//! Exports: `Flatten`, `flatten`.
//! Role: Feed catalog entry post-processing with leaf values in document order.
//! Invariants: Depth-first, left-to-right; strings and objects are atomic leaves.
//! Invariants: Expansion is iterative (explicit work stack), so input depth
//! never grows the call stack.

use serde_json::Value;

/// Iterator over the leaves of a nested sequence of JSON values.
///
/// Arrays are the only values treated as sequences. Strings are yielded
/// whole, and objects count as structured leaves rather than containers.
#[derive(Debug)]
pub struct Flatten<'a> {
    stack: Vec<&'a Value>,
}

/// Flatten a nested sequence, yielding its leaves depth-first.
///
/// The iterator is lazy: partially consuming and dropping it has no effect
/// beyond releasing the borrow. Empty input (or nested empty arrays) yields
/// nothing.
pub fn flatten(values: &[Value]) -> Flatten<'_> {
    Flatten {
        stack: values.iter().rev().collect(),
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        while let Some(value) = self.stack.pop() {
            match value {
                Value::Array(items) => self.stack.extend(items.iter().rev()),
                leaf => return Some(leaf),
            }
        }
        None
    }
}
