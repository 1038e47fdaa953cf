//! Purpose: Restrict numeric values to a closed interval.
//! Exports: `clamp`, `clamp_default`.
//! Role: Leaf helper used when normalizing counts and offsets in catalog entries.
//! Invariants: Result is always `max(lower, min(upper, value))`; never panics.

/// Clamp `value` to the closed interval `[lower, upper]`.
///
/// Unlike `Ord::clamp`, inverted bounds (`lower > upper`) are not rejected:
/// the composition `max(lower, min(upper, value))` is evaluated as written,
/// which then yields `lower` for every input.
pub fn clamp<T: PartialOrd>(value: T, lower: T, upper: T) -> T {
    let bounded = if value > upper { upper } else { value };
    if bounded < lower { lower } else { bounded }
}

/// Clamp with the default bounds `[0, i64::MAX]`.
pub fn clamp_default(value: i64) -> i64 {
    clamp(value, 0, i64::MAX)
}
