//! Purpose: Reload-before-access combinator over caller-owned sources.
//! Exports: `Reloadable`, `reload_on_change`.
//! Role: Catalog sources track their own staleness; accessors resync first.
//! Invariants: `needs_reload` is consulted exactly once per call.
//! Invariants: The combinator never clears the changed indicator; `reload` does.
//! Invariants: No locking; concurrent callers need external synchronization.

use crate::error::Error;

/// A source that can detect its own staleness and resynchronize.
pub trait Reloadable {
    /// Whether the underlying source changed since the last reload.
    fn needs_reload(&self) -> bool;

    /// Resynchronize internal state with the underlying source.
    fn reload(&mut self) -> Result<(), Error>;
}

/// Run `op` against `target`, reloading first if the source changed.
///
/// Errors from `reload` and from `op` propagate unchanged; a failed reload
/// means `op` never runs.
pub fn reload_on_change<R, T, F>(target: &mut R, op: F) -> Result<T, Error>
where
    R: Reloadable + ?Sized,
    F: FnOnce(&mut R) -> Result<T, Error>,
{
    if target.needs_reload() {
        tracing::debug!("source changed, reloading before access");
        target.reload()?;
    }
    op(target)
}
