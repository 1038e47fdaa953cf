//! Purpose: Shared utility helpers used by the catalog runtime and its tools.
//! Exports: `clamp`, `error`, `flatten`, `prefix_tree`, `reload`, `template`.
//! Role: Independent, self-contained transformations; no data flows between them.
//! Invariants: Every helper is synchronous, reentrant, and owns no global state.
//! Invariants: Helpers prefer explicit inputs/outputs over hidden state.

pub mod clamp;
pub mod error;
pub mod flatten;
pub mod prefix_tree;
pub mod reload;
pub mod template;

pub use clamp::{clamp, clamp_default};
pub use error::{Error, ErrorKind};
pub use flatten::{Flatten, flatten};
pub use prefix_tree::{flatten_prefix_tree, make_prefix_tree};
pub use reload::{Reloadable, reload_on_change};
pub use template::{RenderedParams, expand_templates};
