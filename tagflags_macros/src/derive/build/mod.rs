//! Flag builders used by the `FlagRecord` derive macro.
//!
//! This module turns parsed field metadata into [`Binding`]s, validating
//! long and short names at compile time. It tracks claimed names so that
//! collisions between the struct's own fields surface as spanned errors;
//! collisions involving flattened records are caught when binding at run
//! time.

mod flags;
#[cfg(test)]
mod tests;

pub(crate) use flags::{Binding, build_bindings};
