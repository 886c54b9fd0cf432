//! Procedural macros for `tagflags`.
//!
//! `#[derive(FlagRecord)]` reads `#[flag(...)]` attributes on a struct and
//! its fields and emits a `tagflags::FlagRecord` implementation that binds
//! each field to a clap argument. Long flag names are generated from
//! `snake_case` field names using the `kebab-case` convention.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `tagflags::FlagRecord`.
///
/// Field attributes: `long = "..."`, `short = 'c'`, `required`,
/// `help = "..."`, `hidden`, `skip`, `flatten`, and `prefix = "..."` (with
/// `flatten`). Struct attributes: `prefix = "..."` and `crate = "..."`.
#[proc_macro_derive(FlagRecord, attributes(flag))]
pub fn derive_flag_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
