//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[flag(crate = "...")]` attribute value into a
//! `TokenStream` that replaces the hardcoded `::tagflags` path in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::tagflags` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::tagflags }, |path| quote! { #path })
}
