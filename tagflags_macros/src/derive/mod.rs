//! Expansion pipeline for `#[derive(FlagRecord)]`: parse attributes,
//! validate flag names, then generate the trait implementation.

mod build;
mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let bindings = build::build_bindings(&parsed)?;
    Ok(generate::generate_impl(&parsed, &input.generics, &bindings))
}

#[cfg(test)]
mod tests;
