//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a literal from an attribute value using `extractor`.
///
/// On mismatch the error names the key and the expected literal kind, for
/// example `short must be a char`.
fn parse_lit<T, F>(
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal)
        .ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute value.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a character literal from an attribute value.
pub(crate) fn lit_char(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<char> {
    parse_lit(meta, key, "char", |lit| match lit {
        Lit::Char(c) => Some(c.value()),
        _ => None,
    })
}
