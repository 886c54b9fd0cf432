//! Flag name validation and binding builders for the derive macro.

use std::collections::HashMap;

use heck::ToKebabCase;
use syn::Ident;
use syn::ext::IdentExt;

use crate::derive::parse::{FieldAttrs, ParsedInput};

const RESERVED_SHORTS: &[char] = &['h', 'V'];
const RESERVED_LONGS: &[&str] = &["help", "version"];

/// One registration emitted into the generated `register` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Binding {
    /// A field bound to its own flag.
    Flag {
        ident: Ident,
        field: String,
        long: String,
        short: Option<char>,
        required: bool,
        help: Option<String>,
        hidden: bool,
    },
    /// A nested record whose flags are bound inline.
    Flatten { ident: Ident, prefix: String },
}

fn long_validation_error(long: &str) -> Option<String> {
    if long.is_empty() {
        Some(format!("invalid `long` '{long}': must be non-empty"))
    } else if let Some(prefix) = long.chars().next().filter(|c| matches!(c, '-' | '_')) {
        Some(format!("invalid `long` '{long}': must not start with '{prefix}'"))
    } else if !long.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Some(format!(
            "invalid `long` '{long}': must contain only ASCII alphanumeric characters or '-'"
        ))
    } else {
        None
    }
}

pub(super) fn validate_long(name: &Ident, long: &str) -> syn::Result<()> {
    if let Some(message) = long_validation_error(long) {
        return Err(syn::Error::new_spanned(name, message));
    }
    if RESERVED_LONGS.contains(&long) {
        return Err(syn::Error::new_spanned(
            name,
            format!("reserved `long` '{long}' conflicts with global clap flags"),
        ));
    }
    Ok(())
}

pub(super) fn validate_short(name: &Ident, short: char) -> syn::Result<()> {
    if !short.is_ascii_alphanumeric() {
        return Err(syn::Error::new_spanned(
            name,
            format!("invalid `short` '{short}': must be ASCII alphanumeric"),
        ));
    }
    if RESERVED_SHORTS.contains(&short) {
        return Err(syn::Error::new_spanned(
            name,
            format!("reserved `short` '{short}' conflicts with global clap flags"),
        ));
    }
    Ok(())
}

/// Names claimed so far, keyed to the field that claimed them.
#[derive(Default)]
struct ClaimedNames {
    longs: HashMap<String, String>,
    shorts: HashMap<char, String>,
}

impl ClaimedNames {
    fn claim(&mut self, name: &Ident, long: &str, short: Option<char>) -> syn::Result<()> {
        let field = name.unraw().to_string();
        if let Some(first) = self.longs.insert(long.to_owned(), field.clone()) {
            return Err(syn::Error::new_spanned(
                name,
                format!("duplicate `long` value '{long}' (already used by `{first}`)"),
            ));
        }
        if let Some(ch) = short
            && let Some(first) = self.shorts.insert(ch, field)
        {
            return Err(syn::Error::new_spanned(
                name,
                format!("duplicate `short` value '{ch}' (already used by `{first}`)"),
            ));
        }
        Ok(())
    }
}

fn field_binding(
    name: &Ident,
    attrs: &FieldAttrs,
    struct_prefix: &str,
    claimed: &mut ClaimedNames,
) -> syn::Result<Binding> {
    let field = name.unraw().to_string();
    if attrs.flatten {
        let nested = attrs.prefix.as_deref().unwrap_or_default();
        return Ok(Binding::Flatten {
            ident: name.clone(),
            prefix: format!("{struct_prefix}{nested}"),
        });
    }

    let base = attrs.long.clone().unwrap_or_else(|| field.to_kebab_case());
    let long = format!("{struct_prefix}{base}");
    validate_long(name, &long)?;
    if let Some(short) = attrs.short {
        validate_short(name, short)?;
    }
    claimed.claim(name, &long, attrs.short)?;

    Ok(Binding::Flag {
        ident: name.clone(),
        field,
        long,
        short: attrs.short,
        required: attrs.required,
        help: attrs.help.clone(),
        hidden: attrs.hidden,
    })
}

/// Builds one [`Binding`] per bound field, in declaration order.
pub(crate) fn build_bindings(input: &ParsedInput) -> syn::Result<Vec<Binding>> {
    if input.fields.len() != input.field_attrs.len() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            format!(
                "field metadata mismatch: expected {} `FieldAttrs` entries but found {}",
                input.fields.len(),
                input.field_attrs.len()
            ),
        ));
    }

    let struct_prefix = input.struct_attrs.prefix.as_deref().unwrap_or_default();
    let mut claimed = ClaimedNames::default();
    let mut bindings = Vec::with_capacity(input.fields.len());
    for (field, attrs) in input.fields.iter().zip(&input.field_attrs) {
        if attrs.skip {
            continue;
        }
        let Some(name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(
                field,
                "unnamed (tuple) fields are not supported",
            ));
        };
        bindings.push(field_binding(name, attrs, struct_prefix, &mut claimed)?);
    }
    Ok(bindings)
}
