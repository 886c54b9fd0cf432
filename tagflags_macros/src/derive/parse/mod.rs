//! Parsing of `#[flag(...)]` attributes for the `FlagRecord` derive macro.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

mod input;
mod literals;

pub(crate) use input::parse_input;
use literals::{lit_char, lit_str};

/// Everything the derive needs from the input, gathered in one pass.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub fields: Vec<syn::Field>,
    pub struct_attrs: StructAttrs,
    pub field_attrs: Vec<FieldAttrs>,
}

/// Struct-level attributes recognised by `#[derive(FlagRecord)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Prepended to every long name the struct's own fields produce.
    pub prefix: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[flag(crate = "my_alias")]`, generated code references
    /// types through `my_alias::` instead of `::tagflags::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(FlagRecord)]`.
///
/// - `long`/`short` override the generated names.
/// - `required` makes clap insist on the flag.
/// - `help` replaces the doc comment as help text; `hidden` hides the flag.
/// - `skip` leaves the field unbound.
/// - `flatten` binds a nested record inline, optionally under `prefix`.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub long: Option<String>,
    pub short: Option<char>,
    pub required: bool,
    pub help: Option<String>,
    pub hidden: bool,
    pub skip: bool,
    pub flatten: bool,
    pub prefix: Option<String>,
}

/// Iterate all `#[flag(...)]` attributes once and apply a callback.
fn parse_flag_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown_key(meta: &syn::meta::ParseNestedMeta, allowed: &str) -> syn::Error {
    meta.error(format!("unknown `flag` attribute; expected one of {allowed}"))
}

/// Extracts `#[flag(...)]` metadata applied to a struct.
///
/// Unknown keys are rejected, as they are on fields.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_flag_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("prefix") => {
                out.prefix = Some(lit_str(meta, "prefix")?.value());
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => Err(unknown_key(meta, "`prefix`, `crate`")),
        }
    })?;
    Ok(out)
}

/// Applies one field attribute key.
fn apply_field_attr(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let key = meta.path.get_ident().map(ToString::to_string);
    match key.as_deref() {
        Some("long") => out.long = Some(lit_str(meta, "long")?.value()),
        Some("short") => out.short = Some(lit_char(meta, "short")?),
        Some("required") => out.required = true,
        Some("help") => out.help = Some(lit_str(meta, "help")?.value()),
        Some("hidden") => out.hidden = true,
        Some("skip") => out.skip = true,
        Some("flatten") => out.flatten = true,
        Some("prefix") => out.prefix = Some(lit_str(meta, "prefix")?.value()),
        _ => {
            return Err(unknown_key(
                meta,
                "`long`, `short`, `required`, `help`, `hidden`, `skip`, `flatten`, `prefix`",
            ));
        }
    }
    Ok(())
}

/// Collects the first paragraph of a field's doc comment.
fn doc_help(attrs: &[Attribute]) -> Option<String> {
    let lines = attrs.iter().filter_map(|attr| match &attr.meta {
        Meta::NameValue(nv) if nv.path.is_ident("doc") => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Some(s.value()),
            _ => None,
        },
        _ => None,
    });
    let paragraph: Vec<String> = lines
        .map(|line| line.trim().to_owned())
        .skip_while(String::is_empty)
        .take_while(|line| !line.is_empty())
        .collect();
    (!paragraph.is_empty()).then(|| paragraph.join(" "))
}

/// Parses field-level `#[flag(...)]` attributes.
///
/// Combinations that make no sense are rejected here: naming keys on a
/// flattened field, `prefix` without `flatten`, and `skip` with anything
/// else.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_flag_attrs(&field.attrs, |meta| apply_field_attr(meta, &mut out))?;
    if out.help.is_none() {
        out.help = doc_help(&field.attrs);
    }

    let names_flag = out.long.is_some() || out.short.is_some() || out.required || out.hidden;
    if out.flatten && names_flag {
        return Err(syn::Error::new_spanned(
            field,
            "`flatten` cannot be combined with `long`, `short`, `required`, or `hidden`",
        ));
    }
    if out.prefix.is_some() && !out.flatten {
        return Err(syn::Error::new_spanned(
            field,
            "`prefix` on a field requires `flatten`",
        ));
    }
    if out.skip && (names_flag || out.flatten) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other `flag` attributes",
        ));
    }
    Ok(out)
}
