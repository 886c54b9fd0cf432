//! Tests for flag name validation and binding builders.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, Ident, parse_quote};

use super::flags::{validate_long, validate_short};
use super::{Binding, build_bindings};
use crate::derive::parse::parse_input;

fn bindings_for(input: &DeriveInput) -> syn::Result<Vec<Binding>> {
    build_bindings(&parse_input(input)?)
}

fn longs(bindings: &[Binding]) -> Vec<&str> {
    bindings
        .iter()
        .filter_map(|binding| match binding {
            Binding::Flag { long, .. } => Some(long.as_str()),
            Binding::Flatten { .. } => None,
        })
        .collect()
}

#[rstest]
#[case("alpha")]
#[case("alpha-1")]
fn accepts_valid_long_flags(#[case] long: &str) -> Result<()> {
    let name: Ident = parse_quote!(field);
    validate_long(&name, long).map_err(|err| anyhow!(err))
}

#[rstest]
#[case("")]
#[case("bad/flag")]
#[case("alpha_beta")]
#[case("has space")]
#[case("_alpha")]
#[case("-alpha")]
fn rejects_invalid_long_flags(#[case] bad: &str) -> Result<()> {
    let name: Ident = parse_quote!(field);
    let Err(err) = validate_long(&name, bad) else {
        return Err(anyhow!("expected invalid long flag for {bad}"));
    };
    ensure!(
        err.to_string().contains("invalid `long`"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case("help")]
#[case("version")]
fn rejects_reserved_long_flags(#[case] long: &str) -> Result<()> {
    let name: Ident = parse_quote!(field);
    let Err(err) = validate_long(&name, long) else {
        return Err(anyhow!("expected reserved long flag error for {long}"));
    };
    ensure!(
        err.to_string().contains("reserved `long`"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case('-', "invalid `short`")]
#[case('h', "reserved `short`")]
#[case('V', "reserved `short`")]
fn rejects_bad_short_flags(#[case] short: char, #[case] expected: &str) -> Result<()> {
    let name: Ident = parse_quote!(field);
    let Err(err) = validate_short(&name, short) else {
        return Err(anyhow!("expected short flag error for {short}"));
    };
    ensure!(err.to_string().contains(expected), "unexpected error: {err}");
    Ok(())
}

#[test]
fn derives_kebab_case_longs_in_declaration_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Cfg1 {
            string_value1: String,
            #[flag(long = "string-value-two", short = 's')]
            string_value2: String,
            #[flag(required)]
            string_value3: String,
            counter_value1: Counter,
            string_slice_value1: Vec<String>,
            r#type: String,
        }
    };
    let bindings = bindings_for(&input)?;
    let names = longs(&bindings);
    ensure!(
        names
            == [
                "string-value1",
                "string-value-two",
                "string-value3",
                "counter-value1",
                "string-slice-value1",
                "type",
            ],
        "unexpected longs {names:?}"
    );
    Ok(())
}

#[test]
fn struct_prefix_applies_to_fields_and_flattened_records() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[flag(prefix = "app-")]
        struct Demo {
            host: String,
            #[flag(flatten, prefix = "db-")]
            db: Database,
        }
    };
    let bindings = bindings_for(&input)?;
    let Some(Binding::Flatten { prefix, .. }) = bindings.get(1) else {
        return Err(anyhow!("expected flatten binding, got {bindings:?}"));
    };
    ensure!(prefix == "app-db-", "unexpected prefix {prefix}");
    ensure!(longs(&bindings) == ["app-host"], "unexpected longs");
    Ok(())
}

#[test]
fn skipped_fields_produce_no_binding() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[flag(skip)]
            cache: std::collections::BTreeMap<String, String>,
            name: String,
        }
    };
    let bindings = bindings_for(&input)?;
    ensure!(bindings.len() == 1, "expected skipped field to be omitted");
    Ok(())
}

#[rstest]
#[case::long(
    parse_quote! { struct D { alpha: String, #[flag(long = "alpha")] beta: String } },
    "duplicate `long` value 'alpha' (already used by `alpha`)"
)]
#[case::short(
    parse_quote! { struct D { #[flag(short = 's')] alpha: String, #[flag(short = 's')] sigma: String } },
    "duplicate `short` value 's' (already used by `alpha`)"
)]
#[case::reserved(
    parse_quote! { struct D { #[flag(short = 'h')] host: String } },
    "reserved `short` 'h'"
)]
#[case::prefixed_reserved(
    parse_quote! { #[flag(prefix = "-")] struct D { host: String } },
    "must not start with '-'"
)]
fn rejects_colliding_or_reserved_names(
    #[case] input: DeriveInput,
    #[case] expected: &str,
) -> Result<()> {
    let Err(err) = bindings_for(&input) else {
        return Err(anyhow!("expected name error"));
    };
    ensure!(err.to_string().contains(expected), "unexpected error: {err}");
    Ok(())
}
