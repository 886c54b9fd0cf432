//! Unit tests for the generated `FlagRecord` implementation.

use anyhow::{Result, anyhow, ensure};
use quote::quote;
use syn::{DeriveInput, parse_quote};

use super::expand;

fn normalised(tokens: &proc_macro2::TokenStream) -> String {
    tokens.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn generates_register_for_each_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Cfg {
            /// First value.
            string_value1: String,
            #[flag(long = "string-value-two", short = 's')]
            string_value2: String,
            #[flag(required)]
            string_value3: String,
            #[flag(skip)]
            cache: u8,
        }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err))?;
    let expected = quote! {
        impl ::tagflags::FlagRecord for Cfg {
            fn register<'__flags>(
                &'__flags mut self,
                __binder: &mut ::tagflags::Binder<'__flags>,
            ) -> ::tagflags::BindResult<()> {
                let Self { string_value1, string_value2, string_value3, .. } = self;
                __binder.bind(
                    ::tagflags::FieldSpec::new("string_value1")
                        .long("string-value1")
                        .help("First value."),
                    string_value1
                )?;
                __binder.bind(
                    ::tagflags::FieldSpec::new("string_value2")
                        .long("string-value-two")
                        .short('s'),
                    string_value2
                )?;
                __binder.bind(
                    ::tagflags::FieldSpec::new("string_value3")
                        .long("string-value3")
                        .required(),
                    string_value3
                )?;
                ::core::result::Result::Ok(())
            }
        }
    };
    ensure!(
        normalised(&tokens) == normalised(&expected),
        "generated tokens differ:\n{tokens}\n!=\n{expected}"
    );
    Ok(())
}

#[test]
fn flattened_fields_register_nested_records() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[flag(crate = "flags")]
        struct Outer {
            #[flag(flatten, prefix = "db-")]
            db: Database,
        }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err))?;
    let rendered = normalised(&tokens);
    ensure!(
        rendered.contains("impl flags :: FlagRecord for Outer"),
        "crate override ignored: {rendered}"
    );
    ensure!(
        rendered.contains(r#"__binder . flatten ("db-" , db) ?"#),
        "missing flatten call: {rendered}"
    );
    Ok(())
}

#[test]
fn unit_struct_discards_the_binder() -> Result<()> {
    let input: DeriveInput = parse_quote! { struct Nothing; };
    let tokens = expand(&input).map_err(|err| anyhow!(err))?;
    let rendered = normalised(&tokens);
    ensure!(
        rendered.contains("let _ = __binder ;"),
        "binder not consumed: {rendered}"
    );
    Ok(())
}

#[test]
fn generics_are_forwarded() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T: Clone> where T: Default {
            value: T,
        }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err))?;
    let rendered = normalised(&tokens);
    ensure!(
        rendered.contains("impl < T : Clone > :: tagflags :: FlagRecord for Wrapper < T > where T : Default"),
        "generics not forwarded: {rendered}"
    );
    Ok(())
}

#[test]
fn non_records_report_the_shape_error() -> Result<()> {
    let input: DeriveInput = parse_quote! { enum Config { A, B } };
    let Err(err) = expand(&input) else {
        return Err(anyhow!("expected enum input to fail"));
    };
    ensure!(
        err.to_string() == "object must be a pointer to struct or interface",
        "unexpected error: {err}"
    );
    Ok(())
}
