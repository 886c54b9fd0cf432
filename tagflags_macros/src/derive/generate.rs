//! `FlagRecord` trait implementation generation.
//!
//! The generated `register` destructures `self` into disjoint field borrows
//! and hands each one to the binder together with its `FieldSpec`.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::Generics;

use super::build::Binding;
use super::crate_path;
use super::parse::ParsedInput;

fn spec_tokens(krate: &TokenStream, binding: &Binding) -> Option<TokenStream> {
    let Binding::Flag {
        field,
        long,
        short,
        required,
        help,
        hidden,
        ..
    } = binding
    else {
        return None;
    };
    let short_call = short.map(|ch| quote! { .short(#ch) });
    let required_call = required.then(|| quote! { .required() });
    let help_call = help.as_ref().map(|text| quote! { .help(#text) });
    let hidden_call = hidden.then(|| quote! { .hidden() });
    Some(quote! {
        #krate::FieldSpec::new(#field).long(#long) #short_call #required_call #help_call #hidden_call
    })
}

fn register_statement(krate: &TokenStream, binding: &Binding) -> TokenStream {
    match binding {
        Binding::Flag { ident, .. } => {
            let spec = spec_tokens(krate, binding);
            quote_spanned! { ident.span() =>
                __binder.bind(#spec, #ident)?;
            }
        }
        Binding::Flatten { ident, prefix } => quote_spanned! { ident.span() =>
            __binder.flatten(#prefix, #ident)?;
        },
    }
}

fn binding_ident(binding: &Binding) -> &syn::Ident {
    match binding {
        Binding::Flag { ident, .. } | Binding::Flatten { ident, .. } => ident,
    }
}

/// Generate the `FlagRecord` trait implementation.
pub(crate) fn generate_impl(
    parsed: &ParsedInput,
    generics: &Generics,
    bindings: &[Binding],
) -> TokenStream {
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let ident = &parsed.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let idents = bindings.iter().map(binding_ident);
    let statements = bindings
        .iter()
        .map(|binding| register_statement(&krate, binding));
    let unused_binder = bindings.is_empty().then(|| quote! { let _ = __binder; });

    quote! {
        impl #impl_generics #krate::FlagRecord for #ident #ty_generics #where_clause {
            fn register<'__flags>(
                &'__flags mut self,
                __binder: &mut #krate::Binder<'__flags>,
            ) -> #krate::BindResult<()> {
                let Self { #( #idents, )* .. } = self;
                #unused_binder
                #( #statements )*
                ::core::result::Result::Ok(())
            }
        }
    }
}
