//! Input parsing for the `FlagRecord` derive macro.
//!
//! This module gathers the struct identifier, fields, and attribute metadata
//! in one pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, ParsedInput, parse_field_attrs, parse_struct_attrs};

/// Message for inputs that are not records.
pub(crate) const NOT_A_RECORD: &str = "object must be a pointer to struct or interface";

/// Gathers information from the user-provided struct.
///
/// Enums and unions are rejected outright; tuple structs are rejected because
/// their fields have no names to derive flags from. Unit structs bind nothing.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "FlagRecord requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(&input.ident, NOT_A_RECORD));
        }
    };

    let field_attrs = fields
        .iter()
        .map(parse_field_attrs)
        .collect::<syn::Result<Vec<FieldAttrs>>>()?;
    Ok(ParsedInput {
        ident: input.ident.clone(),
        fields,
        struct_attrs,
        field_attrs,
    })
}
