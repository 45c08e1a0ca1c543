//! Record derive macro implementation

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

use crate::utils;

/// Receiver for the struct that derives `Record`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordReceiver {
    /// The struct identifier
    ident: syn::Ident,
    /// Entity kind variant name from `#[record(kind = "...")]`
    kind: String,
    /// The struct data with parsed fields
    data: ast::Data<(), RecordFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(record))]
struct RecordFieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    /// Marks the identity field
    #[darling(default)]
    id: bool,
}

/// Process the Record derive macro
pub fn process_derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let receiver = match RecordReceiver::from_derive_input(&input) {
        Ok(receiver) => receiver,
        Err(err) => return err.write_errors().into(),
    };

    match generate_record_impl(&receiver) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

fn generate_record_impl(receiver: &RecordReceiver) -> darling::Result<proc_macro2::TokenStream> {
    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let id_fields: Vec<&RecordFieldReceiver> = fields.iter().filter(|f| f.id).collect();
    let id_field = match id_fields.as_slice() {
        [single] => *single,
        [] => {
            return Err(darling::Error::custom(
                "Record requires exactly one field marked #[record(id)]",
            )
            .with_span(&receiver.ident));
        }
        [_, second, ..] => {
            let span = second.ident.as_ref().unwrap_or(&receiver.ident);
            return Err(
                darling::Error::custom("only one field may be marked #[record(id)]")
                    .with_span(span),
            );
        }
    };

    let id_ident = id_field
        .ident
        .as_ref()
        .ok_or_else(|| darling::Error::custom("identity field must be named"))?;
    if !utils::is_string_type(&id_field.ty) || utils::is_option_type(&id_field.ty) {
        return Err(
            darling::Error::custom("the #[record(id)] field must be a String").with_span(id_ident),
        );
    }

    let columns: Vec<String> = fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .map(utils::column_name)
        .collect();

    let struct_name = &receiver.ident;
    let kind_variant = format_ident!("{}", receiver.kind);

    Ok(quote! {
        impl crate::entity::Record for #struct_name {
            const KIND: crate::entity::EntityKind = crate::entity::EntityKind::#kind_variant;

            fn record_id(&self) -> &str {
                &self.#id_ident
            }

            fn columns() -> &'static [&'static str] {
                &[#(#columns),*]
            }
        }
    })
}
