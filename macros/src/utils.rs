//! Utility functions for procedural macros
//!
//! Type inspection and naming helpers used by the `Record` derive.

use syn::ext::IdentExt;
use syn::Type;

/// Check if a type is an Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|ident| ident == "Option")
}

/// Check if a type is a plain `String`
pub fn is_string_type(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|ident| ident == "String")
}

/// The store column name for a field: its identifier without a raw prefix
pub fn column_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

fn last_segment_ident(ty: &Type) -> Option<&syn::Ident> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|segment| &segment.ident)
        }
        _ => None,
    }
}
