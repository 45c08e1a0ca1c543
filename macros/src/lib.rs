//! Procedural macros for the cf-loader crate
//!
//! This crate provides the `Record` derive, which generates the store-facing
//! half of every canonical disclosure record so the entity modules only have
//! to write their normalization rules.

use proc_macro::TokenStream;

// Import modules
mod record;
mod utils;

/// Derive macro for canonical store records
///
/// Generates an implementation of `crate::entity::Record` for a struct with
/// named fields. The struct-level attribute names the entity kind; exactly one
/// `String` field must be marked as the identity.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Serialize, Record)]
/// #[record(kind = "Filer")]
/// pub struct Filer {
///     #[record(id)]
///     pub id: String,
///     pub name: String,
///     pub r#type: Option<String>,
/// }
/// ```
///
/// The generated column list uses each field's name with any raw-identifier
/// prefix removed (`r#type` becomes `type`), which matches what serde emits.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::process_derive_record(input)
}
