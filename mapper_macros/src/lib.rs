//! Procedural macros for fieldmap

mod attributes;
mod mappable;

use proc_macro::TokenStream;

/// Derives `fieldmap::Typed` and `fieldmap::Reflect` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// #[derive(Mappable)]
/// struct TicketViewModel {
///     #[mapping(to = Movie, field = "title")]
///     movie: String,
///
///     #[mapping(to = Movie)]      // maps to `Movie.cost`
///     cost: f32,
///
///     #[mapping(base)]            // inherits the fields of `ViewModel`
///     base: ViewModel,
///
///     #[mapping(readonly)]        // writes fail with an access error
///     pub id: u64,
///
///     #[mapping(skip)]            // not reflected, need not be `Clone`
///     cache: Vec<u8>,
/// }
/// ```
///
/// This will generate:
/// - a static `TypeInfo` listing every reflected field with its type, visibility,
///   mutability and mapping descriptor
/// - by-name read access and typed, cloning write access for those fields
/// - access to the `#[mapping(base)]` sub-object, if any
#[proc_macro_derive(Mappable, attributes(mapping))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    mappable::derive_mappable_impl(input)
}
