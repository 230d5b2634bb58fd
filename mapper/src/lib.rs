//! # fieldmap
//!
//! Copies values between fields of loosely related structs (domain objects and view
//! models, say) that are explicitly linked with a per-field mapping declaration.
//!
//! # Usage
//!
//! ```ignore
//! use fieldmap::Mappable;
//!
//! #[derive(Mappable, Default)]
//! struct Movie {
//!     title: String,
//!     cost:  f32,
//! }
//!
//! #[derive(Mappable, Default)]
//! struct Person {
//!     name: String,
//! }
//!
//! #[derive(Mappable, Default)]
//! struct TicketViewModel {
//!     #[mapping(to = Movie, field = "title")]
//!     movie:     String,
//!     #[mapping(to = Movie)]
//!     cost:      f32,
//!     #[mapping(to = Person, field = "name")]
//!     bought_by: String,
//! }
//!
//! let ticket = TicketViewModel { movie: "Alien".into(), cost: 9.5, bought_by: "Ripley".into() };
//! let (mut movie, mut person) = (Movie::default(), Person::default());
//! fieldmap::map_to!(&ticket, &mut movie, &mut person)?;
//!
//! let mut view = TicketViewModel::default();
//! fieldmap::map_from!(&mut view, &movie, &person)?;
//! ```
//!
//! # Field attributes
//!
//! - `#[mapping(to = Type, field = "name")]`: the field corresponds to `name` on objects
//!   whose runtime type is exactly `Type`. `field` defaults to the annotated field's name.
//! - `#[mapping(base)]`: the field holds the "parent" part of the struct; its fields, mapped
//!   or not, are inherited.
//! - `#[mapping(readonly)]`: writes to the field fail with [`Error::Access`].
//! - `#[mapping(skip)]`: the field is invisible to the mapper and need not be `Clone`.
//!
//! Fields without a visibility modifier are private: the mapper elevates their access
//! with an [`AccessGuard`] for the duration of a transfer and always restores it.
//!
//! # Errors
//!
//! A target field that does not exist on the counterpart is skipped silently. Writing a
//! read-only field fails with [`Error::Access`]; writing a value of a different type fails
//! with [`Error::TypeMismatch`]. Failures abort the call immediately.

extern crate self as fieldmap;

mod access;
mod discovery;
mod error;
mod mapper;
mod reflect;
mod transfer;

#[cfg(test)]
mod tests;

pub use access::AccessGuard;
pub use discovery::{MappedField, mapped_fields};
pub use error::{AccessViolation, Error, Result};
pub use fieldmap_macros::Mappable;
pub use mapper::{map_from, map_from_destination, map_to, map_to_destination};
pub use reflect::{
    FieldInfo, FieldRef, MappingDescriptor, Mutability, Reflect, TypeInfo, Typed, Visibility,
};
