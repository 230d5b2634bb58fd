//! Mapped field discovery across a type's hierarchy

use std::any::TypeId;

use itertools::Itertools;

use crate::reflect::{FieldRef, MappingDescriptor, TypeInfo};

/// A field carrying a mapping descriptor, located on its declaring type
#[derive(Debug, Clone, Copy)]
pub struct MappedField {
    field:      FieldRef,
    descriptor: MappingDescriptor,
}

impl MappedField {
    /// Where the field is declared
    #[must_use]
    pub const fn field(&self) -> FieldRef {
        self.field
    }

    /// The field's mapping descriptor
    #[must_use]
    pub const fn descriptor(&self) -> &MappingDescriptor {
        &self.descriptor
    }

    /// Identity: declaring type plus field name
    #[must_use]
    pub fn key(&self) -> (TypeId, &'static str) {
        self.field.key()
    }
}

/// Every mapped field declared on `type_info` or any of its ancestors.
///
/// The result has set semantics: each field appears once and callers must not rely on
/// the order. Nothing is cached; the hierarchy is walked on every call.
#[must_use]
pub fn mapped_fields(type_info: &'static TypeInfo) -> Vec<MappedField> {
    type_info
        .ancestry()
        .flat_map(|owner| {
            owner.fields().iter().filter_map(move |field| {
                field.mapping().map(|descriptor| MappedField {
                    field:      FieldRef::new(owner, field),
                    descriptor: *descriptor,
                })
            })
        })
        .unique_by(MappedField::key)
        .collect()
}
