//! Static reflection model used by the mapper
//!
//! Every mappable type owns one [`TypeInfo`] (built by `#[derive(Mappable)]`), which lists
//! its declared fields and, optionally, the base type it embeds. The [`Reflect`] trait is
//! the per-instance side: reading and assigning declared fields by name.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Whether a field can be read or written without elevating access first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Declared with `pub` or a restricted `pub(..)`
    Public,
    /// Declared without a visibility modifier
    Private,
}

/// Whether a field may be written after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// The field accepts writes
    Mutable,
    /// The field was declared `#[mapping(readonly)]`; writes fail with an access error
    Immutable,
}

/// The `(target type, target field name)` pair attached to a mapped field
#[derive(Clone, Copy)]
pub struct MappingDescriptor {
    target_type_name: fn() -> &'static str,
    target_type:      fn() -> TypeId,
    target_field:     &'static str,
}

impl MappingDescriptor {
    /// Creates a descriptor pointing at `target_field` on objects of the given type
    #[must_use]
    pub const fn new(
        target_type_name: fn() -> &'static str,
        target_type: fn() -> TypeId,
        target_field: &'static str,
    ) -> Self {
        Self {
            target_type_name,
            target_type,
            target_field,
        }
    }

    /// Runtime type a counterpart must have to match this descriptor
    #[must_use]
    pub fn target_type(&self) -> TypeId {
        (self.target_type)()
    }

    /// Name of the counterpart type, for diagnostics
    #[must_use]
    pub fn target_type_name(&self) -> &'static str {
        (self.target_type_name)()
    }

    /// Field to read or write on the counterpart
    #[must_use]
    pub const fn target_field(&self) -> &'static str {
        self.target_field
    }

    /// Exact type equality; neither subtypes nor embedding types match
    #[must_use]
    pub fn matches(&self, candidate: &TypeInfo) -> bool {
        candidate.type_id() == self.target_type()
    }
}

impl fmt::Debug for MappingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingDescriptor")
            .field("target_type", &self.target_type_name())
            .field("target_field", &self.target_field)
            .finish()
    }
}

/// Metadata for one declared field of a reflected type
pub struct FieldInfo {
    name:       &'static str,
    type_name:  fn() -> &'static str,
    value_type: fn() -> TypeId,
    visibility: Visibility,
    mutability: Mutability,
    mapping:    Option<MappingDescriptor>,
    elevations: AtomicUsize,
}

impl FieldInfo {
    /// Creates a public, mutable, unmapped field
    #[must_use]
    pub const fn new(
        name: &'static str,
        type_name: fn() -> &'static str,
        value_type: fn() -> TypeId,
    ) -> Self {
        Self {
            name,
            type_name,
            value_type,
            visibility: Visibility::Public,
            mutability: Mutability::Mutable,
            mapping: None,
            elevations: AtomicUsize::new(0),
        }
    }

    /// Marks the field as private
    #[must_use]
    pub const fn private(self) -> Self {
        Self {
            visibility: Visibility::Private,
            ..self
        }
    }

    /// Marks the field as write-protected
    #[must_use]
    pub const fn immutable(self) -> Self {
        Self {
            mutability: Mutability::Immutable,
            ..self
        }
    }

    /// Attaches the field's mapping descriptor
    #[must_use]
    pub const fn mapped(self, descriptor: MappingDescriptor) -> Self {
        Self {
            mapping: Some(descriptor),
            ..self
        }
    }

    /// Field name as declared
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the field's declared type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// `TypeId` of the field's declared type
    #[must_use]
    pub fn value_type(&self) -> TypeId {
        (self.value_type)()
    }

    /// Declared visibility
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Declared mutability
    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        self.mutability
    }

    /// `true` unless the field was declared read-only
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        matches!(self.mutability, Mutability::Mutable)
    }

    /// Mapping descriptor, if the field is a mapped field
    #[must_use]
    pub const fn mapping(&self) -> Option<&MappingDescriptor> {
        self.mapping.as_ref()
    }

    /// Public fields are always accessible; private ones only while an
    /// [`AccessGuard`](crate::AccessGuard) is held on them.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        matches!(self.visibility, Visibility::Public) || self.elevations.load(Ordering::Acquire) > 0
    }

    pub(crate) fn elevate(&self) {
        self.elevations.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn release(&self) {
        self.elevations.fetch_sub(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type_name", &self.type_name())
            .field("visibility", &self.visibility)
            .field("mutability", &self.mutability)
            .field("mapping", &self.mapping)
            .field("accessible", &self.is_accessible())
            .finish()
    }
}

/// Static description of a reflected type
pub struct TypeInfo {
    type_name: fn() -> &'static str,
    type_id:   fn() -> TypeId,
    fields:    &'static [FieldInfo],
    base:      Option<fn() -> &'static Self>,
}

impl TypeInfo {
    /// Creates a type with the given declared fields and no base
    #[must_use]
    pub const fn new(
        type_name: fn() -> &'static str,
        type_id: fn() -> TypeId,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self {
            type_name,
            type_id,
            fields,
            base: None,
        }
    }

    /// Declares the embedded base type whose fields this type inherits
    #[must_use]
    pub const fn with_base(self, base: fn() -> &'static Self) -> Self {
        Self {
            base: Some(base),
            ..self
        }
    }

    /// Fully qualified type name
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Runtime identity of the type
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Fields declared directly on this type, excluding inherited ones
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    /// Looks up a field declared directly on this type
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The embedded base type, if any
    #[must_use]
    pub fn base(&self) -> Option<&'static Self> {
        self.base.map(|base| base())
    }

    /// This type followed by each ancestor, most derived first
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static Self> {
        std::iter::successors(Some(self), |info| info.base())
    }

    /// Finds `name` on this type or the nearest ancestor declaring it
    #[must_use]
    pub fn resolve_field(&'static self, name: &str) -> Option<FieldRef> {
        self.ancestry()
            .find_map(|owner| owner.field(name).map(|field| FieldRef::new(owner, field)))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_name", &self.type_name())
            .field("fields", &self.fields)
            .field("base", &self.base().map(Self::type_name))
            .finish()
    }
}

/// A field located on a specific type of a hierarchy
#[derive(Debug, Clone, Copy)]
pub struct FieldRef {
    owner: &'static TypeInfo,
    field: &'static FieldInfo,
}

impl FieldRef {
    /// Pairs a field with the type that declares it
    #[must_use]
    pub const fn new(owner: &'static TypeInfo, field: &'static FieldInfo) -> Self {
        Self { owner, field }
    }

    /// The declaring type
    #[must_use]
    pub const fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// The field metadata
    #[must_use]
    pub const fn field(&self) -> &'static FieldInfo {
        self.field
    }

    /// Identity of the field: declaring type plus name
    #[must_use]
    pub fn key(&self) -> (TypeId, &'static str) {
        (self.owner.type_id(), self.field.name())
    }
}

/// Types that expose a static [`TypeInfo`]
pub trait Typed {
    /// The type's reflection metadata
    fn info() -> &'static TypeInfo;
}

/// Instance-level reflection, implemented by `#[derive(Mappable)]`
///
/// The accessors here are unchecked: they ignore visibility and mutability.
/// The mapper goes through [`crate::access`] which enforces both.
pub trait Reflect: Any {
    /// The runtime type's reflection metadata
    fn type_info(&self) -> &'static TypeInfo;

    /// Upcast to `Any`
    fn as_any(&self) -> &dyn Any;

    /// The embedded base sub-object, if the type declares one
    fn base(&self) -> Option<&dyn Reflect>;

    /// Mutable access to the embedded base sub-object
    fn base_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Value of a field declared directly on this type
    fn declared_field(&self, name: &str) -> Option<&dyn Any>;

    /// Clones `value` into a field declared directly on this type.
    ///
    /// Returns `false` when the field is unknown, read-only, or of a different type.
    fn assign_declared_field(&mut self, name: &str, value: &dyn Any) -> bool;
}

impl dyn Reflect {
    /// The sub-object whose runtime type is `target`: `self` or one of its bases
    #[must_use]
    pub fn upcast(&self, target: TypeId) -> Option<&dyn Reflect> {
        if self.type_info().type_id() == target {
            Some(self)
        } else {
            self.base().and_then(|base| base.upcast(target))
        }
    }

    /// Mutable variant of [`upcast`](Self::upcast)
    #[must_use]
    pub fn upcast_mut(&mut self, target: TypeId) -> Option<&mut dyn Reflect> {
        if self.type_info().type_id() == target {
            Some(self)
        } else {
            self.base_mut().and_then(|base| base.upcast_mut(target))
        }
    }

    /// Downcasts to a concrete type
    #[must_use]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}
