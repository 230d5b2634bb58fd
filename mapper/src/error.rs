use thiserror::Error;

/// Result type for the `fieldmap` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Why a field refused access
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AccessViolation {
    /// The field was declared read-only and cannot be written
    #[strum(serialize = "field is immutable")]
    Immutable,
    /// The field is private and no access guard was held
    #[strum(serialize = "field is not accessible")]
    NotAccessible,
}

/// Failures surfaced by mapping operations
#[derive(Debug, Error)]
pub enum Error {
    /// A write hit a read-only field, or a private field was touched without a guard
    #[error("Cannot access `{type_name}.{field}`: {violation}")]
    Access {
        /// Type declaring the field
        type_name: &'static str,
        /// Field name
        field:     &'static str,
        /// What was refused
        violation: AccessViolation,
    },

    /// The value's type differs from the field's declared type
    #[error("Cannot assign a `{found}` to `{type_name}.{field}` of type `{expected}`")]
    TypeMismatch {
        /// Type declaring the field being written
        type_name: &'static str,
        /// Field being written
        field:     &'static str,
        /// Declared type of the written field
        expected:  &'static str,
        /// Type of the value read from the other side
        found:     &'static str,
    },

    /// A hand-written `Reflect` impl disagrees with its `TypeInfo`
    #[error("Reflection metadata for `{type_name}.{field}` does not match its accessors")]
    InconsistentMetadata {
        /// Type whose metadata lists the field
        type_name: &'static str,
        /// Field the accessors could not reach
        field:     &'static str,
    },
}

impl Error {
    /// Create an access error for a read-only field
    #[must_use]
    pub const fn immutable(type_name: &'static str, field: &'static str) -> Self {
        Self::Access {
            type_name,
            field,
            violation: AccessViolation::Immutable,
        }
    }

    /// Create an access error for a private field read or written without a guard
    #[must_use]
    pub const fn not_accessible(type_name: &'static str, field: &'static str) -> Self {
        Self::Access {
            type_name,
            field,
            violation: AccessViolation::NotAccessible,
        }
    }

    /// Create a type mismatch error
    #[must_use]
    pub const fn type_mismatch(
        type_name: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            type_name,
            field,
            expected,
            found,
        }
    }

    /// Create an error for metadata that names a field the accessors cannot reach
    #[must_use]
    pub const fn inconsistent(type_name: &'static str, field: &'static str) -> Self {
        Self::InconsistentMetadata { type_name, field }
    }

    /// `true` for [`Error::Access`]
    #[must_use]
    pub const fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }

    /// `true` for [`Error::TypeMismatch`]
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::immutable("app::Ticket", "id").to_string(),
            "Cannot access `app::Ticket.id`: field is immutable"
        );
        assert_eq!(
            Error::not_accessible("app::Ticket", "secret").to_string(),
            "Cannot access `app::Ticket.secret`: field is not accessible"
        );
        assert_eq!(
            Error::type_mismatch("app::Flags", "enabled", "bool", "i32").to_string(),
            "Cannot assign a `i32` to `app::Flags.enabled` of type `bool`"
        );
    }

    #[test]
    fn test_error_kind_predicates() {
        assert!(Error::immutable("T", "f").is_access());
        assert!(!Error::immutable("T", "f").is_type_mismatch());
        assert!(Error::type_mismatch("T", "f", "bool", "i32").is_type_mismatch());
        assert!(!Error::inconsistent("T", "f").is_access());
    }
}
