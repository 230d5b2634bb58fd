//! Checked field access
//!
//! Private fields can only be read or written while an [`AccessGuard`] is held on them.
//! Guards are counted, so overlapping guards on the same field restore its original
//! state once the last one is dropped.

use std::any::Any;

use error_stack::Report;
use tracing::trace;

use crate::error::{Error, Result};
use crate::reflect::{FieldInfo, FieldRef, Reflect};

/// Scoped elevation of a field's accessibility, released on drop
#[must_use = "access is released as soon as the guard is dropped"]
pub struct AccessGuard {
    field: &'static FieldInfo,
}

impl AccessGuard {
    /// Elevates `field` until the returned guard is dropped
    pub fn acquire(field: &'static FieldInfo) -> Self {
        field.elevate();
        trace!(field = field.name(), "Elevated field access");
        Self { field }
    }
}

impl Drop for AccessGuard {
    fn drop(&mut self) {
        self.field.release();
        trace!(field = self.field.name(), "Restored field access");
    }
}

/// Reads `field` from `object` or from the base sub-object that declares it
pub(crate) fn read(object: &dyn Reflect, field: FieldRef) -> Result<&dyn Any> {
    let owner = field.owner();
    let info = field.field();
    if !info.is_accessible() {
        return Err(Report::new(Error::not_accessible(
            owner.type_name(),
            info.name(),
        )));
    }

    object
        .upcast(owner.type_id())
        .and_then(|declaring| declaring.declared_field(info.name()))
        .ok_or_else(|| Report::new(Error::inconsistent(owner.type_name(), info.name())))
}

/// Clones `value` into `field` on `object` or on the base sub-object that declares it.
///
/// `found` names the value's type for the mismatch diagnostic.
pub(crate) fn write(
    object: &mut dyn Reflect,
    field: FieldRef,
    value: &dyn Any,
    found: &'static str,
) -> Result<()> {
    let owner = field.owner();
    let info = field.field();
    if !info.is_mutable() {
        return Err(Report::new(Error::immutable(owner.type_name(), info.name())));
    }
    if !info.is_accessible() {
        return Err(Report::new(Error::not_accessible(
            owner.type_name(),
            info.name(),
        )));
    }
    if value.type_id() != info.value_type() {
        return Err(Report::new(Error::type_mismatch(
            owner.type_name(),
            info.name(),
            info.type_name(),
            found,
        )));
    }

    let assigned = object
        .upcast_mut(owner.type_id())
        .is_some_and(|declaring| declaring.assign_declared_field(info.name(), value));
    if assigned {
        Ok(())
    } else {
        Err(Report::new(Error::inconsistent(owner.type_name(), info.name())))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests")]

    use super::*;
    use crate::{Mappable, Typed};

    #[derive(Mappable, Default)]
    struct Vault {
        secret:    String,
        pub label: String,
        #[mapping(readonly)]
        pub serial: u32,
    }

    #[derive(Mappable)]
    #[allow(dead_code, reason = "only the metadata is exercised")]
    struct Locker {
        combination: u32,
    }

    fn field(name: &str) -> FieldRef {
        Vault::info()
            .resolve_field(name)
            .expect("fixture field exists")
    }

    #[test]
    fn test_private_read_requires_guard() {
        let vault = Vault {
            secret: "hunter2".to_string(),
            ..Vault::default()
        };

        let denied = read(&vault, field("secret")).expect_err("private read without guard");
        assert!(matches!(
            denied.current_context(),
            Error::Access {
                violation: crate::AccessViolation::NotAccessible,
                ..
            }
        ));

        let _guard = AccessGuard::acquire(field("secret").field());
        let value = read(&vault, field("secret")).expect("guarded read");
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn test_guards_nest_and_restore() {
        let secret = Locker::info()
            .field("combination")
            .expect("fixture field exists");
        assert!(!secret.is_accessible());
        {
            let _outer = AccessGuard::acquire(secret);
            {
                let _inner = AccessGuard::acquire(secret);
                assert!(secret.is_accessible());
            }
            assert!(secret.is_accessible());
        }
        assert!(!secret.is_accessible());
    }

    #[test]
    fn test_write_checks_mutability_before_type() {
        let mut vault = Vault::default();
        let error = write(&mut vault, field("serial"), &true, "bool").expect_err("readonly");
        assert!(matches!(
            error.current_context(),
            Error::Access {
                violation: crate::AccessViolation::Immutable,
                ..
            }
        ));
        assert_eq!(vault.serial, 0);
    }

    #[test]
    fn test_write_rejects_mismatched_value() {
        let mut vault = Vault::default();
        let error = write(&mut vault, field("label"), &42_i64, "i64").expect_err("mismatch");
        assert!(matches!(
            error.current_context(),
            Error::TypeMismatch {
                expected,
                found: "i64",
                ..
            } if expected.ends_with("String")
        ));
        assert!(vault.label.is_empty());
    }

    #[test]
    fn test_write_public_field() {
        let mut vault = Vault::default();
        write(&mut vault, field("label"), &"front door".to_string(), "String")
            .expect("public write");
        assert_eq!(vault.label, "front door");
    }
}
