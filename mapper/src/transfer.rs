//! One read-then-write between a mapped field and its counterpart field
//!
//! ```text
//! resolve target ─┬─ not found ──────────────────────────────▶ Skipped
//!                 └─ found ─▶ elevate ─▶ read ─▶ write ─┬─ ok ─▶ Copied
//!                                                       └─ err ─▶ AccessError / TypeMismatchError
//! ```
//!
//! Guards drop on every exit path, so accessibility is restored whether the write
//! succeeds or fails.

use error_stack::ResultExt;
use tracing::debug;

use crate::access::{self, AccessGuard};
use crate::discovery::MappedField;
use crate::error::Result;
use crate::reflect::{FieldRef, Reflect};

/// Outcome of a single field transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    /// The value was copied
    Copied,
    /// The counterpart type has no field with the target name
    Skipped,
}

/// `counterpart.target_field = owner.mapped_field`
pub(crate) fn push(
    owner: &dyn Reflect,
    mapped: &MappedField,
    counterpart: &mut dyn Reflect,
) -> Result<Transfer> {
    let Some(target) = resolve_target(mapped, counterpart) else {
        return Ok(Transfer::Skipped);
    };

    copy(owner, mapped.field(), counterpart, target)
        .attach(describe(mapped, "to"))
        .map(|()| Transfer::Copied)
}

/// `owner.mapped_field = counterpart.target_field`
pub(crate) fn pull(
    owner: &mut dyn Reflect,
    mapped: &MappedField,
    counterpart: &dyn Reflect,
) -> Result<Transfer> {
    let Some(source) = resolve_target(mapped, counterpart) else {
        return Ok(Transfer::Skipped);
    };

    copy(counterpart, source, owner, mapped.field())
        .attach(describe(mapped, "from"))
        .map(|()| Transfer::Copied)
}

fn resolve_target(mapped: &MappedField, counterpart: &dyn Reflect) -> Option<FieldRef> {
    let descriptor = mapped.descriptor();
    let target = counterpart
        .type_info()
        .resolve_field(descriptor.target_field());

    if target.is_none() {
        debug!(
            field = mapped.field().field().name(),
            counterpart = descriptor.target_type_name(),
            target_field = descriptor.target_field(),
            "Counterpart has no such field, skipping"
        );
    }
    target
}

fn copy(
    reader: &dyn Reflect,
    read_field: FieldRef,
    writer: &mut dyn Reflect,
    write_field: FieldRef,
) -> Result<()> {
    let _read_access = AccessGuard::acquire(read_field.field());
    let _write_access = write_field
        .field()
        .is_mutable()
        .then(|| AccessGuard::acquire(write_field.field()));

    let value = access::read(reader, read_field)?;
    access::write(writer, write_field, value, read_field.field().type_name())?;

    debug!(
        from = read_field.field().name(),
        to = write_field.field().name(),
        "Copied field"
    );
    Ok(())
}

fn describe(mapped: &MappedField, direction: &str) -> String {
    let descriptor = mapped.descriptor();
    format!(
        "while mapping `{}.{}` {direction} `{}.{}`",
        mapped.field().owner().type_name(),
        mapped.field().field().name(),
        descriptor.target_type_name(),
        descriptor.target_field(),
    )
}
