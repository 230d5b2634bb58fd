//! Public mapping operations

use tracing::{debug, trace};

use crate::discovery::mapped_fields;
use crate::error::Result;
use crate::reflect::Reflect;
use crate::transfer::{self, Transfer};

/// Copies every mapped field of `source` onto the first destination whose runtime type is
/// the field's target type.
///
/// Fields without a matching destination are skipped, as are fields whose target field
/// does not exist on the matched destination. At most one transfer happens per mapped
/// field, even when several destinations share the target type.
///
/// # Errors
///
/// Fails on the first field whose write is refused: [`Error::Access`](crate::Error::Access)
/// for read-only targets, [`Error::TypeMismatch`](crate::Error::TypeMismatch) when the
/// declared types differ. Fields processed before the failing one stay written.
pub fn map_to(source: &dyn Reflect, destinations: &mut [&mut dyn Reflect]) -> Result<()> {
    let source_type = source.type_info();
    let mut tally = Tally::default();

    for mapped in mapped_fields(source_type) {
        let descriptor = mapped.descriptor();
        let Some(destination) = destinations
            .iter_mut()
            .find(|destination| descriptor.matches(destination.type_info()))
        else {
            trace!(
                field = mapped.field().field().name(),
                target = descriptor.target_type_name(),
                "No destination of the target type"
            );
            tally.unmatched += 1;
            continue;
        };

        let outcome = transfer::push(source, &mapped, &mut **destination).inspect_err(|error| {
            debug!(source = source_type.type_name(), "Mapping failed: {error:?}");
        })?;
        tally.record(outcome);
    }

    tally.log("map_to", source_type.type_name());
    Ok(())
}

/// Fills every mapped field of `destination` from the first source whose runtime type is
/// the field's target type.
///
/// The mirror image of [`map_to`]: the annotated object is written, the sources are
/// only read.
///
/// # Errors
///
/// Same as [`map_to`], with the annotated fields of `destination` as the write side.
pub fn map_from(destination: &mut dyn Reflect, sources: &[&dyn Reflect]) -> Result<()> {
    let destination_type = destination.type_info();
    let mut tally = Tally::default();

    for mapped in mapped_fields(destination_type) {
        let descriptor = mapped.descriptor();
        let Some(source) = sources
            .iter()
            .find(|source| descriptor.matches(source.type_info()))
        else {
            trace!(
                field = mapped.field().field().name(),
                target = descriptor.target_type_name(),
                "No source of the target type"
            );
            tally.unmatched += 1;
            continue;
        };

        let outcome = transfer::pull(destination, &mapped, *source).inspect_err(|error| {
            debug!(
                destination = destination_type.type_name(),
                "Mapping failed: {error:?}"
            );
        })?;
        tally.record(outcome);
    }

    tally.log("map_from", destination_type.type_name());
    Ok(())
}

/// [`map_to`] with a single destination, returned for chaining
///
/// # Errors
///
/// See [`map_to`].
pub fn map_to_destination<D: Reflect>(source: &dyn Reflect, mut destination: D) -> Result<D> {
    let target: &mut dyn Reflect = &mut destination;
    map_to(source, &mut [target])?;
    Ok(destination)
}

/// [`map_from`] with a single counterpart: fills `source`'s mapped fields from
/// `destination` and returns `source` for chaining
///
/// # Errors
///
/// See [`map_from`].
pub fn map_from_destination<S: Reflect>(mut source: S, destination: &dyn Reflect) -> Result<S> {
    map_from(&mut source, &[destination])?;
    Ok(source)
}

/// Maps one source onto any number of destinations of different types.
///
/// ```ignore
/// fieldmap::map_to!(&ticket, &mut movie, &mut person)?;
/// ```
#[macro_export]
macro_rules! map_to {
    ($source:expr $(, $destination:expr)* $(,)?) => {
        $crate::map_to(
            $source,
            &mut [$($destination as &mut dyn $crate::Reflect),*],
        )
    };
}

/// Fills one destination from any number of sources of different types.
///
/// ```ignore
/// fieldmap::map_from!(&mut ticket, &movie, &person)?;
/// ```
#[macro_export]
macro_rules! map_from {
    ($destination:expr $(, $source:expr)* $(,)?) => {
        $crate::map_from(
            $destination,
            &[$($source as &dyn $crate::Reflect),*],
        )
    };
}

#[derive(Default)]
struct Tally {
    copied:    usize,
    skipped:   usize,
    unmatched: usize,
}

impl Tally {
    const fn record(&mut self, outcome: Transfer) {
        match outcome {
            Transfer::Copied => self.copied += 1,
            Transfer::Skipped => self.skipped += 1,
        }
    }

    fn log(&self, operation: &str, type_name: &str) {
        debug!(
            operation,
            type_name,
            copied = self.copied,
            skipped = self.skipped,
            unmatched = self.unmatched,
            "Mapping complete"
        );
    }
}
