//! Ticket office walkthrough for `fieldmap`
//!
//! Splits a ticket view model into its `Movie` and `Person` models, assembles a fresh view
//! model back from them, then shows how a read-only view field is rejected. Each step is
//! printed as JSON. Transfer events go to a trace file in the temp directory; set
//! `FIELDMAP_LOG=debug` (or `trace`) to see them.

mod logging;

use error_stack::{Report, ResultExt};
use fieldmap::{Mappable, map_from, map_to};
use serde::Serialize;

use crate::logging::TracingLevel;

/// Failures of the walkthrough itself
#[derive(Debug, thiserror::Error)]
enum WalkthroughError {
    #[error("Mapping step `{0}` failed")]
    Mapping(&'static str),
    #[error("Could not render step `{0}` as JSON")]
    Render(&'static str),
}

#[derive(Mappable, Serialize, Debug, Default)]
struct Movie {
    title: String,
    cost:  f32,
}

#[derive(Mappable, Serialize, Debug, Default)]
struct Person {
    name: String,
    age:  u32,
}

#[derive(Mappable, Serialize, Debug, Default)]
struct TicketViewModel {
    #[mapping(to = Movie, field = "title")]
    movie:     String,
    #[mapping(to = Movie)]
    cost:      f32,
    #[mapping(to = Person, field = "name")]
    bought_by: String,
}

/// Set once when the ticket is printed
#[derive(Mappable, Serialize, Debug, Default)]
struct ReceiptViewModel {
    #[mapping(to = Movie, field = "title", readonly)]
    movie: String,
}

fn main() -> Result<(), Report<WalkthroughError>> {
    let _guard = logging::init_file_tracing();
    logging::set_tracing_level(TracingLevel::from_env());

    let ticket = TicketViewModel {
        movie:     "Star Wars: The Force Awakens".to_string(),
        cost:      123.5,
        bought_by: "Simon Evertsson".to_string(),
    };
    let mut movie = Movie::default();
    let mut person = Person::default();

    map_to!(&ticket, &mut movie, &mut person)
        .change_context(WalkthroughError::Mapping("split"))?;
    print_step("split: movie", &movie)?;
    print_step("split: person", &person)?;

    let mut assembled = TicketViewModel::default();
    map_from!(&mut assembled, &movie, &person)
        .change_context(WalkthroughError::Mapping("assemble"))?;
    print_step("assemble: ticket", &assembled)?;

    let mut receipt = ReceiptViewModel {
        movie: "The Empire Strikes Back".to_string(),
    };
    match map_from!(&mut receipt, &movie) {
        Ok(()) => tracing::warn!("read-only receipt field was overwritten"),
        Err(report) => {
            tracing::info!("receipt rejected as expected: {report:?}");
            println!("receipt: rejected ({})", report.current_context());
        }
    }
    print_step("receipt: unchanged", &receipt)?;

    println!("trace log: {}", logging::trace_log_path().display());
    Ok(())
}

fn print_step(step: &'static str, value: &impl Serialize) -> Result<(), Report<WalkthroughError>> {
    let rendered =
        serde_json::to_string_pretty(value).change_context(WalkthroughError::Render(step))?;
    println!("{step}:\n{rendered}");
    Ok(())
}
