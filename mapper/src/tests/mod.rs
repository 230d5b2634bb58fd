//! Scenario fixtures shared by the mapping tests
//!
//! Fixture fields are private on purpose so every transfer goes through access
//! elevation. Child modules can still read them directly.

#![allow(clippy::expect_used, clippy::unwrap_used, reason = "tests")]

mod hierarchy;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Mappable, TypeInfo};

static SERIAL: Mutex<()> = Mutex::new(());

/// Accessibility is tracked per field of a type, so tests that assert on it must not
/// overlap with other transfers on the same fixture types.
fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `true` when no field of the type is currently elevated
fn all_private_fields_restored(info: &'static TypeInfo) -> bool {
    info.ancestry()
        .flat_map(TypeInfo::fields)
        .filter(|field| field.visibility() == crate::Visibility::Private)
        .all(|field| !field.is_accessible())
}

#[derive(Mappable, Debug, Default, Clone, PartialEq)]
struct SucceedingA {
    #[mapping(to = SucceedingB, field = "field_c")]
    field_a: String,
    #[mapping(to = SucceedingB, field = "field_d")]
    field_b: i32,
}

#[derive(Mappable, Debug, Default, Clone, PartialEq)]
struct SucceedingB {
    field_c: String,
    field_d: i32,
}

/// Same shape as `SucceedingB` but a different type
#[derive(Mappable, Debug, Default, Clone, PartialEq)]
struct SucceedingC {
    field_c: String,
    field_d: i32,
}

#[derive(Mappable, Debug, Default)]
struct NoSuchFieldA {
    #[mapping(to = NoSuchFieldB, field = "field_e")]
    field_a: String,
    #[mapping(to = NoSuchFieldB, field = "field_d")]
    field_b: i32,
}

#[derive(Mappable, Debug, Default)]
struct NoSuchFieldB {
    field_c: String,
    field_d: i32,
}

#[derive(Mappable, Debug, Default)]
struct IllegalArgumentA {
    #[mapping(to = IllegalArgumentB, field = "field_c")]
    field_a: String,
    #[mapping(to = IllegalArgumentB, field = "field_d")]
    field_b: i32,
}

#[derive(Mappable, Debug, Default)]
struct IllegalArgumentB {
    field_c: String,
    field_d: bool,
}

#[derive(Mappable, Debug, Default)]
struct IllegalAccessA {
    #[mapping(to = IllegalAccessB, field = "field_c")]
    field_a: String,
    #[mapping(to = IllegalAccessB, field = "field_d")]
    field_b: i32,
}

#[derive(Mappable, Debug)]
struct IllegalAccessB {
    field_c: String,
    #[mapping(readonly)]
    field_d: i32,
}

impl IllegalAccessB {
    fn new(field_c: &str, field_d: i32) -> Self {
        Self {
            field_c: field_c.to_string(),
            field_d,
        }
    }
}

#[derive(Mappable, Debug, Default)]
struct Movie {
    title: String,
    cost:  f32,
}

#[derive(Mappable, Debug, Default)]
struct Person {
    name: String,
    age:  u32,
}

#[derive(Mappable, Debug, Default)]
struct TicketViewModel {
    #[mapping(to = Movie, field = "title")]
    movie:     String,
    #[mapping(to = Movie)]
    cost:      f32,
    #[mapping(to = Person, field = "name")]
    bought_by: String,
}

/// A view whose mapped field may only be set at construction
#[derive(Mappable, Debug, Default)]
struct FrozenTicket {
    #[mapping(to = Movie, field = "title", readonly)]
    movie: String,
}

/// A read-only field between two writable ones, in declaration order
#[derive(Mappable, Debug, Default)]
struct PartialFailureA {
    #[mapping(to = PartialFailureB)]
    first:  String,
    #[mapping(to = PartialFailureB)]
    locked: i32,
    #[mapping(to = PartialFailureB)]
    last:   String,
}

#[derive(Mappable, Debug, Default)]
struct PartialFailureB {
    first:  String,
    #[mapping(readonly)]
    locked: i32,
    last:   String,
}
