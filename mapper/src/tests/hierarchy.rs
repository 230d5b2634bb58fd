use super::*;
use crate::{Typed, map_from_destination, map_to_destination};

#[derive(Mappable, Debug, Default)]
struct Entity {
    #[mapping(to = Record, field = "id")]
    id: u64,
}

#[derive(Mappable, Debug, Default)]
struct Customer {
    #[mapping(base)]
    entity: Entity,
    #[mapping(to = Record, field = "label")]
    name:   String,
}

#[derive(Mappable, Debug, Default, PartialEq)]
struct Record {
    id:    u64,
    label: String,
}

/// Declares nothing mapped itself; `label` comes from its `Record` base
#[derive(Mappable, Debug, Default)]
struct Archive {
    #[mapping(base)]
    record: Record,
    shelf:  u32,
}

#[derive(Mappable, Debug, Default)]
struct Summary {
    #[mapping(to = Archive, field = "label")]
    title: String,
    #[mapping(to = Archive)]
    shelf: u32,
}

#[test]
fn test_inherited_fields_are_mapped_to() {
    let _serial = serial();
    let customer = Customer {
        entity: Entity { id: 42 },
        name:   "Ada".to_string(),
    };

    let record = map_to_destination(&customer, Record::default()).unwrap();

    assert_eq!(
        record,
        Record {
            id:    42,
            label: "Ada".to_string(),
        }
    );
    assert!(all_private_fields_restored(Customer::info()));
    assert!(all_private_fields_restored(Record::info()));
}

#[test]
fn test_inherited_fields_are_mapped_from() {
    let _serial = serial();
    let record = Record {
        id:    7,
        label: "Grace".to_string(),
    };

    let customer = map_from_destination(Customer::default(), &record).unwrap();

    assert_eq!(customer.entity.id, 7);
    assert_eq!(customer.name, "Grace");
    assert!(all_private_fields_restored(Entity::info()));
}

#[test]
fn test_counterpart_field_declared_on_base() {
    let _serial = serial();
    let summary = Summary {
        title: "Letters".to_string(),
        shelf: 3,
    };

    let archive = map_to_destination(&summary, Archive::default()).unwrap();

    assert_eq!(archive.record.label, "Letters");
    assert_eq!(archive.record.id, 0);
    assert_eq!(archive.shelf, 3);
    assert!(all_private_fields_restored(Archive::info()));
}

#[test]
fn test_counterpart_field_read_from_base() {
    let _serial = serial();
    let archive = Archive {
        record: Record {
            id:    1,
            label: "Maps".to_string(),
        },
        shelf:  9,
    };

    let summary = map_from_destination(Summary::default(), &archive).unwrap();

    assert_eq!(summary.title, "Maps");
    assert_eq!(summary.shelf, 9);
}

#[test]
fn test_base_type_is_not_a_match_for_its_descendant() {
    let _serial = serial();
    let summary = Summary {
        title: "Ignored".to_string(),
        shelf: 5,
    };
    let mut record = Record::default();

    crate::map_to!(&summary, &mut record).unwrap();

    assert_eq!(record, Record::default());
}
