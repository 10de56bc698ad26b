//! End-to-end record validation scenarios.

use pretty_assertions::assert_eq;
use verdict::prelude::*;

fn planet() -> Record {
    Record::new()
        .with(RecordField::new("Position", 9).tag("json", "position"))
        .with(
            RecordField::new("Name", "PlanetXYZ")
                .tag("json", "name")
                .tag("solar", "planet_name"),
        )
        .with(RecordField::new("Life", -1.0))
}

#[test]
fn record_errors_use_naming_tags_for_path_keys() {
    let err = validate_record(
        &Value::Record(planet()),
        &[
            field("Position", rules![min(1), max(8)]),
            field("Name", rules![length(4, 7)]),
            field("Life", rules![min(0.0), max(1.0)]),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Life: must be no less than 0; \
         name: the length must be between 4 and 7; \
         position: must be no greater than 8",
    );
    assert_eq!(
        err.to_json(),
        serde_json::json!({
            "Life": {"code": "ECInvThreshold", "error": "must be no less than 0"},
            "name": {"code": "ECInvLength", "error": "the length must be between 4 and 7"},
            "position": {"code": "ECInvThreshold", "error": "must be no greater than 8"},
        }),
    );
}

#[test]
fn binding_tag_override_selects_another_naming_tag() {
    let record = Record::new()
        .with(RecordField::new("Position", 1).tag("json", "position"))
        .with(
            RecordField::new("Name", "Mer")
                .tag("json", "name")
                .tag("solar", "planet_name"),
        )
        .with(RecordField::new("Life", 0.0));

    let err = validate_record(
        &Value::Record(record),
        &[field("Name", rules![length(4, 7)]).tag("solar")],
    )
    .unwrap_err();

    assert_eq!(
        err.to_json(),
        serde_json::json!({
            "planet_name": {
                "code": "ECInvLength",
                "error": "the length must be between 4 and 7",
            },
        }),
    );
}

#[test]
fn valid_record_produces_no_error() {
    let record = Record::new()
        .with(RecordField::new("Position", 3).tag("json", "position"))
        .with(RecordField::new("Name", "Earth").tag("json", "name"))
        .with(RecordField::new("Life", 1.0));

    assert!(
        validate_record(
            &Value::Record(record),
            &[
                field("Position", rules![min(1), max(8)]),
                field("Name", rules![length(4, 7)]),
                field("Life", rules![min(0.0), max(1.0)]),
            ],
        )
        .is_ok()
    );
}

#[test]
fn unresolvable_binding_is_field_not_found() {
    let err = validate_record(
        &Value::Record(planet()),
        &[field("Orbit", rules![required()])],
    )
    .unwrap_err();

    assert_eq!(err.code(), "ECInternal");
    assert_eq!(
        err.to_string(),
        "the field \"Orbit\" cannot be found in the record",
    );
}

#[test]
fn nil_record_ref_is_a_valid_no_op() {
    assert!(validate_record(&Value::none(), &[field("Orbit", rules![required()])]).is_ok());
}

#[test]
fn embedded_record_errors_merge_flat_into_the_parent() {
    let address = Record::new()
        .with(RecordField::new("City", "").tag("json", "city"))
        .with(RecordField::new("Zip", "1").tag("json", "zip"));
    let person = Record::new()
        .with(RecordField::new("Name", "Ann").tag("json", "name"))
        .with(RecordField::new("Address", address).embedded());

    let check_address = |value: &Value| {
        validate_record(
            value,
            &[
                field("City", rules![required()]),
                field("Zip", rules![length(5, 5)]),
            ],
        )
    };

    let err = validate_record(
        &Value::Record(person),
        &[
            field("Name", rules![length(4, 10)]),
            field("Address", rules![check_address]),
        ],
    )
    .unwrap_err();

    // Address entries surface beside "name", not nested under "Address".
    assert_eq!(
        err.to_json(),
        serde_json::json!({
            "city": {"code": "ECRequired", "error": "cannot be blank"},
            "zip": {"code": "ECInvLength", "error": "the length must be exactly 5"},
            "name": {"code": "ECInvLength", "error": "the length must be between 4 and 10"},
        }),
    );
}

#[test]
fn fields_of_embedded_records_are_addressable_directly() {
    let inner = Record::new().with(RecordField::new("FStr", "emb.FStr"));
    let outer = Record::new().with(RecordField::new("TwoStr", inner).embedded());

    let err = validate_record(
        &Value::Record(outer),
        &[field("FStr", rules![equal("other")])],
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "FStr: must be equal to 'other'");
}

#[test]
fn internal_errors_replace_sibling_results() {
    let err = validate_record(
        &Value::Record(planet()),
        &[
            field("Position", rules![max(8)]),
            field("Life", rules![fail(Error::internal("internal error"))]),
        ],
    )
    .unwrap_err();

    assert_eq!(err.code(), "ECInternal");
    assert_eq!(err.to_string(), "Life: internal error");
    assert!(err.fields().is_none());
}
