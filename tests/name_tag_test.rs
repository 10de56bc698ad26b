//! The process-wide default naming-tag identifier is settable once.
//!
//! Kept in its own test binary: the setting is process-wide, so sharing a
//! process with tests relying on the built-in default would be fragile.

use verdict::prelude::*;

#[test]
fn name_tag_is_set_once_and_drives_path_resolution() {
    assert!(set_name_tag("api"));
    // The second writer loses.
    assert!(!set_name_tag("other"));

    let record = Record::new().with(
        RecordField::new("Name", "")
            .tag("api", "api_name")
            .tag("json", "json_name"),
    );

    let err = validate_record(&Value::Record(record), &[field("Name", rules![required()])])
        .unwrap_err();

    let fields = err.fields().expect("fields error");
    assert!(fields.get("api_name").is_some());
    assert!(fields.get("json_name").is_none());
}
