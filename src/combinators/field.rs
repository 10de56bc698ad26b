//! Record validation: binding rule sets to named fields.
//!
//! Bindings address fields by explicit descriptor — the declared field name
//! — and resolution searches embedded sub-records recursively, so a binding
//! can target a field an anonymous sub-record contributes. Error path names
//! come from naming-tags (the serialization attribute attached to a field),
//! falling back to the declared name.

use std::borrow::Cow;
use std::sync::OnceLock;

use crate::core::error::{Error, Fields};
use crate::core::rule::{RuleList, validate};
use crate::core::value::{Record, RecordField, Value};

/// The process-wide default naming-tag identifier.
static NAME_TAG: OnceLock<Cow<'static, str>> = OnceLock::new();

/// Sets the default naming-tag identifier used to resolve error field
/// names.
///
/// Settable once, before validation starts; later calls are ignored and
/// return `false`. When never set, `"json"` is used.
pub fn set_name_tag(tag: impl Into<Cow<'static, str>>) -> bool {
    NAME_TAG.set(tag.into()).is_ok()
}

/// The configured default naming-tag identifier.
fn default_name_tag() -> &'static str {
    NAME_TAG.get().map_or("json", |tag| tag.as_ref())
}

// ============================================================================
// FIELD BINDING
// ============================================================================

/// A rule set associated with a record field, addressed by declared name.
#[derive(Clone)]
pub struct FieldRules {
    name: Cow<'static, str>,
    path: Option<Cow<'static, str>>,
    tag: Option<Cow<'static, str>>,
    rules: RuleList,
}

impl FieldRules {
    /// Overrides the error path name for this binding.
    #[must_use = "builder methods must be chained or built"]
    pub fn path_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.path = Some(name.into());
        self
    }

    /// Overrides the naming-tag identifier used to resolve the error path
    /// name for this binding.
    #[must_use = "builder methods must be chained or built"]
    pub fn tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The declared field name this binding targets.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Binds a declared record field to the rules its value must satisfy.
pub fn field(name: impl Into<Cow<'static, str>>, rules: RuleList) -> FieldRules {
    FieldRules {
        name: name.into(),
        path: None,
        tag: None,
        rules,
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Validates a record by checking the bound fields against their rules.
///
/// The input must be a record or a reference to one; a nil reference is
/// considered valid. Every binding must resolve to a declared field of the
/// record (embedded sub-records are searched recursively, outer fields
/// shadowing embedded ones); an unresolvable binding is an internal error.
///
/// Results are aggregated per resolved path name. A binding on an embedded
/// sub-record whose validation yields a path-keyed error has those entries
/// merged flat into the parent result. Any internal error aborts resolution
/// immediately with the field's path name prefixed.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::{field, rules, validate_record, Record, RecordField, Value};
/// use verdict::validators::{length, min, max};
///
/// let planet = Record::new()
///     .with(RecordField::new("Position", 9).tag("json", "position"))
///     .with(RecordField::new("Name", "PlanetXYZ").tag("json", "name"))
///     .with(RecordField::new("Life", -1.0));
///
/// let err = validate_record(&Value::Record(planet), &[
///     field("Position", rules![min(1), max(8)]),
///     field("Name", rules![length(4, 7)]),
///     field("Life", rules![min(0.0), max(1.0)]),
/// ]);
/// // err is keyed by "position", "name" and "Life".
/// ```
pub fn validate_record(value: &Value, bindings: &[FieldRules]) -> Result<(), Error> {
    if matches!(value, Value::Ref(None)) {
        return Ok(());
    }
    let Some(record) = as_record(value) else {
        return Err(Error::internal("only a record can be validated"));
    };

    let mut fields = Fields::new();
    for binding in bindings {
        let Some(slot) = find_field(record, &binding.name) else {
            return Err(Error::internal(format!(
                "the field \"{}\" cannot be found in the record",
                binding.name,
            )));
        };

        if let Err(err) = validate(slot.value(), &binding.rules) {
            if err.is_internal() {
                let name = error_field_name(binding, slot);
                return Err(Error::internal(format!("{name}: {err}")));
            }
            match (slot.is_embedded(), err) {
                // Errors of an anonymous sub-record merge flat into the
                // parent, not nested under the sub-record's own segment.
                (true, Error::Fields(nested)) => fields.merge(nested),
                (_, err) => fields.set(error_field_name(binding, slot), err),
            }
        }
    }
    fields.filter()
}

/// Looks through references to the record itself.
fn as_record(value: &Value) -> Option<&Record> {
    match value {
        Value::Record(record) => Some(record),
        Value::Ref(Some(inner)) => as_record(inner),
        _ => None,
    }
}

/// Looks for a declared field, diving into anonymous sub-records.
///
/// Own fields win over fields an embedded sub-record contributes; embedded
/// sub-records are searched depth-first in declaration order.
fn find_field<'a>(record: &'a Record, name: &str) -> Option<&'a RecordField> {
    if let Some(found) = record.field(name) {
        return Some(found);
    }
    for slot in record.fields().filter(|slot| slot.is_embedded()) {
        if let Some(sub) = as_record(slot.value()) {
            if let Some(found) = find_field(sub, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Resolves the name representing a field in the error output.
fn error_field_name(binding: &FieldRules, slot: &RecordField) -> String {
    if let Some(path) = &binding.path {
        return path.to_string();
    }
    let tag_key = binding.tag.as_deref().unwrap_or_else(|| default_name_tag());
    if let Some(tag) = slot.tag_value(tag_key) {
        let head = tag.split(',').next().unwrap_or("");
        if !head.is_empty() && head != "-" {
            return head.to_owned();
        }
    }
    slot.name().to_owned()
}

// ============================================================================
// TESTS
// ============================================================================
