//! # verdict
//!
//! A composable value-validation engine producing structured, path-keyed
//! error reports.
//!
//! Callers attach ordered sets of reusable rules to primitive values, record
//! fields or container entries; the engine evaluates them recursively and
//! returns a single [`Error`] — a leaf message with a machine code, or a
//! path-keyed tree — instead of a flat string.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let err = validate(&Value::from(45), &rules![required(), min(42), max(44)]);
//! // Err: "must be no greater than 44" (ECInvThreshold)
//!
//! let planet = Record::new()
//!     .with(RecordField::new("Position", 9).tag("json", "position"))
//!     .with(RecordField::new("Name", "PlanetXYZ").tag("json", "name"))
//!     .with(RecordField::new("Life", -1.0));
//!
//! let err = validate_record(&Value::Record(planet), &[
//!     field("Position", rules![min(1), max(8)]),
//!     field("Name", rules![length(4, 7)]),
//!     field("Life", rules![min(0.0), max(1.0)]),
//! ]);
//! // Err keyed by "Life", "name" and "position".
//! ```
//!
//! ## Evaluation model
//!
//! A rule sequence runs left to right and short-circuits on the first
//! failure; an active [`skip`] marker ends the sequence successfully.
//! Aggregation happens only across record fields and container entries,
//! where each failing path contributes one entry to a [`Fields`] error.
//! Rules never mutate values, and every customization is a pure
//! copy-transform, so rule sets can be shared across threads freely.

// Error carries an inline map for the path-keyed case; boxing it would add
// indirection to every validation call for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod core;
mod macros;
pub mod prelude;
pub mod validators;

pub use crate::combinators::{
    EachRule, FieldRules, KeyRules, MapRule, SkipRule, WhenRule, each, field, key, map_rule,
    set_name_tag, skip, validate_record, when,
};
pub use crate::core::classify::{indirect, is_empty, is_nil};
pub use crate::core::error::{
    EC_EQUAL, EC_INTERNAL, EC_INV_DYNAMIC, EC_INV_IN, EC_INV_LENGTH, EC_INV_MATCH, EC_INV_THRESHOLD,
    EC_INV_TYPE, EC_INV_VALUE, EC_MAP_KEY_MISSING, EC_MAP_KEY_UNEXPECTED, EC_NOT_EQUAL,
    EC_NOT_FOUND, EC_REQ_EMPTY, EC_REQ_NIL, EC_REQ_NOT_EMPTY, EC_REQ_NOT_NIL, EC_REQUIRED,
    EC_UNK_RULE, EC_VALIDATION, Error, Fields,
};
pub use crate::core::rule::{
    DynRule, Registry, Rule, RuleFn, RuleList, Set, validate, validate_named,
};
pub use crate::core::value::{
    CustomValue, Kind, KeyKind, MapKey, Record, RecordField, Value, ValueMap,
};
