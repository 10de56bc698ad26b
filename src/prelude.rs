//! Prelude module for convenient imports.
//!
//! A single `use verdict::prelude::*;` brings in the value model, the
//! dispatcher, the combinators and every built-in rule.

// ============================================================================
// CORE: value model, errors, dispatcher
// ============================================================================

pub use crate::core::classify::{indirect, is_empty, is_nil};
pub use crate::core::error::{Error, Fields};
pub use crate::core::rule::{
    DynRule, Registry, Rule, RuleFn, RuleList, Set, validate, validate_named,
};
pub use crate::core::value::{
    CustomValue, Kind, KeyKind, MapKey, Record, RecordField, Value, ValueMap,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{
    EachRule, FieldRules, KeyRules, MapRule, SkipRule, WhenRule, each, field, key, map_rule,
    set_name_tag, skip, validate_record, when,
};

// ============================================================================
// VALIDATORS: the built-in rule catalog
// ============================================================================

#[allow(clippy::wildcard_imports, ambiguous_glob_reexports)]
pub use crate::validators::*;

// ============================================================================
// MACROS
// ============================================================================

pub use crate::rules;
