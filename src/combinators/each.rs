//! The container iterator.

use crate::core::classify::indirect;
use crate::core::error::{EC_INV_TYPE, Error, Fields};
use crate::core::rule::{Rule, RuleList, validate};
use crate::core::value::Value;

/// A rule that loops through an iterable (map or list) and validates each
/// element with the provided rules.
///
/// Elements are dereferenced before the rules run, a nil element becoming
/// the absence-of-value case. Errors are aggregated per key (maps) or per
/// index (lists). An empty iterable is valid; use
/// [`required`](crate::validators::required) to rule that out. Anything that
/// is not iterable is a type error.
#[derive(Clone)]
pub struct EachRule {
    rules: RuleList,
}

impl Rule for EachRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        let mut fields = Fields::new();
        match value {
            Value::Map(map) => {
                for (key, element) in map.iter() {
                    if let Err(err) = validate(indirect(element).as_ref(), &self.rules) {
                        fields.set(key.segment(), err);
                    }
                }
            }
            Value::List(items) => {
                for (index, element) in items.iter().enumerate() {
                    if let Err(err) = validate(indirect(element).as_ref(), &self.rules) {
                        fields.set(index.to_string(), err);
                    }
                }
            }
            _ => return Err(Error::new("must be an iterable", EC_INV_TYPE)),
        }
        fields.filter()
    }
}

/// Creates a rule that validates every element of an iterable.
pub fn each(rules: RuleList) -> EachRule {
    EachRule { rules }
}

// ============================================================================
// TESTS
// ============================================================================
