//! Containment rule: an iterable must hold at least one matching element.

use crate::core::classify::indirect;
use crate::core::error::{EC_INV_TYPE, EC_NOT_EQUAL, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::validators::equal::EqualRule;

/// A rule that loops through an iterable (map or list) and validates that
/// at least one element satisfies the given equality rule.
#[derive(Clone)]
pub struct ContainRule {
    rule: EqualRule,
}

impl Rule for ContainRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        let mut success = false;
        match value {
            Value::Map(map) => {
                for (_, element) in map.iter() {
                    if self.rule.validate(indirect(element).as_ref()).is_ok() {
                        success = true;
                    }
                }
            }
            Value::List(items) => {
                for element in items {
                    if self.rule.validate(indirect(element).as_ref()).is_ok() {
                        success = true;
                    }
                }
            }
            _ => return Err(Error::new("must be an iterable", EC_INV_TYPE)),
        }

        if success {
            return Ok(());
        }
        Err(Error::new(
            format!("must contain at least one '{}' value", self.rule.want()),
            EC_NOT_EQUAL,
        ))
    }
}

/// Creates a rule checking an iterable contains at least one element
/// matching the given equality rule.
pub fn contain(rule: EqualRule) -> ContainRule {
    ContainRule { rule }
}

// ============================================================================
// TESTS
// ============================================================================
