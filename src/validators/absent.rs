//! Absence rules: `nil_value` and `empty`.

use crate::core::classify::{is_empty, is_nil};
use crate::core::error::{EC_REQ_EMPTY, EC_REQ_NIL, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value is absent.
#[derive(Debug, Clone)]
pub struct AbsentRule {
    condition: bool,
    skip_nil: bool,
    err: Error,
}

customizer!(AbsentRule);

impl Rule for AbsentRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        let (nil, _) = is_nil(value);
        if !nil && (!self.skip_nil || !is_empty(value)) {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule that checks a value is nil.
pub fn nil_value() -> AbsentRule {
    AbsentRule {
        condition: true,
        skip_nil: false,
        err: Error::new("must be blank", EC_REQ_NIL),
    }
}

/// Creates a rule that checks a non-nil value is empty.
pub fn empty() -> AbsentRule {
    AbsentRule {
        condition: true,
        skip_nil: true,
        err: Error::new("must be blank", EC_REQ_EMPTY),
    }
}

// ============================================================================
// TESTS
// ============================================================================
