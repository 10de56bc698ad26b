//! Presence rules: `required`, `not_empty` and `not_nil`.

use crate::core::classify::{is_empty, is_nil};
use crate::core::error::{EC_REQ_NOT_EMPTY, EC_REQ_NOT_NIL, EC_REQUIRED, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value is present.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    condition: bool,
    skip_nil: bool,
    err: Error,
}

customizer!(RequiredRule);

impl Rule for RequiredRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        let (nil, _) = is_nil(value);
        if self.skip_nil && nil {
            return Ok(());
        }
        if is_empty(value) {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule that checks a value is not empty.
///
/// A value is considered not empty if:
///
/// - integer, float: not zero
/// - bool: true
/// - string, bytes, list, map: non-zero length
/// - reference: not nil, and the referenced value is not empty
pub fn required() -> RequiredRule {
    RequiredRule {
        condition: true,
        skip_nil: false,
        err: Error::new("cannot be blank", EC_REQUIRED),
    }
}

/// Creates a rule that checks a value is a nil reference or not empty.
///
/// Differs from [`required`] in that a nil reference is considered valid.
pub fn not_empty() -> RequiredRule {
    RequiredRule {
        condition: true,
        skip_nil: true,
        err: Error::new("cannot be blank", EC_REQ_NOT_EMPTY),
    }
}

/// A rule that checks a value is not nil.
///
/// Only nil-ness is checked: empty-but-present values are valid.
#[derive(Debug, Clone)]
pub struct NotNilRule {
    condition: bool,
    err: Error,
}

customizer!(NotNilRule);

impl Rule for NotNilRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule that checks a value is not nil.
pub fn not_nil() -> NotNilRule {
    NotNilRule {
        condition: true,
        err: Error::new("is required", EC_REQ_NOT_NIL),
    }
}

// ============================================================================
// TESTS
// ============================================================================
