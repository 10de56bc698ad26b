//! Value-kind checking.

use crate::core::classify::is_nil;
use crate::core::error::{EC_INV_TYPE, Error};
use crate::core::rule::Rule;
use crate::core::value::{Kind, Value};
use crate::macros::customizer;

/// A rule that checks a value is of the expected kind. A nil value is
/// considered valid.
#[derive(Debug, Clone)]
pub struct KindRule {
    kind: Kind,
    condition: bool,
    err: Error,
}

customizer!(KindRule);

impl Rule for KindRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 {
            return Ok(());
        }
        if value.kind() != self.kind {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule checking a value is of the given kind.
pub fn of_kind(kind: Kind) -> KindRule {
    KindRule {
        kind,
        condition: true,
        err: Error::new("not expected value type", EC_INV_TYPE),
    }
}

// ============================================================================
// TESTS
// ============================================================================
