//! Membership rules: `one_of` and `not_one_of`.

use crate::core::classify::{indirect, is_empty, is_nil};
use crate::core::error::{EC_INV_IN, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks whether a value can be found in a list of candidates.
///
/// The value being checked and the candidates must be of the same kind. An
/// empty value is considered valid; use
/// [`required`](crate::validators::required) to rule that out.
#[derive(Debug, Clone)]
pub struct OneOfRule {
    candidates: Vec<Value>,
    membership: bool,
    condition: bool,
    err: Error,
}

customizer!(OneOfRule);

impl Rule for OneOfRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 || is_empty(value) {
            return Ok(());
        }

        let value = indirect(value);
        for candidate in &self.candidates {
            if candidate.kind() != value.kind() {
                return Err(Error::invalid_type().with_code(self.err.code().to_owned()));
            }
            if candidate == value.as_ref() {
                return if self.membership {
                    Ok(())
                } else {
                    Err(self.err.clone())
                };
            }
        }
        if self.membership {
            Err(self.err.clone())
        } else {
            Ok(())
        }
    }
}

/// Creates a rule checking a value is one of the given candidates.
pub fn one_of<T: Into<Value>>(candidates: impl IntoIterator<Item = T>) -> OneOfRule {
    OneOfRule {
        candidates: candidates.into_iter().map(Into::into).collect(),
        membership: true,
        condition: true,
        err: Error::new("must be in the list", EC_INV_IN),
    }
}

/// Creates a rule checking a value is none of the given candidates.
pub fn not_one_of<T: Into<Value>>(candidates: impl IntoIterator<Item = T>) -> OneOfRule {
    OneOfRule {
        candidates: candidates.into_iter().map(Into::into).collect(),
        membership: false,
        condition: true,
        err: Error::new("must not be in the list", EC_INV_IN),
    }
}

// ============================================================================
// TESTS
// ============================================================================
