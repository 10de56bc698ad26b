//! Regular-expression matching.

use regex::Regex;

use crate::core::classify::{indirect, is_empty, is_nil};
use crate::core::error::{EC_INV_MATCH, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value matches a regular expression.
///
/// Only strings and byte strings match; an empty value is considered valid.
/// The expression is compiled by the caller, so a malformed pattern fails at
/// construction, never at validation time.
#[derive(Debug, Clone)]
pub struct PatternRule {
    rx: Regex,
    condition: bool,
    err: Error,
}

customizer!(PatternRule);

impl Rule for PatternRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 || is_empty(value) {
            return Ok(());
        }

        let value = indirect(value);
        let matched = match value.as_ref() {
            Value::Str(s) => s.is_empty() || self.rx.is_match(s),
            Value::Bytes(bytes) => {
                bytes.is_empty() || self.rx.is_match(&String::from_utf8_lossy(bytes))
            }
            _ => false,
        };
        if matched {
            Ok(())
        } else {
            Err(self.err.clone())
        }
    }
}

/// Creates a rule checking a value matches the given regular expression.
pub fn pattern(rx: Regex) -> PatternRule {
    PatternRule {
        rx,
        condition: true,
        err: Error::new("must be in a valid format", EC_INV_MATCH),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn digits() -> Regex {
        Regex::new(r"^[0-9]+$").unwrap()
    }

    #[test]
    fn matching_strings_are_valid() {
        assert!(pattern(digits()).validate(&Value::from("123")).is_ok());
    }

    #[test]
    fn non_matching_strings_fail() {
        let err = pattern(digits()).validate(&Value::from("12x")).unwrap_err();
        assert_eq!(err.to_string(), "must be in a valid format");
        assert_eq!(err.code(), EC_INV_MATCH);
    }

    #[test]
    fn bytes_are_matched_as_text() {
        assert!(pattern(digits()).validate(&Value::bytes(b"123".to_vec())).is_ok());
        assert!(pattern(digits()).validate(&Value::bytes(b"12x".to_vec())).is_err());
    }

    #[test]
    fn empty_and_nil_values_are_valid() {
        assert!(pattern(digits()).validate(&Value::from("")).is_ok());
        assert!(pattern(digits()).validate(&Value::none()).is_ok());
        assert!(pattern(digits()).validate(&Value::Nothing).is_ok());
    }

    #[test]
    fn references_are_dereferenced() {
        assert!(pattern(digits()).validate(&Value::some("123")).is_ok());
        assert!(pattern(digits()).validate(&Value::some("12x")).is_err());
    }

    #[test]
    fn non_text_values_fail() {
        assert!(pattern(digits()).validate(&Value::list([1, 2])).is_err());
    }

    #[test]
    fn condition_gate() {
        assert!(pattern(digits()).when(false).validate(&Value::from("12x")).is_ok());
    }
}
