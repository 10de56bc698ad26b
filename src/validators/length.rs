//! Length rules for strings, byte strings, lists and maps.

use crate::core::classify::{indirect, is_empty, is_nil, length_of};
use crate::core::error::{EC_INV_LENGTH, EC_REQ_EMPTY, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value's length is within the specified range.
///
/// A bound of 0 means that side is unbounded; `length(0, 0)` demands an
/// empty value. An empty value is considered valid; use
/// [`required`](crate::validators::required) to rule that out.
#[derive(Debug, Clone)]
pub struct LengthRule {
    min: usize,
    max: usize,
    chars: bool,
    condition: bool,
    err: Error,
}

customizer!(LengthRule);

impl Rule for LengthRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 || is_empty(value) {
            return Ok(());
        }

        let value = indirect(value);
        let len = match (self.chars, value.as_ref()) {
            (true, Value::Str(s)) => s.chars().count(),
            _ => length_of(value.as_ref())?,
        };

        let too_short = self.min > 0 && len < self.min;
        let too_long = self.max > 0 && len > self.max;
        let must_be_empty = self.min == 0 && self.max == 0 && len > 0;
        if too_short || too_long || must_be_empty {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule checking a value's length is within `[min, max]`.
///
/// String length is counted in bytes; see [`char_length`] for character
/// counting.
pub fn length(min: usize, max: usize) -> LengthRule {
    LengthRule {
        min,
        max,
        chars: false,
        condition: true,
        err: length_error(min, max),
    }
}

/// Creates a rule checking a string's character count is within
/// `[min, max]`. Non-string values fall back to plain length.
pub fn char_length(min: usize, max: usize) -> LengthRule {
    LengthRule {
        chars: true,
        ..length(min, max)
    }
}

/// Builds the error matching the configured bounds.
fn length_error(min: usize, max: usize) -> Error {
    let message = match (min, max) {
        (0, 0) => return Error::new("the value must be empty", EC_REQ_EMPTY),
        (0, _) => format!("the length must be no more than {max}"),
        (_, 0) => format!("the length must be no less than {min}"),
        _ if min == max => format!("the length must be exactly {min}"),
        _ => format!("the length must be between {min} and {max}"),
    };
    Error::new(message, EC_INV_LENGTH)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::in_range("abcd", true)]
    #[case::at_min("ab", true)]
    #[case::at_max("abcdef", true)]
    #[case::too_short("a", false)]
    #[case::too_long("abcdefg", false)]
    #[case::empty_valid("", true)]
    fn length_cases(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(length(2, 6).validate(&Value::from(value)).is_ok(), valid);
    }

    #[test]
    fn messages_match_the_bounds() {
        let err = length(4, 7).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "the length must be between 4 and 7");
        assert_eq!(err.code(), EC_INV_LENGTH);

        let err = length(0, 2).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "the length must be no more than 2");

        let err = length(4, 0).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "the length must be no less than 4");

        let err = length(2, 2).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "the length must be exactly 2");

        let err = length(0, 0).validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "the value must be empty");
        assert_eq!(err.code(), EC_REQ_EMPTY);
    }

    #[test]
    fn byte_vs_char_counting() {
        // Four characters, eleven bytes.
        let value = Value::from("日本語х");
        assert!(length(1, 4).validate(&value).is_err());
        assert!(char_length(1, 4).validate(&value).is_ok());
    }

    #[test]
    fn containers_use_element_count() {
        assert!(length(1, 2).validate(&Value::list([1, 2])).is_ok());
        assert!(length(1, 2).validate(&Value::list([1, 2, 3])).is_err());
        assert!(length(1, 2).validate(&Value::str_map([("a", 1)])).is_ok());
    }

    #[test]
    fn references_are_dereferenced() {
        assert!(length(1, 3).validate(&Value::some("ab")).is_ok());
        assert!(length(1, 2).validate(&Value::some("abc")).is_err());
        assert!(length(1, 2).validate(&Value::none()).is_ok());
    }

    #[test]
    fn unsupported_kinds_are_type_errors() {
        let err = length(1, 2).validate(&Value::from(123)).unwrap_err();
        assert_eq!(err.to_string(), "cannot get the length of int");
    }

    #[test]
    fn condition_gate_and_customization() {
        assert!(length(4, 7).when(false).validate(&Value::from("abc")).is_ok());

        let err = length(4, 7)
            .code("ECustom")
            .validate(&Value::from("abc"))
            .unwrap_err();
        assert_eq!(err.code(), "ECustom");
    }
}
