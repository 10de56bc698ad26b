//! Equality rules.

use std::sync::Arc;

use crate::core::error::{EC_EQUAL, EC_NOT_EQUAL, Error};
use crate::core::rule::Rule;
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value matches (or differs from) an expected value.
///
/// Comparison is structural; use [`equal_by`] to supply your own notion of
/// equality.
#[derive(Clone)]
pub struct EqualRule {
    want: Value,
    compare: Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>,
    condition: bool,
    err: Error,
}

customizer!(EqualRule);

impl EqualRule {
    /// The expected value.
    pub fn want(&self) -> &Value {
        &self.want
    }
}

impl Rule for EqualRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if !(self.compare)(&self.want, value) {
            return Err(self.err.clone());
        }
        Ok(())
    }
}

/// Creates a rule checking a value is equal to `want`.
pub fn equal(want: impl Into<Value>) -> EqualRule {
    let want = want.into();
    EqualRule {
        err: Error::new(format!("must be equal to '{want}'"), EC_NOT_EQUAL),
        want,
        compare: Arc::new(|want, have| want == have),
        condition: true,
    }
}

/// Creates a rule checking a value is not equal to `want`.
pub fn not_equal(want: impl Into<Value>) -> EqualRule {
    let want = want.into();
    EqualRule {
        err: Error::new(format!("must not be equal to '{want}'"), EC_EQUAL),
        want,
        compare: Arc::new(|want, have| want != have),
        condition: true,
    }
}

/// Like [`equal`], but the error message names the given field instead of
/// the expected value.
pub fn equal_field(want: impl Into<Value>, field: &str) -> EqualRule {
    equal(want).error(Error::new(
        format!("must be equal to '{field}'"),
        EC_NOT_EQUAL,
    ))
}

/// Like [`not_equal`], but the error message names the given field instead
/// of the expected value.
pub fn not_equal_field(want: impl Into<Value>, field: &str) -> EqualRule {
    not_equal(want).error(Error::new(
        format!("must not be equal to '{field}'"),
        EC_EQUAL,
    ))
}

/// Creates a rule checking a value is equal to `want` using the given
/// comparison function.
pub fn equal_by(
    want: impl Into<Value>,
    compare: impl Fn(&Value, &Value) -> bool + Send + Sync + 'static,
) -> EqualRule {
    let want = want.into();
    EqualRule {
        err: Error::new(format!("must be equal to '{want}'"), EC_EQUAL),
        want,
        compare: Arc::new(compare),
        condition: true,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn equal_matches_structurally() {
        assert!(equal("abc").validate(&Value::from("abc")).is_ok());
        assert!(equal("abc").validate(&Value::from("xyz")).is_err());
        assert!(equal(5).validate(&Value::from(5)).is_ok());
        assert!(equal(Value::list([1, 2])).validate(&Value::list([1, 2])).is_ok());
    }

    #[test]
    fn equal_error_shape() {
        let err = equal("abc").validate(&Value::from("xyz")).unwrap_err();
        assert_eq!(err.to_string(), "must be equal to 'abc'");
        assert_eq!(err.code(), EC_NOT_EQUAL);
    }

    #[test]
    fn not_equal_inverts() {
        assert!(not_equal("abc").validate(&Value::from("xyz")).is_ok());
        let err = not_equal("abc").validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "must not be equal to 'abc'");
        assert_eq!(err.code(), EC_EQUAL);
    }

    #[test]
    fn field_variants_name_the_field() {
        let err = equal_field("abc", "Password").validate(&Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "must be equal to 'Password'");

        let err = not_equal_field("abc", "OldPassword")
            .validate(&Value::from("abc"))
            .unwrap_err();
        assert_eq!(err.to_string(), "must not be equal to 'OldPassword'");
    }

    #[test]
    fn equal_by_uses_the_given_comparison() {
        let ci = |want: &Value, have: &Value| match (want, have) {
            (Value::Str(w), Value::Str(h)) => w.eq_ignore_ascii_case(h),
            _ => false,
        };
        assert!(equal_by("ABC", ci).validate(&Value::from("abc")).is_ok());

        let err = equal_by("ABC", ci).validate(&Value::from("xyz")).unwrap_err();
        assert_eq!(err.code(), EC_EQUAL);
    }

    #[test]
    fn kind_mismatch_is_not_equal() {
        assert!(equal("5").validate(&Value::from(5)).is_err());
    }

    #[test]
    fn condition_gate_and_customization() {
        assert!(equal("abc").when(false).validate(&Value::from("x")).is_ok());

        let err = equal("abc").code("ECustom").validate(&Value::from("x")).unwrap_err();
        assert_eq!(err.code(), "ECustom");
    }
}
