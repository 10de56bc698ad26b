//! Caller-supplied rules: `by`, `check_str` and `noop`.

use std::borrow::Cow;
use std::sync::Arc;

use crate::core::classify::{ensure_str, indirect, is_empty, is_nil};
use crate::core::error::{EC_NOT_EQUAL, Error};
use crate::core::rule::{Rule, RuleFn};
use crate::core::value::Value;
use crate::macros::customizer;

/// A rule that checks a value with a caller-supplied function.
#[derive(Clone)]
pub struct ByRule {
    f: RuleFn,
    condition: bool,
    err: Option<Error>,
    code: Cow<'static, str>,
}

impl ByRule {
    /// Sets a condition that determines whether validation runs.
    /// When false, the rule is a no-op and reports no errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    /// Wraps the rule error with a custom code.
    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Replaces the function's error outright.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, err: Error) -> Self {
        self.err = Some(err);
        self
    }
}

impl Rule for ByRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        match (self.f)(value) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = self.err.clone().unwrap_or(err);
                Err(err.with_code(self.code.clone()))
            }
        }
    }
}

/// Wraps a validation function as a rule.
pub fn by(f: impl Fn(&Value) -> Result<(), Error> + Send + Sync + 'static) -> ByRule {
    ByRule {
        f: Arc::new(f),
        condition: true,
        err: None,
        code: Cow::Borrowed(""),
    }
}

/// A rule that always passes.
pub fn noop() -> ByRule {
    by(|_| Ok(()))
}

/// A rule that checks a string value with a caller-supplied predicate.
///
/// An empty value is considered valid; use
/// [`required`](crate::validators::required) to rule that out.
#[derive(Clone)]
pub struct StrRule {
    f: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    condition: bool,
    err: Error,
}

customizer!(StrRule);

impl Rule for StrRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        if is_nil(value).0 || is_empty(value) {
            return Ok(());
        }

        let value = indirect(value);
        let s = ensure_str(value.as_ref())?;
        if (self.f)(&s) {
            Ok(())
        } else {
            Err(self.err.clone())
        }
    }
}

/// Creates a rule checking a string value with the given predicate.
pub fn check_str(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> StrRule {
    StrRule {
        f: Arc::new(f),
        condition: true,
        err: Error::new("not equal", EC_NOT_EQUAL),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::error::{EC_INV_TYPE, EC_INV_VALUE};

    fn odd() -> ByRule {
        by(|v: &Value| match v {
            Value::Int(i) if i % 2 != 0 => Ok(()),
            _ => Err(Error::new("must be odd", EC_INV_VALUE)),
        })
    }

    #[test]
    fn by_runs_the_function() {
        assert!(odd().validate(&Value::from(3)).is_ok());

        let err = odd().validate(&Value::from(4)).unwrap_err();
        assert_eq!(err.to_string(), "must be odd");
        assert_eq!(err.code(), EC_INV_VALUE);
    }

    #[test]
    fn by_custom_error_replaces_and_code_wraps() {
        let custom = Error::new("tst msg", "ETstCode");
        let err = odd().error(custom.clone()).validate(&Value::from(4)).unwrap_err();
        assert_eq!(err, custom);

        // The custom code still applies after a replacement error.
        let err = odd()
            .error(custom)
            .code("ECustom")
            .validate(&Value::from(4))
            .unwrap_err();
        assert_eq!(err.code(), "ECustom");
        assert_eq!(err.to_string(), "tst msg");
    }

    #[test]
    fn by_condition_gate() {
        assert!(odd().when(false).validate(&Value::from(4)).is_ok());
    }

    #[test]
    fn noop_always_passes() {
        assert!(noop().validate(&Value::from(4)).is_ok());
        assert!(noop().validate(&Value::Nothing).is_ok());
    }

    #[test]
    fn check_str_runs_the_predicate() {
        let rule = check_str(|s| s == "abc");
        assert!(rule.validate(&Value::from("abc")).is_ok());

        let err = rule.validate(&Value::from("xyz")).unwrap_err();
        assert_eq!(err.to_string(), "not equal");
        assert_eq!(err.code(), EC_NOT_EQUAL);
    }

    #[test]
    fn check_str_skips_empty_and_nil() {
        let rule = check_str(|_| false);
        assert!(rule.validate(&Value::from("")).is_ok());
        assert!(rule.validate(&Value::none()).is_ok());
    }

    #[test]
    fn check_str_rejects_non_strings() {
        let err = check_str(|_| true).validate(&Value::from(5)).unwrap_err();
        assert_eq!(err.code(), EC_INV_TYPE);
    }
}
