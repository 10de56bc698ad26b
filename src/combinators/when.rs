//! Conditional rule branches.

use std::borrow::Cow;

use crate::core::error::Error;
use crate::core::rule::{Rule, RuleList, validate};
use crate::core::value::Value;

/// A rule that applies one branch of rules when the condition is true and
/// the [`otherwise`](WhenRule::otherwise) branch when it is false.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::{rules, Value};
/// use verdict::combinators::when;
/// use verdict::validators::one_of;
///
/// let rule = when(is_admin, rules![one_of(["rw"])]).otherwise(rules![one_of(["ro"])]);
/// ```
#[derive(Clone)]
pub struct WhenRule {
    condition: bool,
    rules: RuleList,
    else_rules: RuleList,
    err: Option<Error>,
    code: Cow<'static, str>,
}

impl WhenRule {
    /// Sets the rules evaluated when the condition is false.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise(mut self, rules: RuleList) -> Self {
        self.else_rules = rules;
        self
    }

    /// Wraps whichever error the evaluated branch produces with a custom
    /// code.
    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Replaces whichever error the evaluated branch produces.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, err: Error) -> Self {
        self.err = Some(err);
        self
    }
}

impl Rule for WhenRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        let branch = if self.condition {
            &self.rules
        } else {
            &self.else_rules
        };
        match validate(value, branch) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = self.err.clone().unwrap_or(err);
                Err(err.with_code(self.code.clone()))
            }
        }
    }
}

/// Creates a rule that evaluates the given rules when the condition is true.
pub fn when(condition: bool, rules: RuleList) -> WhenRule {
    WhenRule {
        condition,
        rules,
        else_rules: RuleList::new(),
        err: None,
        code: Cow::Borrowed(""),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::error::{EC_INV_IN, EC_NOT_EQUAL};
    use crate::rules;
    use crate::validators::{equal, one_of};

    #[test]
    fn true_condition_runs_main_branch() {
        let rule = when(true, rules![equal("abc")]);
        assert!(rule.validate(&Value::from("abc")).is_ok());
        assert!(rule.validate(&Value::from("xyz")).is_err());
    }

    #[test]
    fn false_condition_runs_otherwise_branch() {
        let rule = when(false, rules![equal("abc")]).otherwise(rules![equal("xyz")]);
        assert!(rule.validate(&Value::from("xyz")).is_ok());
        assert!(rule.validate(&Value::from("abc")).is_err());
    }

    #[test]
    fn false_condition_without_otherwise_is_valid() {
        let rule = when(false, rules![equal("abc")]);
        assert!(rule.validate(&Value::from("anything")).is_ok());
    }

    #[test]
    fn custom_error_replaces_branch_error() {
        let custom = Error::new("tst msg", "ETstCode");
        let rule = when(true, rules![one_of(["abc"])])
            .otherwise(rules![one_of(["xyz"])])
            .error(custom.clone());

        // The "when" branch ran, one rule failed, the custom error is
        // substituted untouched.
        assert_eq!(rule.validate(&Value::from("xyz")).unwrap_err(), custom);
    }

    #[test]
    fn custom_code_wraps_branch_error() {
        let rule = when(true, rules![equal("abc")]).code(EC_INV_IN);
        let err = rule.validate(&Value::from("xyz")).unwrap_err();
        assert_eq!(err.code(), EC_INV_IN);
    }

    #[test]
    fn no_customization_passes_branch_error_through() {
        let rule = when(true, rules![equal("abc")]);
        let err = rule.validate(&Value::from("xyz")).unwrap_err();
        assert_eq!(err.code(), EC_NOT_EQUAL);
    }
}
