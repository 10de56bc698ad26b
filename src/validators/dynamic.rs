//! Late-bound rules resolved at execution time.

use std::borrow::Cow;
use std::sync::Arc;

use crate::core::error::{EC_INV_DYNAMIC, Error};
use crate::core::rule::{Rule, RuleFn};
use crate::core::value::Value;

/// A rule referencing a validation function by name that must be supplied
/// before execution.
///
/// Until [`rule_fn`](DynamicRule::rule_fn) is called, validation fails with
/// [`EC_INV_DYNAMIC`].
#[derive(Clone)]
pub struct DynamicRule {
    package: String,
    name: String,
    f: Option<RuleFn>,
    condition: bool,
    err: Option<Error>,
    code: Cow<'static, str>,
}

impl DynamicRule {
    /// Supplies the validation function.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule_fn(mut self, f: impl Fn(&Value) -> Result<(), Error> + Send + Sync + 'static) -> Self {
        self.f = Some(Arc::new(f));
        self
    }

    /// The rule reference, rendered `package.name`.
    pub fn reference(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

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

impl Rule for DynamicRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        let result = match &self.f {
            Some(f) => f(value),
            None => Err(Error::new("dynamic function must be set", EC_INV_DYNAMIC)),
        };
        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = self.err.clone().unwrap_or(err);
                Err(err.with_code(self.code.clone()))
            }
        }
    }
}

/// Creates a late-bound rule referencing `package.name`.
pub fn dynamic(package: impl Into<String>, name: impl Into<String>) -> DynamicRule {
    DynamicRule {
        package: package.into(),
        name: name.into(),
        f: None,
        condition: true,
        err: None,
        code: Cow::Borrowed(""),
    }
}

// ============================================================================
// TESTS
// ============================================================================
