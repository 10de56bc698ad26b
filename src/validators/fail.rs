//! The error-injecting rule.

use std::borrow::Cow;

use crate::core::error::Error;
use crate::core::rule::Rule;
use crate::core::value::Value;

/// A rule that fails with a fixed error whenever its condition is true.
/// The condition is true by default.
#[derive(Debug, Clone)]
pub struct FailRule {
    condition: bool,
    err: Error,
}

impl FailRule {
    /// Sets a condition that determines whether the rule fires.
    #[must_use = "builder methods must be chained or built"]
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    /// Wraps the error with a custom code.
    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.err = self.err.with_code(code);
        self
    }
}

impl Rule for FailRule {
    fn validate(&self, _value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        Err(self.err.clone())
    }
}

/// Creates a rule which fails with the given error when its condition is
/// true.
pub fn fail(err: Error) -> FailRule {
    FailRule {
        condition: true,
        err,
    }
}

// ============================================================================
// TESTS
// ============================================================================
