//! Threshold rules: `min` and `max`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::classify::{is_empty, is_nil, to_float, to_int, to_uint};
use crate::core::error::{EC_INV_THRESHOLD, EC_INV_TYPE, Error};
use crate::core::rule::Rule;
use crate::core::value::{Kind, Value};

/// A function comparing the threshold against the validated value.
///
/// Returns the ordering of the threshold relative to the value, or an error
/// for unsupported types.
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Result<Ordering, Error> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

/// A rule validating that a value satisfies a threshold.
///
/// The value being checked and the threshold must be of the same kind;
/// signed integers, unsigned integers and floats are supported out of the
/// box, anything else needs [`with_cmp`](ThresholdRule::with_cmp). Empty
/// values are considered valid; use [`required`](crate::validators::required)
/// to rule that out.
#[derive(Clone)]
pub struct ThresholdRule {
    threshold: Value,
    operator: Operator,
    cmp: Option<CompareFn>,
    condition: bool,
    err: Option<Error>,
    code: Cow<'static, str>,
}

impl ThresholdRule {
    /// Excludes the boundary value, enforcing a strict comparison.
    ///
    /// With [`min`] the value must be strictly greater than the threshold,
    /// with [`max`] strictly less.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive(mut self) -> Self {
        self.operator = match self.operator {
            Operator::GreaterEqual => Operator::Greater,
            Operator::LessEqual => Operator::Less,
            other => other,
        };
        self
    }

    /// Sets a custom comparison function, overriding the kind-based default.
    ///
    /// The function's own errors are passed through untouched; the
    /// customization set by [`code`](ThresholdRule::code) and
    /// [`error`](ThresholdRule::error) applies only to the threshold
    /// outcome.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cmp(
        mut self,
        cmp: impl Fn(&Value, &Value) -> Result<Ordering, Error> + Send + Sync + 'static,
    ) -> Self {
        self.cmp = Some(Arc::new(cmp));
        self
    }

    /// Sets a condition that determines whether validation runs.
    /// When false, the rule is a no-op and reports no errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    /// Sets the error code for the rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        let code = code.into();
        self.err = self.err.take().map(|err| err.with_code(code.clone()));
        self.code = code;
        self
    }

    /// Replaces the rule error outright.
    #[must_use = "builder methods must be chained or built"]
    pub fn error(mut self, err: Error) -> Self {
        self.err = Some(err);
        self
    }

    fn outcome(&self, ord: Ordering) -> bool {
        match self.operator {
            Operator::Greater => ord == Ordering::Less,
            Operator::GreaterEqual => ord != Ordering::Greater,
            Operator::Less => ord == Ordering::Greater,
            Operator::LessEqual => ord != Ordering::Less,
        }
    }

    fn threshold_error(&self) -> Error {
        let message = match self.operator {
            Operator::Greater => format!("must be greater than {}", self.threshold),
            Operator::GreaterEqual => format!("must be no less than {}", self.threshold),
            Operator::Less => format!("must be less than {}", self.threshold),
            Operator::LessEqual => format!("must be no greater than {}", self.threshold),
        };
        Error::new(message, self.code.clone())
    }
}

impl Rule for ThresholdRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !self.condition {
            return Ok(());
        }
        let Some(cmp) = &self.cmp else {
            return Err(Error::new(
                format!("type is not supported: {}", self.threshold.kind()),
                EC_INV_TYPE,
            ));
        };
        if is_nil(value).0 || is_empty(value) {
            return Ok(());
        }

        let ord = cmp(&self.threshold, value)?;
        if !self.outcome(ord) {
            if let Some(err) = &self.err {
                return Err(err.clone());
            }
            return Err(self.threshold_error());
        }
        Ok(())
    }
}

/// Creates a rule checking a value is greater than or equal to the
/// threshold. Use [`exclusive`](ThresholdRule::exclusive) for a strict
/// greater-than check.
pub fn min(threshold: impl Into<Value>) -> ThresholdRule {
    let threshold = threshold.into();
    ThresholdRule {
        cmp: compare_for(threshold.kind()),
        threshold,
        operator: Operator::GreaterEqual,
        condition: true,
        err: None,
        code: Cow::Borrowed(EC_INV_THRESHOLD),
    }
}

/// Creates a rule checking a value is less than or equal to the threshold.
/// Use [`exclusive`](ThresholdRule::exclusive) for a strict less-than check.
pub fn max(threshold: impl Into<Value>) -> ThresholdRule {
    let threshold = threshold.into();
    ThresholdRule {
        cmp: compare_for(threshold.kind()),
        threshold,
        operator: Operator::LessEqual,
        condition: true,
        err: None,
        code: Cow::Borrowed(EC_INV_THRESHOLD),
    }
}

/// Picks the comparison function for the threshold kind; `None` when the
/// kind is unsupported.
fn compare_for(kind: Kind) -> Option<CompareFn> {
    match kind {
        Kind::Int => Some(Arc::new(|want: &Value, have: &Value| {
            Ok(to_int(want)?.cmp(&to_int(have)?))
        })),
        Kind::Uint => Some(Arc::new(|want: &Value, have: &Value| {
            Ok(to_uint(want)?.cmp(&to_uint(have)?))
        })),
        Kind::Float => Some(Arc::new(|want: &Value, have: &Value| {
            Ok(to_float(want)?.total_cmp(&to_float(have)?))
        })),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
