//! Crate macros: the [`rules!`](crate::rules) list builder and the internal
//! customizer-boilerplate generator shared by the leaf rules.

/// Builds a [`RuleList`](crate::RuleList) from heterogeneous rule
/// expressions.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::{rules, validate, Value};
/// use verdict::validators::{max, min, required};
///
/// let err = validate(&Value::from(45), &rules![required(), min(42), max(44)]);
/// assert!(err.is_err());
/// ```
#[macro_export]
macro_rules! rules {
    () => { $crate::RuleList::new() };
    ($($rule:expr),+ $(,)?) => {{
        let mut list = $crate::RuleList::new();
        $(list.push(::std::sync::Arc::new($rule) as $crate::DynRule);)+
        list
    }};
}

/// Generates the customization surface shared by every eager rule: a
/// `condition` gate plus the error/code slots, all as pure copy-transform
/// builders.
macro_rules! customizer {
    ($ty:ty) => {
        impl $ty {
            /// Sets a condition that determines whether validation runs.
            /// When false, the rule is a no-op and reports no errors.
            #[must_use = "builder methods must be chained or built"]
            pub fn when(mut self, condition: bool) -> Self {
                self.condition = condition;
                self
            }

            /// Wraps the rule error with a custom code.
            #[must_use = "builder methods must be chained or built"]
            pub fn code(mut self, code: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.err = self.err.with_code(code);
                self
            }

            /// Replaces the rule error outright.
            #[must_use = "builder methods must be chained or built"]
            pub fn error(mut self, err: $crate::Error) -> Self {
                self.err = err;
                self
            }
        }
    };
}

pub(crate) use customizer;
