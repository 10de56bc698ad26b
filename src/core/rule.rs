//! The rule abstraction and the validation dispatcher.
//!
//! A [`Rule`] is an immutable unit of validation logic; an ordered slice of
//! rules is evaluated left to right with first-failure short-circuit by
//! [`validate`], the core recursive entry point. Aggregation across fields
//! and container elements happens in the combinators — never inside one rule
//! sequence.

use std::collections::BTreeMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::error::{Error, Fields};
use crate::core::value::Value;
use crate::validators::{fail, noop};

// ============================================================================
// RULE
// ============================================================================

/// A validation rule.
///
/// Rules are immutable descriptors: customization (condition gates, custom
/// errors, custom codes) produces new rule values instead of mutating in
/// place, so rule sets can be shared freely across validation calls and
/// threads.
pub trait Rule: Send + Sync {
    /// Validates a value, returning an error if validation fails.
    fn validate(&self, value: &Value) -> Result<(), Error>;

    /// Whether this rule is an active skip marker.
    ///
    /// When the dispatcher meets an active skip marker it ends evaluation of
    /// the remaining sequence and declares success.
    fn skips(&self) -> bool {
        false
    }
}

/// A shared, type-erased rule.
pub type DynRule = Arc<dyn Rule>;

/// A validation function usable as a rule body.
pub type RuleFn = Arc<dyn Fn(&Value) -> Result<(), Error> + Send + Sync>;

/// An ordered rule sequence; stored inline while short (the common case).
pub type RuleList = SmallVec<[DynRule; 4]>;

/// Plain functions and closures are rules.
impl<F> Rule for F
where
    F: Fn(&Value) -> Result<(), Error> + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<(), Error> {
        self(value)
    }
}

/// Groups multiple rules into one, evaluated with the full dispatcher
/// semantics.
#[derive(Clone, Default)]
pub struct Set(RuleList);

impl Set {
    /// Creates a rule set from an ordered rule list.
    pub fn new(rules: RuleList) -> Self {
        Set(rules)
    }

    /// The grouped rules, in order.
    pub fn rules(&self) -> &[DynRule] {
        &self.0
    }
}

impl Rule for Set {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        validate(value, &self.0)
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

/// Checks the given value against the provided rules.
///
/// Returns `Ok(())` if all rules pass, or the first validation error
/// encountered. Evaluation ends successfully at an active skip marker. A
/// value exposing the [`validate_with`](crate::CustomValue::validate_with)
/// capability intercepts each rule; one exposing
/// [`validate`](crate::CustomValue::validate) replaces the automatic
/// recursion entirely. Lists and maps recurse into self-validating elements;
/// a nil reference is valid.
pub fn validate(value: &Value, rules: &[DynRule]) -> Result<(), Error> {
    for rule in rules {
        if rule.skips() {
            return Ok(());
        }
        if let Value::Custom(custom) = value {
            if let Some(res) = custom.validate_with(rule.as_ref()) {
                res?;
                continue;
            }
        }
        rule.validate(value)?;
    }

    if matches!(value, Value::Ref(None)) {
        return Ok(());
    }

    if let Value::Custom(custom) = value {
        if let Some(res) = custom.validate() {
            return res;
        }
    }

    match value {
        Value::Map(map) => {
            let mut fields = Fields::new();
            for (key, element) in map.iter() {
                if let Some(Err(err)) = element_validate(element) {
                    fields.set(key.segment(), err);
                }
            }
            fields.filter()
        }
        Value::List(items) => {
            let mut fields = Fields::new();
            for (index, element) in items.iter().enumerate() {
                if let Some(Err(err)) = element_validate(element) {
                    fields.set(index.to_string(), err);
                }
            }
            fields.filter()
        }
        Value::Ref(Some(inner)) => validate(inner, &[]),
        _ => Ok(()),
    }
}

/// Validates `value` with the given rules, wrapping any error under `name`
/// in a path-keyed error.
pub fn validate_named(name: &str, value: &Value, rules: &[DynRule]) -> Result<(), Error> {
    let mut fields = Fields::new();
    if let Err(err) = validate(value, rules) {
        fields.set(name, err);
    }
    fields.filter()
}

/// Runs an element's own self-validation, looking through references.
///
/// `None` when the element does not expose the capability; nil references
/// expose nothing.
fn element_validate(element: &Value) -> Option<Result<(), Error>> {
    match element {
        Value::Custom(custom) => custom.validate(),
        Value::Ref(Some(inner)) => element_validate(inner),
        _ => None,
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// A collection of rules addressable by name, for late-bound resolution.
#[derive(Clone, Default)]
pub struct Registry(BTreeMap<String, DynRule>);

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under a name, returning `self` for chaining.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.0.insert(name.into(), Arc::new(rule));
        self
    }

    /// Returns the named rule, or `None` if it is not registered.
    pub fn get(&self, name: &str) -> Option<DynRule> {
        self.0.get(name).cloned()
    }

    /// Returns the named rule, or a rule that always succeeds.
    pub fn get_or_noop(&self, name: &str) -> DynRule {
        self.get(name).unwrap_or_else(|| Arc::new(noop()))
    }

    /// Returns the named rule, or a rule that always fails with the
    /// unknown-rule error.
    pub fn get_or_fail(&self, name: &str) -> DynRule {
        self.get(name)
            .unwrap_or_else(|| Arc::new(fail(Error::unknown_rule())))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::combinators::skip;
    use crate::core::error::{EC_INV_VALUE, EC_UNK_RULE};
    use crate::core::value::CustomValue;
    use crate::rules;

    fn fail_with(msg: &'static str) -> impl Rule {
        move |_: &Value| Err(Error::new(msg, EC_INV_VALUE))
    }

    fn pass() -> impl Rule {
        |_: &Value| Ok(())
    }

    #[test]
    fn first_failure_wins() {
        let rules = rules![pass(), fail_with("first"), fail_with("second")];
        let err = validate(&Value::from(1), &rules).unwrap_err();
        assert_eq!(err.to_string(), "first");
    }

    #[test]
    fn active_skip_ends_evaluation_successfully() {
        let rules = rules![pass(), skip(), fail_with("never reached")];
        assert!(validate(&Value::from(1), &rules).is_ok());
    }

    #[test]
    fn failure_before_skip_still_fails() {
        let rules = rules![fail_with("boom"), skip()];
        assert!(validate(&Value::from(1), &rules).is_err());
    }

    #[test]
    fn inactive_skip_is_inert() {
        let rules = rules![skip().when(false), fail_with("after")];
        assert!(validate(&Value::from(1), &rules).is_err());
    }

    #[test]
    fn nil_ref_is_valid_after_rules() {
        assert!(validate(&Value::none(), &rules![pass()]).is_ok());
    }

    #[test]
    fn ref_recurses_into_referent() {
        #[derive(Debug)]
        struct Bad;
        impl CustomValue for Bad {
            fn validate(&self) -> Option<Result<(), Error>> {
                Some(Err(Error::new("self check failed", EC_INV_VALUE)))
            }
        }

        let value = Value::some(Value::custom(Bad));
        let err = validate(&value, &[]).unwrap_err();
        assert_eq!(err.to_string(), "self check failed");
    }

    #[derive(Debug)]
    struct SelfChecked(&'static str);

    impl CustomValue for SelfChecked {
        fn validate(&self) -> Option<Result<(), Error>> {
            if self.0 == "abc" {
                Some(Ok(()))
            } else {
                Some(Err(Error::new("must be 'abc'", EC_INV_VALUE)))
            }
        }
    }

    #[test]
    fn self_validation_overrides_recursion() {
        assert!(validate(&Value::custom(SelfChecked("abc")), &[]).is_ok());
        assert!(validate(&Value::custom(SelfChecked("xyz")), &[]).is_err());
    }

    #[test]
    fn list_of_self_validating_elements_aggregates_by_index() {
        let value = Value::List(vec![
            Value::custom(SelfChecked("abc")),
            Value::custom(SelfChecked("xyz")),
        ]);

        let err = validate(&value, &[]).unwrap_err();
        let fields = err.fields().expect("fields error");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("1").unwrap().to_string(), "must be 'abc'");
    }

    #[test]
    fn map_of_self_validating_elements_aggregates_by_key() {
        let value = Value::str_map([
            ("good", Value::custom(SelfChecked("abc"))),
            ("bad", Value::custom(SelfChecked("xyz"))),
        ]);

        let err = validate(&value, &[]).unwrap_err();
        let fields = err.fields().expect("fields error");
        assert_eq!(fields.len(), 1);
        assert!(fields.get("bad").is_some());
    }

    #[test]
    fn plain_container_elements_are_left_alone() {
        let value = Value::list(["abc", "xyz"]);
        assert!(validate(&value, &[]).is_ok());
    }

    #[derive(Debug)]
    struct Intercepting;

    impl CustomValue for Intercepting {
        fn validate_with(&self, rule: &dyn Rule) -> Option<Result<(), Error>> {
            // Applies every rule to a fixed stand-in value.
            Some(rule.validate(&Value::from("stand-in")))
        }
    }

    #[test]
    fn validate_with_intercepts_each_rule() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let probe = move |v: &Value| {
            sink.lock().unwrap().push(v.to_string());
            Ok(())
        };
        let rules: Vec<DynRule> = vec![Arc::new(probe)];

        validate(&Value::custom(Intercepting), &rules).unwrap();
        assert_eq!(seen.lock().unwrap().as_slice(), ["stand-in"]);
    }

    #[test]
    fn validate_named_wraps_under_name() {
        let err = validate_named("age", &Value::from(1), &rules![fail_with("bad")]).unwrap_err();
        let fields = err.fields().expect("fields error");
        assert_eq!(fields.get("age").unwrap().to_string(), "bad");

        assert!(validate_named("age", &Value::from(1), &rules![pass()]).is_ok());
    }

    #[test]
    fn set_is_a_rule() {
        let set = Set::new(rules![pass(), fail_with("boom")]);
        assert!(set.validate(&Value::from(1)).is_err());
    }

    #[test]
    fn registry_lookup_modes() {
        let registry = Registry::new().with("present", pass());

        assert!(registry.get("present").is_some());
        assert!(registry.get("absent").is_none());

        let fallback = registry.get_or_noop("absent");
        assert!(fallback.validate(&Value::from(1)).is_ok());

        let unknown = registry.get_or_fail("absent");
        let err = unknown.validate(&Value::from(1)).unwrap_err();
        assert_eq!(err.code(), EC_UNK_RULE);
    }
}
