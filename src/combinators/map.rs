//! Keyed-container validation: per-key rule bindings with required/optional
//! and allow-unknown policies.

use std::collections::BTreeSet;

use crate::core::error::{EC_MAP_KEY_MISSING, EC_MAP_KEY_UNEXPECTED, Error, Fields};
use crate::core::rule::{Rule, RuleList, validate};
use crate::core::value::{MapKey, Value};

/// A rule set associated with one map key.
#[derive(Clone)]
pub struct KeyRules {
    key: MapKey,
    optional: bool,
    rules: RuleList,
}

impl KeyRules {
    /// Marks the key as optional: a missing key is ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the key as required when the condition is true.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_when(mut self, condition: bool) -> Self {
        self.optional = !condition;
        self
    }

    /// The bound key.
    pub fn key(&self) -> &MapKey {
        &self.key
    }
}

/// Binds a map key to the rules its value must satisfy. Keys are required
/// unless marked [`optional`](KeyRules::optional).
pub fn key(key: impl Into<MapKey>, rules: RuleList) -> KeyRules {
    KeyRules {
        key: key.into(),
        optional: false,
        rules,
    }
}

/// A rule that checks the keys and values of a map.
///
/// Unless [`allow_unknown`](MapRule::allow_unknown) is set, every map key
/// not covered by a binding is reported as unexpected. A nil reference is
/// considered valid; use [`required`](crate::validators::required) to rule
/// that out.
#[derive(Clone)]
pub struct MapRule {
    keys: Vec<KeyRules>,
    allow_unknown: bool,
}

impl MapRule {
    /// Configures the rule to ignore keys no binding covers.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Whether the given key is bound.
    pub fn is_defined(&self, key: &MapKey) -> bool {
        self.keys.iter().any(|kr| kr.key == *key)
    }

    /// Whether the given key is optional. Unbound keys are optional.
    pub fn is_optional(&self, key: &MapKey) -> bool {
        self.keys
            .iter()
            .find(|kr| kr.key == *key)
            .is_none_or(|kr| kr.optional)
    }
}

impl Rule for MapRule {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        let map = match value {
            Value::Map(map) => map,
            Value::Ref(None) => return Ok(()),
            Value::Ref(Some(inner)) => match inner.as_ref() {
                Value::Map(map) => map,
                _ => return Err(Error::internal("only a map can be validated")),
            },
            _ => return Err(Error::internal("only a map can be validated")),
        };

        let mut fields = Fields::new();
        let mut extra_keys: BTreeSet<&MapKey> = if self.allow_unknown {
            BTreeSet::new()
        } else {
            map.keys().collect()
        };

        for kr in &self.keys {
            let failure = if kr.key.kind() != map.key_kind() {
                Some(Error::internal("key not the correct type"))
            } else if let Some(entry) = map.get(&kr.key) {
                validate(entry, &kr.rules).err()
            } else if kr.optional {
                None
            } else {
                Some(Error::new("required key is missing", EC_MAP_KEY_MISSING))
            };

            if let Some(err) = failure {
                if err.is_internal() {
                    return Err(Error::internal(format!("{}: {err}", kr.key.segment())));
                }
                fields.set(kr.key.segment(), err);
            }
            if !self.allow_unknown {
                extra_keys.remove(&kr.key);
            }
        }

        for key in extra_keys {
            fields.set(
                key.segment(),
                Error::new("key not expected", EC_MAP_KEY_UNEXPECTED),
            );
        }

        fields.filter()
    }
}

/// Creates a rule validating specific keys of a map.
pub fn map_rule(keys: impl IntoIterator<Item = KeyRules>) -> MapRule {
    MapRule {
        keys: keys.into_iter().collect(),
        allow_unknown: false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
