//! The runtime value model.
//!
//! Everything submitted for validation is first expressed as a [`Value`]: a
//! closed set of shapes (scalars, lists, keyed maps, records with named
//! fields, references, opaque custom values). Rules and the dispatcher never
//! inspect caller types directly — they switch exhaustively over
//! [`Value::kind`], which keeps all shape logic in one place.
//!
//! Values are classified, never mutated.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::Error;
use crate::core::rule::Rule;

// ============================================================================
// KIND
// ============================================================================

/// The shape of a [`Value`], produced by the single classify step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// True nil: no type, no value.
    Nothing,
    /// Boolean scalar.
    Bool,
    /// Signed integer scalar.
    Int,
    /// Unsigned integer scalar.
    Uint,
    /// Floating point scalar.
    Float,
    /// UTF-8 string.
    Str,
    /// Raw byte string.
    Bytes,
    /// Indexed container.
    List,
    /// Keyed container.
    Map,
    /// Named-field structure.
    Record,
    /// Reference; may hold nothing (wrapped nil).
    Ref,
    /// Opaque caller value with optional capabilities.
    Custom,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Nothing => "nothing",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::Bytes => "bytes",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Ref => "ref",
            Kind::Custom => "custom",
        };
        f.write_str(name)
    }
}

// ============================================================================
// MAP KEYS
// ============================================================================

/// Key kinds a [`ValueMap`] may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Signed integer keys.
    Int,
    /// Unsigned integer keys.
    Uint,
    /// String keys.
    Str,
}

/// A concrete map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// Signed integer key.
    Int(i64),
    /// Unsigned integer key.
    Uint(u64),
    /// String key.
    Str(String),
}

impl MapKey {
    /// The key kind of this key.
    pub fn kind(&self) -> KeyKind {
        match self {
            MapKey::Int(_) => KeyKind::Int,
            MapKey::Uint(_) => KeyKind::Uint,
            MapKey::Str(_) => KeyKind::Str,
        }
    }

    /// Renders the key as an error path segment.
    ///
    /// Integer kinds render as decimal text; strings render verbatim.
    pub fn segment(&self) -> String {
        match self {
            MapKey::Int(key) => key.to_string(),
            MapKey::Uint(key) => key.to_string(),
            MapKey::Str(key) => key.clone(),
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        MapKey::Str(key.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        MapKey::Str(key)
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        MapKey::Int(key)
    }
}

impl From<i32> for MapKey {
    fn from(key: i32) -> Self {
        MapKey::Int(i64::from(key))
    }
}

impl From<u64> for MapKey {
    fn from(key: u64) -> Self {
        MapKey::Uint(key)
    }
}

/// A keyed container with a declared key kind.
///
/// The declared kind exists independently of the entries so a key-binding
/// mismatch is detectable even on an empty map.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMap {
    key_kind: KeyKind,
    entries: BTreeMap<MapKey, Value>,
}

impl ValueMap {
    /// Creates an empty map with the given declared key kind.
    pub fn new(key_kind: KeyKind) -> Self {
        Self {
            key_kind,
            entries: BTreeMap::new(),
        }
    }

    /// The declared key kind.
    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    /// Inserts an entry, returning `self` for chaining.
    ///
    /// The key must be of the declared kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn entry(mut self, key: impl Into<MapKey>, value: impl Into<Value>) -> Self {
        let key = key.into();
        debug_assert_eq!(key.kind(), self.key_kind, "map key kind mismatch");
        self.entries.insert(key, value.into());
        self
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.entries.iter()
    }

    /// Iterates keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.entries.keys()
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A named field slot inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    name: Cow<'static, str>,
    tags: Vec<(Cow<'static, str>, Cow<'static, str>)>,
    embedded: bool,
    value: Value,
}

impl RecordField {
    /// Creates a field slot with a declared name and value.
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            embedded: false,
            value: value.into(),
        }
    }

    /// Attaches a naming-tag attribute, e.g. `("json", "name,omitempty")`.
    #[must_use = "builder methods must be chained or built"]
    pub fn tag(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    /// Marks the field as an anonymous/embedded sub-record.
    #[must_use = "builder methods must be chained or built"]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// The declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a naming-tag attribute by key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag.as_ref() == key)
            .map(|(_, value)| value.as_ref())
    }

    /// Whether the field is an anonymous/embedded sub-record.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// The field value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A structured value with named fields, declared in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<RecordField>,
}

impl Record {
    /// Creates a record with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field slot, returning `self` for chaining.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, field: RecordField) -> Self {
        self.fields.push(field);
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record declares no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &RecordField> {
        self.fields.iter()
    }

    /// Returns the directly declared field with the given name.
    ///
    /// Does not search embedded sub-records; the record field resolver
    /// handles that.
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

// ============================================================================
// CUSTOM VALUES
// ============================================================================

/// Capabilities an opaque caller value may expose.
///
/// Every method is optional: returning `None` means the capability is
/// absent. The dispatcher and classifier probe these in well-defined places:
///
/// - [`underlying`](CustomValue::underlying) — a comparison-ready value the
///   classifier substitutes when dereferencing (nullable wrappers and the
///   like).
/// - [`zero`](CustomValue::zero) — the value's own zero-state notion,
///   trusted verbatim by emptiness checks.
/// - [`validate`](CustomValue::validate) — self-validation; when present it
///   fully overrides automatic field/element recursion.
/// - [`validate_with`](CustomValue::validate_with) — intercepts how each
///   individual rule in a sequence is applied to this value.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Comparison-ready underlying value, if the type exposes one.
    fn underlying(&self) -> Option<Value> {
        None
    }

    /// The value's own "is this the zero state" answer, if it has one.
    fn zero(&self) -> Option<bool> {
        None
    }

    /// Parameterless self-validation, if the type supports it.
    fn validate(&self) -> Option<Result<(), Error>> {
        None
    }

    /// Validation against one externally supplied rule, if supported.
    fn validate_with(&self, _rule: &dyn Rule) -> Option<Result<(), Error>> {
        None
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// Any runtime datum submitted for validation.
#[derive(Debug, Clone)]
pub enum Value {
    /// True nil: carries no type and no value.
    Nothing,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    Uint(u64),
    /// Floating point scalar.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Indexed container.
    List(Vec<Value>),
    /// Keyed container.
    Map(ValueMap),
    /// Named-field structure.
    Record(Record),
    /// Reference; `None` is the wrapped (typed) nil.
    Ref(Option<Box<Value>>),
    /// Opaque caller value with optional capabilities.
    Custom(Arc<dyn CustomValue>),
}

impl Value {
    /// The classify step: returns this value's [`Kind`].
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nothing => Kind::Nothing,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Bytes(_) => Kind::Bytes,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Ref(_) => Kind::Ref,
            Value::Custom(_) => Kind::Custom,
        }
    }

    /// A reference holding the given value.
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Ref(Some(Box::new(value.into())))
    }

    /// A wrapped nil: a reference holding nothing.
    pub fn none() -> Self {
        Value::Ref(None)
    }

    /// A byte-string value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// A list built from any values.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// A string-keyed map built from key/value pairs.
    pub fn str_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut map = ValueMap::new(KeyKind::Str);
        for (key, value) in entries {
            map = map.entry(MapKey::Str(key.into()), value);
        }
        Value::Map(map)
    }

    /// Wraps an opaque caller value.
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Converts a JSON document into a [`Value`].
    ///
    /// `null` maps to [`Value::Nothing`]; numbers map to `Int`, `Uint` or
    /// `Float` by representability; objects become string-keyed maps.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nothing,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut map = ValueMap::new(KeyKind::Str);
                for (key, value) in entries {
                    map = map.entry(MapKey::Str(key.clone()), Value::from_json(value));
                }
                Value::Map(map)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            // Opaque values compare through their underlying value when both
            // expose one, by identity otherwise.
            (Value::Custom(a), Value::Custom(b)) => match (a.underlying(), b.underlying()) {
                (Some(ua), Some(ub)) => ua == ub,
                _ => Arc::ptr_eq(a, b),
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("map[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{value}", key.segment())?;
                }
                f.write_str("]")
            }
            Value::Record(record) => {
                f.write_str("{")?;
                for (i, field) in record.fields().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", field.name(), field.value())?;
                }
                f.write_str("}")
            }
            Value::Ref(None) => f.write_str("<nil>"),
            Value::Ref(Some(inner)) => write!(f, "{inner}"),
            Value::Custom(custom) => match custom.underlying() {
                Some(value) => write!(f, "{value}"),
                None => write!(f, "{custom:?}"),
            },
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => Value::some(inner),
            None => Value::none(),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Value::Map(v)
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
    fn kind_classification() {
        assert_eq!(Value::Nothing.kind(), Kind::Nothing);
        assert_eq!(Value::from(1).kind(), Kind::Int);
        assert_eq!(Value::from(1u64).kind(), Kind::Uint);
        assert_eq!(Value::from(1.5).kind(), Kind::Float);
        assert_eq!(Value::from("abc").kind(), Kind::Str);
        assert_eq!(Value::list([1, 2]).kind(), Kind::List);
        assert_eq!(Value::none().kind(), Kind::Ref);
        assert_eq!(Value::Record(Record::new()).kind(), Kind::Record);
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some(5)), Value::some(5));
        assert_eq!(Value::from(None::<i64>), Value::none());
    }

    #[test]
    fn map_key_segments() {
        assert_eq!(MapKey::from(12i64).segment(), "12");
        assert_eq!(MapKey::from(7u64).segment(), "7");
        assert_eq!(MapKey::from("name").segment(), "name");
    }

    #[test]
    fn record_field_lookup() {
        let record = Record::new()
            .with(RecordField::new("Name", "abc").tag("json", "name"))
            .with(RecordField::new("Position", 3));

        assert_eq!(record.field("Name").unwrap().tag_value("json"), Some("name"));
        assert!(record.field("Missing").is_none());
    }

    #[test]
    fn from_json_maps_shapes() {
        let json = serde_json::json!({
            "name": "abc",
            "count": 3,
            "ratio": 0.5,
            "tags": ["x", "y"],
            "gone": null,
        });
        let value = Value::from_json(&json);

        let Value::Map(map) = value else {
            panic!("expected a map");
        };
        assert_eq!(map.key_kind(), KeyKind::Str);
        assert_eq!(map.get(&MapKey::from("name")), Some(&Value::from("abc")));
        assert_eq!(map.get(&MapKey::from("count")), Some(&Value::from(3)));
        assert_eq!(map.get(&MapKey::from("ratio")), Some(&Value::from(0.5)));
        assert_eq!(map.get(&MapKey::from("gone")), Some(&Value::Nothing));
        assert_eq!(map.get(&MapKey::from("tags")), Some(&Value::list(["x", "y"])));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(0.0).to_string(), "0");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::none().to_string(), "<nil>");
        assert_eq!(Value::some("x").to_string(), "x");
        assert_eq!(Value::list([1, 2]).to_string(), "[1 2]");
    }

    #[derive(Debug)]
    struct Wrapped(i64);

    impl CustomValue for Wrapped {
        fn underlying(&self) -> Option<Value> {
            Some(Value::Int(self.0))
        }
    }

    #[test]
    fn custom_values_compare_through_underlying() {
        assert_eq!(Value::custom(Wrapped(5)), Value::custom(Wrapped(5)));
        assert_ne!(Value::custom(Wrapped(5)), Value::custom(Wrapped(6)));
    }
}
