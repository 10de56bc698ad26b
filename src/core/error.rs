//! Validation error types.
//!
//! Every failure produced by this crate is an [`Error`]: either a *leaf*
//! carrying a human-readable message plus a stable machine code, or a
//! [`Fields`] container mapping path segments (field names, map keys, list
//! indices) to nested errors. Containers merge, and an aggregate with zero
//! entries normalizes to "no error" — a non-empty-typed-but-empty `Fields`
//! value is never surfaced.
//!
//! All string payloads use `Cow<'static, str>` so the common case of static
//! messages and codes allocates nothing.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// ERROR CODES
// ============================================================================

/// Internal error: library misuse (bad binding, wrong input shape).
pub const EC_INTERNAL: &str = "ECInternal";
/// Unexpected value type.
pub const EC_INV_TYPE: &str = "ECInvType";
/// Invalid value.
pub const EC_INV_VALUE: &str = "ECInvValue";
/// Generic validation error; also the code reported by a [`Fields`] error.
pub const EC_VALIDATION: &str = "ECValidation";
/// Unknown rule looked up in a registry.
pub const EC_UNK_RULE: &str = "ECUnkRule";
/// Missing required value.
pub const EC_REQUIRED: &str = "ECRequired";
/// Not nil but empty value.
pub const EC_REQ_NOT_EMPTY: &str = "ECReqNotEmpty";
/// Value required to be nil.
pub const EC_REQ_NIL: &str = "ECReqNil";
/// Value required to be empty.
pub const EC_REQ_EMPTY: &str = "ECReqEmpty";
/// Nil value where one is required.
pub const EC_REQ_NOT_NIL: &str = "ECReqNotNil";
/// Threshold comparison failed.
pub const EC_INV_THRESHOLD: &str = "ECInvThreshold";
/// Length outside the configured bounds.
pub const EC_INV_LENGTH: &str = "ECInvLength";
/// Membership check failed.
pub const EC_INV_IN: &str = "ECInvIn";
/// Regular expression did not match.
pub const EC_INV_MATCH: &str = "ECInvMatch";
/// Values which must not be equal.
pub const EC_EQUAL: &str = "ECEqual";
/// Values which must be equal.
pub const EC_NOT_EQUAL: &str = "ECNotEqual";
/// Required map key is missing.
pub const EC_MAP_KEY_MISSING: &str = "ECMapKeyMissing";
/// Map key not covered by any binding.
pub const EC_MAP_KEY_UNEXPECTED: &str = "ECMapKeyUnexpected";
/// Late-bound rule invoked without a function.
pub const EC_INV_DYNAMIC: &str = "ECInvDynamic";
/// Value not found.
pub const EC_NOT_FOUND: &str = "ECNotFound";

// ============================================================================
// ERROR
// ============================================================================

/// A validation error: a leaf message with a machine code, or a path-keyed
/// container of nested errors.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::{Error, EC_REQUIRED};
///
/// let err = Error::new("cannot be blank", EC_REQUIRED);
/// assert_eq!(err.code(), EC_REQUIRED);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Leaf error: message plus stable machine code.
    #[error("{message}")]
    Leaf {
        /// Human-readable description of the failure.
        message: Cow<'static, str>,
        /// Stable machine code, e.g. `ECRequired`.
        code: Cow<'static, str>,
    },
    /// Path-keyed container of nested errors.
    #[error("{0}")]
    Fields(Fields),
}

impl Error {
    /// Creates a new leaf error with the given message and code.
    pub fn new(message: impl Into<Cow<'static, str>>, code: impl Into<Cow<'static, str>>) -> Self {
        Error::Leaf {
            message: message.into(),
            code: code.into(),
        }
    }

    /// Creates an internal (library misuse) error.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Error::new(message, EC_INTERNAL)
    }

    /// The error returned in case of an unexpected value type.
    pub fn invalid_type() -> Self {
        Error::new("unexpected value type", EC_INV_TYPE)
    }

    /// The error returned when a named rule cannot be resolved.
    pub fn unknown_rule() -> Self {
        Error::new("unknown rule", EC_UNK_RULE)
    }

    /// Returns the machine code of this error.
    ///
    /// A [`Fields`] container reports [`EC_VALIDATION`].
    pub fn code(&self) -> &str {
        match self {
            Error::Leaf { code, .. } => code,
            Error::Fields(_) => EC_VALIDATION,
        }
    }

    /// Wraps the error with the given code.
    ///
    /// Identity preserving: wrapping with the code the error already carries
    /// (or with an empty code) returns the error unchanged. Wrapping a
    /// [`Fields`] container with a foreign code flattens it to a leaf that
    /// keeps the rendered message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(self, code: impl Into<Cow<'static, str>>) -> Self {
        let code = code.into();
        if code.is_empty() || self.code() == code {
            return self;
        }
        match self {
            Error::Leaf { message, .. } => Error::Leaf { message, code },
            fields @ Error::Fields(_) => Error::Leaf {
                message: fields.to_string().into(),
                code,
            },
        }
    }

    /// Whether this is an internal/system-class error ([`EC_INTERNAL`]).
    ///
    /// Internal errors bypass aggregation and abort the enclosing resolution
    /// step as its sole result.
    pub fn is_internal(&self) -> bool {
        self.code() == EC_INTERNAL
    }

    /// Returns the nested entries when this is a path-keyed error.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Error::Leaf { .. } => None,
            Error::Fields(fields) => Some(fields),
        }
    }

    /// Renders the error as a JSON value.
    ///
    /// A leaf renders as `{"code": ..., "error": ...}`, a container as an
    /// object keyed by path segment.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Error::Leaf { message, code } => serde_json::json!({
                "code": code,
                "error": message,
            }),
            Error::Fields(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(key, err)| (key.clone(), err.to_json()))
                    .collect(),
            ),
        }
    }
}

impl serde::Serialize for Error {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_json(), serializer)
    }
}

impl From<Fields> for Error {
    fn from(fields: Fields) -> Self {
        Error::Fields(fields)
    }
}

// ============================================================================
// FIELDS
// ============================================================================

/// Ordered mapping from path segment to nested [`Error`].
///
/// Acts as the error aggregator: entries are recorded only for paths whose
/// validation failed, and [`Fields::filter`] normalizes an aggregate with
/// zero entries to `Ok(())`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields(BTreeMap<String, Error>);

impl Fields {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error under the given path segment.
    pub fn set(&mut self, key: impl Into<String>, err: Error) {
        self.0.insert(key.into(), err);
    }

    /// Merges the entries of `other` into this aggregate.
    ///
    /// Child errors are moved as-is; their codes are never altered.
    pub fn merge(&mut self, other: Fields) {
        self.0.extend(other.0);
    }

    /// Returns the error recorded under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Error> {
        self.0.get(key)
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Error)> {
        self.0.iter()
    }

    /// Normalizes the aggregate: `Ok(())` when empty, the container error
    /// otherwise.
    pub fn filter(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Fields(self))
        }
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, err)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{key}: {err}")?;
        }
        Ok(())
    }
}

impl FromIterator<(String, Error)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Error)>>(iter: I) -> Self {
        Fields(iter.into_iter().collect())
    }
}

impl IntoIterator for Fields {
    type Item = (String, Error);
    type IntoIter = std::collections::btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
