//! The skip marker.

use crate::core::error::Error;
use crate::core::rule::Rule;
use crate::core::value::Value;

/// A rule whose presence, when active, instructs the dispatcher to end
/// evaluation of the remaining sequence and declare success.
///
/// Reaching an active skip marker never masks an earlier failure: evaluation
/// is strictly left to right and short-circuits on the first error before
/// the marker is ever reached.
#[derive(Debug, Clone, Copy)]
pub struct SkipRule {
    active: bool,
}

impl SkipRule {
    /// Sets a condition that determines whether the marker is active. An
    /// inactive marker is inert.
    #[must_use = "builder methods must be chained or built"]
    pub fn when(mut self, condition: bool) -> Self {
        self.active = condition;
        self
    }

    /// Whether the marker is active.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Rule for SkipRule {
    fn validate(&self, _value: &Value) -> Result<(), Error> {
        Ok(())
    }

    fn skips(&self) -> bool {
        self.active
    }
}

/// Creates an active skip marker.
pub fn skip() -> SkipRule {
    SkipRule { active: true }
}

// ============================================================================
// TESTS
// ============================================================================
