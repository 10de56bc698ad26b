//! The built-in rule catalog.
//!
//! Every rule here is gated by a condition (`when`) and customizable with a
//! replacement error (`error`) or a wrapping error code (`code`); see the
//! crate docs for the shared contract.

pub mod absent;
pub mod by;
pub mod contain;
pub mod dynamic;
pub mod equal;
pub mod fail;
pub mod kind;
pub mod length;
pub mod one_of;
pub mod pattern;
pub mod required;
pub mod threshold;

pub use absent::{AbsentRule, empty, nil_value};
pub use by::{ByRule, StrRule, by, check_str, noop};
pub use contain::{ContainRule, contain};
pub use dynamic::{DynamicRule, dynamic};
pub use equal::{EqualRule, equal, equal_by, equal_field, not_equal, not_equal_field};
pub use fail::{FailRule, fail};
pub use kind::{KindRule, of_kind};
pub use length::{LengthRule, char_length, length};
pub use one_of::{OneOfRule, not_one_of, one_of};
pub use pattern::{PatternRule, pattern};
pub use required::{NotNilRule, RequiredRule, not_empty, not_nil, required};
pub use threshold::{CompareFn, ThresholdRule, max, min};
