//! Rule composition: the skip marker, conditional branches, container
//! iteration, keyed-map bindings and the record field resolver.

pub mod each;
pub mod field;
pub mod map;
pub mod skip;
pub mod when;

pub use each::{EachRule, each};
pub use field::{FieldRules, field, set_name_tag, validate_record};
pub use map::{KeyRules, MapRule, key, map_rule};
pub use skip::{SkipRule, skip};
pub use when::{WhenRule, when};
