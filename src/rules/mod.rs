/// Rule set definitions and validation
pub mod rule_set;

pub use rule_set::{Branch, RuleSet};
