//! Rule set definitions and configuration-time validation
//!
//! A rule set is an ordered list of dispatch branches evaluated per element
//! during aggregation. Branch order encodes priority: the first branch whose
//! pattern matches claims the element, with no fallthrough. Contradictory
//! orderings are rejected here, at configuration time, never mid-traversal.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One dispatch branch of a rule set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Branch {
    /// A `Number` contributes its value; zero is not special-cased
    Number,
    /// A `List` is flattened recursively under the same rule set
    List,
    /// An `Absent` marker contributes zero
    Absent,
    /// A `Person` younger than 18 contributes zero; must precede `Person`
    MinorPerson,
    /// A `Person` contributes their age
    Person,
    /// Claims every element: numbers contribute their value, persons their
    /// age, anything else zero
    CatchAll,
    /// Claims every element left over and reports it as unrecognized
    Reject,
}

impl Branch {
    /// Whether this branch claims every element that reaches it
    fn is_terminal(&self) -> bool {
        matches!(self, Branch::CatchAll | Branch::Reject)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Branch::Number => "number",
            Branch::List => "list",
            Branch::Absent => "absent",
            Branch::MinorPerson => "minor-person",
            Branch::Person => "person",
            Branch::CatchAll => "catch-all",
            Branch::Reject => "reject",
        };
        write!(f, "{}", name)
    }
}

/// A named, ordered dispatch configuration
///
/// Construct one of the built-in configurations with [`RuleSet::basic`],
/// [`RuleSet::strict`], [`RuleSet::guarded`] or [`RuleSet::catch_all`], or a
/// validated custom ordering with [`RuleSet::custom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Human-readable name, used in logs
    name: String,
    /// Branches in priority order
    branches: Vec<Branch>,
}

impl RuleSet {
    /// Numbers and nested lists only; anything else is ignored silently
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            branches: vec![Branch::Number, Branch::List],
        }
    }

    /// Numbers, nested lists and explicit empties; anything else is an error
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            branches: vec![Branch::Number, Branch::List, Branch::Absent, Branch::Reject],
        }
    }

    /// Like `strict`, but persons contribute their age once of age
    ///
    /// The minor guard sits ahead of the generic person branch so that
    /// persons under 18 contribute zero without reaching it.
    pub fn guarded() -> Self {
        Self {
            name: "guarded".to_string(),
            branches: vec![
                Branch::MinorPerson,
                Branch::Number,
                Branch::List,
                Branch::Person,
                Branch::Absent,
                Branch::Reject,
            ],
        }
    }

    /// A single generic branch inspecting every element; never errors
    pub fn catch_all() -> Self {
        Self {
            name: "catch-all".to_string(),
            branches: vec![Branch::CatchAll],
        }
    }

    /// Build a custom rule set, validating the branch ordering eagerly
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the ordering is empty, contains duplicate
    /// branches, places anything after a branch that already claims every
    /// element, or puts the generic person branch ahead of its minor guard.
    pub fn custom(name: impl Into<String>, branches: Vec<Branch>) -> Result<Self, ConfigError> {
        let rule_set = Self {
            name: name.into(),
            branches,
        };
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// Look up a built-in rule set by its name
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownRuleSet` for names other than
    /// `basic`, `strict`, `guarded` and `catch-all`.
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "basic" => Ok(Self::basic()),
            "strict" => Ok(Self::strict()),
            "guarded" => Ok(Self::guarded()),
            "catch-all" => Ok(Self::catch_all()),
            other => Err(ConfigError::UnknownRuleSet(other.to_string())),
        }
    }

    /// Human-readable name of this rule set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Branches in priority order
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Check the branch ordering for contradictions
    ///
    /// # Errors
    ///
    /// Returns the first contradiction found, scanning top-down.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branches.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }

        let mut seen: Vec<Branch> = Vec::with_capacity(self.branches.len());
        for &branch in &self.branches {
            if let Some(&prior) = seen.iter().find(|prior| prior.is_terminal()) {
                return Err(ConfigError::UnreachableBranch { branch, prior });
            }
            if seen.contains(&branch) {
                return Err(ConfigError::DuplicateBranch(branch));
            }
            if branch == Branch::MinorPerson && seen.contains(&Branch::Person) {
                return Err(ConfigError::ShadowedGuard {
                    guard: Branch::MinorPerson,
                    prior: Branch::Person,
                });
            }
            seen.push(branch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_rule_sets_are_valid() {
        for rule_set in [
            RuleSet::basic(),
            RuleSet::strict(),
            RuleSet::guarded(),
            RuleSet::catch_all(),
        ] {
            assert!(rule_set.validate().is_ok(), "{} should validate", rule_set.name());
        }
    }

    #[test]
    fn test_by_name_round_trip() {
        for name in ["basic", "strict", "guarded", "catch-all"] {
            let rule_set = RuleSet::by_name(name).unwrap();
            assert_eq!(rule_set.name(), name);
        }
    }

    #[test]
    fn test_by_name_unknown() {
        let err = RuleSet::by_name("lenient").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRuleSet(ref name) if name == "lenient"));
    }

    #[test]
    fn test_custom_valid_ordering() {
        let rule_set = RuleSet::custom(
            "numbers-only",
            vec![Branch::Number, Branch::List, Branch::Reject],
        )
        .unwrap();
        assert_eq!(rule_set.branches().len(), 3);
    }

    #[test]
    fn test_empty_rule_set_rejected() {
        let err = RuleSet::custom("empty", vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRuleSet));
    }

    #[test]
    fn test_duplicate_branch_rejected() {
        let err = RuleSet::custom("doubled", vec![Branch::Number, Branch::List, Branch::Number])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBranch(Branch::Number)));
    }

    #[test]
    fn test_branch_after_catch_all_rejected() {
        // The catch-all already claims numbers, so an explicit number branch
        // behind it can never run.
        let err = RuleSet::custom("shadowed", vec![Branch::CatchAll, Branch::Number]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnreachableBranch {
                branch: Branch::Number,
                prior: Branch::CatchAll,
            }
        ));
    }

    #[test]
    fn test_absent_after_catch_all_rejected() {
        let err = RuleSet::custom("shadowed", vec![Branch::CatchAll, Branch::Absent]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnreachableBranch {
                branch: Branch::Absent,
                prior: Branch::CatchAll,
            }
        ));
    }

    #[test]
    fn test_branch_after_reject_rejected() {
        let err = RuleSet::custom("late", vec![Branch::Number, Branch::Reject, Branch::Absent])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnreachableBranch {
                branch: Branch::Absent,
                prior: Branch::Reject,
            }
        ));
    }

    #[test]
    fn test_minor_guard_after_person_rejected() {
        let err = RuleSet::custom(
            "late-guard",
            vec![Branch::Person, Branch::MinorPerson, Branch::Number],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ShadowedGuard {
                guard: Branch::MinorPerson,
                prior: Branch::Person,
            }
        ));
    }

    #[test]
    fn test_minor_guard_before_person_accepted() {
        assert!(RuleSet::custom(
            "guarded-lite",
            vec![Branch::MinorPerson, Branch::Person, Branch::Number],
        )
        .is_ok());
    }

    #[test]
    fn test_branch_display_matches_serde_names() {
        for branch in [
            Branch::Number,
            Branch::List,
            Branch::Absent,
            Branch::MinorPerson,
            Branch::Person,
            Branch::CatchAll,
            Branch::Reject,
        ] {
            let json = serde_json::to_string(&branch).unwrap();
            assert_eq!(json, format!("\"{}\"", branch));
        }
    }
}
