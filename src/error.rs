use crate::elements::ElementKind;
use crate::rules::Branch;
use thiserror::Error;

/// Errors detected while building or validating a rule set configuration
///
/// All variants except the file-level ones are raised eagerly, before any
/// element is inspected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rule set has no branches")]
    EmptyRuleSet,

    #[error("branch '{0}' appears more than once: two rules claiming the same element")]
    DuplicateBranch(Branch),

    #[error("branch '{branch}' is unreachable: '{prior}' already claims every element")]
    UnreachableBranch { branch: Branch, prior: Branch },

    #[error("guard branch '{guard}' is shadowed by earlier '{prior}'")]
    ShadowedGuard { guard: Branch, prior: Branch },

    #[error("unknown rule set name: {0}")]
    UnknownRuleSet(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("can't work with element of kind '{0}'")]
    UnrecognizedElement(ElementKind),

    #[error("invalid rule set: {0}")]
    Config(#[from] ConfigError),
}
