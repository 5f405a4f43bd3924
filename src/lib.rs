/// Error types for configuration and aggregation
pub mod error;

/// Core element types for nested-numeric aggregation
pub mod elements;

/// Rule sets controlling variant dispatch
pub mod rules;

/// Depth-first aggregation over nested element sequences
pub mod aggregator;

/// Configuration management for the CLI front end
pub mod config;

// Re-export commonly used types
pub use aggregator::{aggregate, ElementAggregator};
pub use elements::{Element, ElementKind};
pub use error::{AggregateError, ConfigError};
pub use rules::{Branch, RuleSet};
