//! Core element types for nested-numeric aggregation
//!
//! This module defines the tagged union the aggregator operates over, along
//! with the discriminant type carried by errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of aggregator input
///
/// A closed variant set: a whole number, a nested sequence of further
/// elements, a person record with a numeric age, or an explicit empty marker.
/// Sequences may nest arbitrarily deep; depth is bounded only by the call
/// stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// A whole number contributing its value to the sum
    Number(i64),
    /// A nested sequence of elements, flattened recursively
    List(Vec<Element>),
    /// A record with a labeled numeric field
    Person {
        /// Display name, not used by any rule set
        name: String,
        /// Numeric field contributed under person-aware rule sets
        age: i64,
    },
    /// Explicit empty/null marker; contributes zero and never errors
    Absent,
}

impl Element {
    /// The runtime kind of this element, used for dispatch and error reporting
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Number(_) => ElementKind::Number,
            Element::List(_) => ElementKind::List,
            Element::Person { .. } => ElementKind::Person,
            Element::Absent => ElementKind::Absent,
        }
    }

    /// Convenience constructor for a person record
    pub fn person(name: impl Into<String>, age: i64) -> Self {
        Element::Person {
            name: name.into(),
            age,
        }
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::Number(value)
    }
}

impl From<Vec<Element>> for Element {
    fn from(items: Vec<Element>) -> Self {
        Element::List(items)
    }
}

/// Discriminant of an `Element`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A whole number
    Number,
    /// A nested sequence
    List,
    /// A person record
    Person,
    /// The explicit empty marker
    Absent,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Number => "number",
            ElementKind::List => "list",
            ElementKind::Person => "person",
            ElementKind::Absent => "absent",
        };
        write!(f, "{}", name)
    }
}
