//! Depth-first aggregation over nested element sequences
//!
//! This module provides the ElementAggregator which sums every whole number
//! found in a heterogeneous sequence, flattening nested lists recursively and
//! dispatching each element through the branches of a validated rule set.

use crate::elements::Element;
use crate::error::{AggregateError, ConfigError};
use crate::rules::{Branch, RuleSet};
use log::debug;

/// Recursive aggregator bound to a validated rule set
///
/// Binding validates the rule set once, so a contradictory configuration is
/// rejected at configuration time rather than when an element first reaches
/// the ambiguous branch. The aggregator holds no other state and may be
/// shared freely across call sites.
pub struct ElementAggregator {
    /// Dispatch configuration applied to every element, including nested ones
    rules: RuleSet,
}

impl ElementAggregator {
    /// Bind an aggregator to a rule set
    ///
    /// # Arguments
    ///
    /// * `rules` - Dispatch configuration to apply to every element
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the rule set contains overlapping or
    /// unreachable branches.
    pub fn new(rules: RuleSet) -> Result<Self, ConfigError> {
        rules.validate()?;
        debug!("Aggregator bound to rule set '{}'", rules.name());
        Ok(Self { rules })
    }

    /// The rule set this aggregator dispatches through
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Sum all whole numbers in `items`, flattening nested lists
    ///
    /// Traversal is depth-first and left-to-right; the order is deterministic
    /// even though addition makes it irrelevant to the numeric result.
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::UnrecognizedElement` when an element reaches
    /// a reject branch; no partial sum is returned.
    pub fn sum(&self, items: &[Element]) -> Result<i64, AggregateError> {
        sum_elements(items, &self.rules)
    }

    /// Sum elements produced by an iterator
    ///
    /// The iterator is drained once, left to right. Nested lists inside
    /// produced elements are still flattened recursively.
    pub fn sum_iter<I>(&self, items: I) -> Result<i64, AggregateError>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut total = 0i64;
        for item in items {
            total += sum_one(&item, &self.rules)?;
        }
        Ok(total)
    }
}

/// Aggregate `items` under `rules` in a single call
///
/// Validates the rule set before traversal begins; an invalid configuration
/// fails the whole call with no element inspected.
///
/// # Examples
///
/// ```
/// use tally::aggregator::aggregate;
/// use tally::elements::Element;
/// use tally::rules::RuleSet;
///
/// let items = vec![
///     Element::Number(1),
///     Element::Number(2),
///     Element::List(vec![Element::Number(3), Element::Number(4)]),
/// ];
/// assert_eq!(aggregate(&items, &RuleSet::basic()).unwrap(), 10);
/// ```
pub fn aggregate(items: &[Element], rules: &RuleSet) -> Result<i64, AggregateError> {
    rules.validate()?;
    sum_elements(items, rules)
}

fn sum_elements(items: &[Element], rules: &RuleSet) -> Result<i64, AggregateError> {
    let mut total = 0i64;
    for item in items {
        total += sum_one(item, rules)?;
    }
    Ok(total)
}

/// Dispatch a single element through the rule set's branches in priority order
///
/// The first branch whose pattern matches claims the element; no fallthrough.
/// An element no branch claims contributes zero, which is how rule sets
/// without a reject branch ignore foreign kinds silently.
fn sum_one(item: &Element, rules: &RuleSet) -> Result<i64, AggregateError> {
    for branch in rules.branches() {
        match (branch, item) {
            (Branch::Number, Element::Number(value)) => return Ok(*value),
            (Branch::List, Element::List(items)) => return sum_elements(items, rules),
            (Branch::Absent, Element::Absent) => return Ok(0),
            (Branch::MinorPerson, Element::Person { age, .. }) if *age < 18 => return Ok(0),
            (Branch::Person, Element::Person { age, .. }) => return Ok(*age),
            (Branch::CatchAll, _) => {
                return Ok(match item {
                    Element::Number(value) => *value,
                    Element::Person { age, .. } => *age,
                    _ => 0,
                });
            }
            (Branch::Reject, _) => {
                return Err(AggregateError::UnrecognizedElement(item.kind()));
            }
            _ => {}
        }
    }
    Ok(0)
}
