//! Operators and their typed comparison functions.
//!
//! An [`Operator`] is a named, ordered list of *evaluators*: binary
//! predicates of the shape `fn(&Value, &Value) -> Option<bool>`. Evaluation
//! tries them strictly in list order; each evaluator checks operand kinds
//! itself and returns `None` ("declines") when it does not apply. The first
//! `Some(_)` wins.
//!
//! ```text
//! rule:  age > 18           record: {age: 25}
//!
//! ">"  evaluators: [int_gt, float_gt, str_gt, datetime_gt, any_gt]
//!                    │
//!                    └─ both operands are Int -> Some(true), dispatch stops
//! ```
//!
//! This ordered-dispatch design lets numeric, string, datetime and generic
//! fallback comparisons coexist under one operator name: `>` on two ints is
//! an integer comparison, on two strings lexicographic, on a datetime and an
//! ISO string a temporal one. If *every* evaluator declines, that is a hard
//! evaluation failure surfaced by the engine, never a silent `false`.
//!
//! ## Responsibilities by module
//!
//! - `comparisons.rs`: the typed comparison functions themselves. Public so
//!   custom operators can reuse them.
//! - `catalog.rs`: the built-in operator catalog (`=`, `!=`, `>`, `<`, `>=`,
//!   `<=`, `contains`, `startsWith`, `endsWith`, `matches`, `in`, `notIn`,
//!   `between`) behind a `Lazy` static, with name lookup.
//!
//! ## Custom operators
//!
//! Build one with the [`operator!`](crate::operator) macro or
//! [`Operator::new`] and hand it to `Evaluator::with_operators`; custom
//! names shadow built-ins of the same name.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

#[path = "operators/catalog.rs"]
pub mod catalog;
#[path = "operators/comparisons.rs"]
pub mod comparisons;
#[cfg(test)]
#[path = "operators/tests.rs"]
mod tests;

/// One typed comparison in an operator's ordered evaluator list.
///
/// Called as `evaluator(data_value, rule_value)`. `None` means "not
/// applicable to these operand kinds, try the next one".
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Option<bool> + Send + Sync>;

/// A named comparison operator.
///
/// Identity (registry lookup, equality) is by `name` alone; `label` is
/// display text for an editor and never affects evaluation.
#[derive(Clone)]
pub struct Operator {
    pub name: String,
    pub label: String,
    /// Ordered evaluator list; tried first to last during dispatch.
    pub evaluators: Vec<Comparator>,
}

impl Operator {
    pub fn new(name: impl Into<String>, label: impl Into<String>, evaluators: Vec<Comparator>) -> Self {
        Operator { name: name.into(), label: label.into(), evaluators }
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Operator {}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("evaluators", &format_args!("<{} functions>", self.evaluators.len()))
            .finish()
    }
}
