//! Immutable query data model.
//!
//! A query is a tree: [`QueryGroup`] nodes combine leaf [`QueryRule`]
//! predicates and nested groups under an AND/OR [`Combinator`]. The tree is
//! a plain value type: every edit helper returns a new tree and nothing is
//! mutated in place, so trees can be shared freely (including across
//! threads) while an editor builds replacements.
//!
//! [`Field`] describes one queryable attribute for configuration purposes.
//! Evaluation is deliberately decoupled from field declarations: a
//! [`QueryRule`] refers to its field by string key and is evaluated against
//! whatever the record holds under that key, declared or not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::operators::Operator;
use crate::value::Value;

/// Boolean connective applied to a group's children.
///
/// Wire representation is exactly `"AND"` / `"OR"`; any other token is a
/// format error on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => f.write_str("AND"),
            Combinator::Or => f.write_str("OR"),
        }
    }
}

impl FromStr for Combinator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Combinator::And),
            "OR" => Ok(Combinator::Or),
            other => Err(Error::Format(format!("unrecognized combinator `{other}`"))),
        }
    }
}

/// A leaf predicate: `field` is a key into the record, `operator` is a name
/// resolved against the operator registry at evaluation time, `value` is the
/// comparison operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRule {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl QueryRule {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        QueryRule { field: field.into(), operator: operator.into(), value: value.into() }
    }
}

/// An internal tree node: a combinator over direct child rules and nested
/// child groups.
///
/// A group with no rules and no groups is vacuously true under both
/// combinators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryGroup {
    pub combinator: Combinator,
    #[serde(default)]
    pub rules: Vec<QueryRule>,
    #[serde(default)]
    pub groups: Vec<QueryGroup>,
}

impl QueryGroup {
    /// An empty group under the given combinator.
    pub fn new(combinator: Combinator) -> Self {
        QueryGroup { combinator, rules: Vec::new(), groups: Vec::new() }
    }

    /// Shorthand for `QueryGroup::new(Combinator::And)`.
    pub fn all() -> Self {
        QueryGroup::new(Combinator::And)
    }

    /// Shorthand for `QueryGroup::new(Combinator::Or)`.
    pub fn any() -> Self {
        QueryGroup::new(Combinator::Or)
    }

    /// True when the group has no rules and no nested groups.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.groups.is_empty()
    }

    /// Total number of leaf rules in this subtree.
    pub fn rule_count(&self) -> usize {
        self.rules.len() + self.groups.iter().map(QueryGroup::rule_count).sum::<usize>()
    }

    /// New tree with `rule` appended to this group's direct rules.
    pub fn with_rule(&self, rule: QueryRule) -> QueryGroup {
        let mut next = self.clone();
        next.rules.push(rule);
        next
    }

    /// New tree with `group` appended to this group's nested groups.
    pub fn with_group(&self, group: QueryGroup) -> QueryGroup {
        let mut next = self.clone();
        next.groups.push(group);
        next
    }

    /// New tree with the direct rule at `index` removed. Out-of-range
    /// indices leave the tree unchanged.
    pub fn without_rule(&self, index: usize) -> QueryGroup {
        let mut next = self.clone();
        if index < next.rules.len() {
            next.rules.remove(index);
        }
        next
    }

    /// New tree with the nested group at `index` removed. Out-of-range
    /// indices leave the tree unchanged.
    pub fn without_group(&self, index: usize) -> QueryGroup {
        let mut next = self.clone();
        if index < next.groups.len() {
            next.groups.remove(index);
        }
        next
    }
}

/// Input widget hint for a field. Informs a UI layer only; evaluation never
/// consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Number,
    Date,
    Select,
    Boolean,
}

/// One queryable attribute: its record key, display label, input hint and
/// the operators a query editor may offer for it.
#[derive(Debug, Clone)]
pub struct Field {
    /// Key into records.
    pub name: String,
    /// Display text; irrelevant to evaluation.
    pub label: String,
    pub input_type: InputType,
    /// Operators applicable to this field. Must be non-empty; validated by
    /// `validate_configuration`.
    pub operators: Vec<Operator>,
    /// Enumerated values for select-type fields.
    pub options: Option<Vec<String>>,
    /// Name of the operator pre-selected by an editor. Must be a member of
    /// `operators` if present.
    pub default_operator: Option<String>,
    pub default_value: Option<Value>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        input_type: InputType,
        operators: Vec<Operator>,
    ) -> Self {
        Field {
            name: name.into(),
            label: label.into(),
            input_type,
            operators,
            options: None,
            default_operator: None,
            default_value: None,
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_default_operator(mut self, name: impl Into<String>) -> Self {
        self.default_operator = Some(name.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
