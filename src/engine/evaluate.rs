//! The evaluator: recursive group walk plus leaf dispatch.
//!
//! Setting `QUERION_DEBUG_EVAL=1` prints dispatch and cache traces to
//! stderr.

use std::collections::HashMap;

use crate::error::{Error, EvalCause, Result};
use crate::model::{Combinator, QueryGroup, QueryRule};
use crate::operators::{Operator, catalog};
use crate::value::Value;

use super::cache::{ResultCache, leaf_key};

/// A record under evaluation: field name to value.
pub type Record = HashMap<String, Value>;

static NULL: Value = Value::Null;

fn debug_enabled() -> bool {
    std::env::var_os("QUERION_DEBUG_EVAL").is_some()
}

/// Evaluates query trees against records.
///
/// Holds the effective operator registry (caller-supplied operators first,
/// then the built-in catalog) and a per-instance memoization cache. The
/// query tree and record are never mutated; the only state here is the
/// cache, which is why evaluation takes `&mut self` - one evaluator is a
/// single-threaded object, while trees, records and catalogs stay freely
/// shareable.
#[derive(Debug)]
pub struct Evaluator {
    /// Caller-supplied operators, resolved before the built-in catalog.
    custom: Vec<Operator>,
    cache: ResultCache,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

impl Evaluator {
    /// Evaluator over the built-in operator catalog only.
    pub fn new() -> Self {
        Evaluator { custom: Vec::new(), cache: ResultCache::new() }
    }

    /// Evaluator with extra operators. A custom operator shadows a built-in
    /// with the same name.
    pub fn with_operators(operators: Vec<Operator>) -> Self {
        Evaluator { custom: operators, cache: ResultCache::new() }
    }

    /// Evaluate `group` against `record`.
    ///
    /// Depth-first, left-to-right, short-circuiting: under AND the first
    /// false child ends the group, under OR the first true one. An empty
    /// group is vacuously true. A rule that cannot be resolved to a definite
    /// boolean fails the whole call with [`Error::Evaluation`].
    pub fn evaluate(&mut self, group: &QueryGroup, record: &Record) -> Result<bool> {
        if group.is_empty() {
            return Ok(true);
        }

        match group.combinator {
            Combinator::And => {
                for rule in &group.rules {
                    if !self.eval_rule(rule, record)? {
                        return Ok(false);
                    }
                }
                for nested in &group.groups {
                    if !self.evaluate(nested, record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Combinator::Or => {
                for rule in &group.rules {
                    if self.eval_rule(rule, record)? {
                        return Ok(true);
                    }
                }
                for nested in &group.groups {
                    if self.evaluate(nested, record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Evaluate `group` against many records, sharing one cache across the
    /// whole pass. Returns the records that matched, in input order.
    pub fn filter<'r>(&mut self, group: &QueryGroup, records: &'r [Record]) -> Result<Vec<&'r Record>> {
        let mut matched = Vec::new();
        for record in records {
            if self.evaluate(group, record)? {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// Drop every memoized leaf result. No other effect.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of memoized leaf results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn resolve(&self, name: &str) -> Option<&Operator> {
        self.custom.iter().find(|op| op.name == name).or_else(|| catalog::find(name))
    }

    fn eval_rule(&mut self, rule: &QueryRule, record: &Record) -> Result<bool> {
        // An absent field key is not an error; the rule sees a null operand.
        let data = record.get(&rule.field).unwrap_or(&NULL);

        let key = leaf_key(&rule.field, &rule.operator, &rule.value, data);
        if let Some(hit) = self.cache.get(&key) {
            if debug_enabled() {
                eprintln!("[eval] cache hit field={} op={} -> {}", rule.field, rule.operator, hit);
            }
            return Ok(hit);
        }

        let operator = self
            .resolve(&rule.operator)
            .ok_or_else(|| Error::evaluation(&rule.field, &rule.operator, EvalCause::UnknownOperator))?;

        for (idx, evaluator) in operator.evaluators.iter().enumerate() {
            if let Some(result) = evaluator(data, &rule.value) {
                if debug_enabled() {
                    eprintln!(
                        "[eval] field={} op={} evaluator#{idx} data={:?} rule={:?} -> {}",
                        rule.field, rule.operator, data, rule.value, result
                    );
                }
                self.cache.insert(key, result);
                return Ok(result);
            }
        }

        Err(Error::evaluation(
            &rule.field,
            &rule.operator,
            EvalCause::NoApplicableEvaluator { data_kind: data.kind(), rule_kind: rule.value.kind() },
        ))
    }
}
