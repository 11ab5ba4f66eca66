//! Memoization cache for leaf-rule results.
//!
//! A leaf result is a pure function of the tuple (field name, operator name,
//! rule value, data value), so the engine caches it under a digest of that
//! tuple and skips dispatch entirely on a hit.
//!
//! ## Key construction
//!
//! Distinct tuples must not collide: a collision would silently return the
//! wrong boolean, which makes this a correctness concern rather than a
//! performance one. The key is a SHA-256 digest over a canonical encoding of
//! the tuple in which every component is length-prefixed and values use the
//! injective encoding from `Value::canonical` (kind-tagged, floats by raw
//! bits, strings and lists length-prefixed).
//!
//! The cache is unbounded for the lifetime of one evaluator instance and is
//! never shared between instances.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::value::Value;

/// Digest identifying one memoized leaf result.
pub(crate) type LeafKey = [u8; 32];

/// Compute the cache key for a (field, operator, rule value, data value)
/// tuple.
pub(crate) fn leaf_key(field: &str, operator: &str, rule_value: &Value, data_value: &Value) -> LeafKey {
    let mut hasher = Sha256::new();
    for part in [field, operator, &rule_value.canonical(), &data_value.canonical()] {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    hasher.finalize().into()
}

#[derive(Debug, Default)]
pub(crate) struct ResultCache {
    entries: HashMap<LeafKey, bool>,
}

impl ResultCache {
    pub(crate) fn new() -> Self {
        ResultCache { entries: HashMap::new() }
    }

    pub(crate) fn get(&self, key: &LeafKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: LeafKey, result: bool) {
        self.entries.insert(key, result);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tuples_share_a_key() {
        let a = leaf_key("age", ">", &Value::from(18), &Value::from(25));
        let b = leaf_key("age", ">", &Value::from(18), &Value::from(25));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_tuples_get_distinct_keys() {
        let base = leaf_key("age", ">", &Value::from(18), &Value::from(25));
        let variants = [
            leaf_key("age", ">=", &Value::from(18), &Value::from(25)),
            leaf_key("aged", ">", &Value::from(18), &Value::from(25)),
            leaf_key("age", ">", &Value::from(25), &Value::from(18)),
            leaf_key("age", ">", &Value::from(18.0), &Value::from(25)),
            leaf_key("age", ">", &Value::from("18"), &Value::from(25)),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    /// Component boundaries must not shift: ("ab", "c") and ("a", "bc") are
    /// different tuples.
    #[test]
    fn length_prefix_pins_component_boundaries() {
        let a = leaf_key("ab", "c", &Value::Null, &Value::Null);
        let b = leaf_key("a", "bc", &Value::Null, &Value::Null);
        assert_ne!(a, b);
    }

    #[test]
    fn clear_empties_without_other_effects() {
        let mut cache = ResultCache::new();
        let key = leaf_key("age", ">", &Value::from(18), &Value::from(25));
        cache.insert(key, true);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key), Some(true));

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&key), None);
    }
}
