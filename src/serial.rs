//! JSON wire format for query trees.
//!
//! A group serializes as:
//!
//! ```text
//! {
//!   "combinator": "AND" | "OR",
//!   "rules":  [ { "field": ..., "operator": ..., "value": ... }, ... ],
//!   "groups": [ <nested group>, ... ]
//! }
//! ```
//!
//! Reading is forgiving about shape but strict about meaning: absent
//! `rules`/`groups` default to empty, unknown keys are ignored, but an
//! unparseable document, a non-object top level, or a combinator token other
//! than `"AND"`/`"OR"` is an [`Error::Format`]. Writing always emits all
//! three keys.
//!
//! The transforms are pure and stateless; `pretty` only affects whitespace.

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::model::QueryGroup;

/// Serialize a query tree to a JSON object value.
pub fn to_value(group: &QueryGroup) -> JsonValue {
    // A query tree always maps to plain JSON: string keys, JSON-safe values.
    serde_json::to_value(group).expect("query trees serialize to plain JSON")
}

/// Rebuild a query tree from a JSON value.
pub fn from_value(value: JsonValue) -> Result<QueryGroup> {
    serde_json::from_value(value).map_err(|e| Error::Format(e.to_string()))
}

/// Serialize a query tree to JSON text. `pretty` controls indentation only,
/// never the logical content.
pub fn to_text(group: &QueryGroup, pretty: bool) -> String {
    let value = to_value(group);
    if pretty {
        serde_json::to_string_pretty(&value).expect("JSON values render to text")
    } else {
        value.to_string()
    }
}

/// Rebuild a query tree from JSON text.
pub fn from_text(text: &str) -> Result<QueryGroup> {
    serde_json::from_str(text).map_err(|e| Error::Format(e.to_string()))
}

/// Deep, structure-independent copy by running the tree through the wire
/// format. Value-equal to the original.
pub fn deep_clone(group: &QueryGroup) -> QueryGroup {
    from_value(to_value(group)).expect("round-trip of an in-memory tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Combinator, QueryRule};
    use crate::value::Value;

    fn nested_tree() -> QueryGroup {
        QueryGroup::all().with_rule(QueryRule::new("age", ">", 18)).with_group(
            QueryGroup::any()
                .with_rule(QueryRule::new("status", "=", "active"))
                .with_group(QueryGroup::all().with_rule(QueryRule::new("score", "between", vec![1.5, 9.5]))),
        )
    }

    #[test]
    fn writes_all_keys() {
        let json = to_value(&QueryGroup::all());
        assert_eq!(json["combinator"], "AND");
        assert!(json["rules"].as_array().unwrap().is_empty());
        assert!(json["groups"].as_array().unwrap().is_empty());
    }

    #[test]
    fn round_trip_preserves_nested_trees() {
        let tree = nested_tree();
        assert_eq!(from_text(&to_text(&tree, false)).unwrap(), tree);
        assert_eq!(from_text(&to_text(&tree, true)).unwrap(), tree);
        assert_eq!(from_value(to_value(&tree)).unwrap(), tree);
    }

    #[test]
    fn pretty_changes_whitespace_only() {
        let tree = nested_tree();
        let compact = to_text(&tree, false);
        let pretty = to_text(&tree, true);
        assert_ne!(compact, pretty);
        assert_eq!(from_text(&compact).unwrap(), from_text(&pretty).unwrap());
    }

    #[test]
    fn missing_rules_and_groups_default_to_empty() {
        let group = from_text(r#"{"combinator":"OR"}"#).unwrap();
        assert_eq!(group.combinator, Combinator::Or);
        assert!(group.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let group = from_text(r#"{"combinator":"AND","rules":[],"groups":[],"id":"abc","ui":{"x":1}}"#).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn bad_documents_are_format_errors() {
        for text in [
            "not json at all",
            "[1, 2, 3]",
            "42",
            r#"{"combinator":"XOR"}"#,
            r#"{"combinator":"and"}"#,
            r#"{"rules":[]}"#,
        ] {
            match from_text(text) {
                Err(Error::Format(_)) => {}
                other => panic!("expected format error for {text}, got {other:?}"),
            }
        }
    }

    #[test]
    fn deep_clone_is_equal_and_independent() {
        let tree = nested_tree();
        let copy = deep_clone(&tree);
        assert_eq!(copy, tree);

        // Editing the copy must not show through to the original.
        let edited = copy.without_rule(0);
        assert_ne!(edited, tree);
        assert_eq!(tree.rules[0], QueryRule::new("age", ">", 18));
    }

    #[test]
    fn rule_values_survive_the_wire() {
        let when = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let tree = QueryGroup::all()
            .with_rule(QueryRule::new("when", ">=", when))
            .with_rule(QueryRule::new("tags", "in", vec!["a", "b"]))
            .with_rule(QueryRule::new("active", "=", true));
        let back = from_text(&to_text(&tree, false)).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.rules[0].value, Value::DateTime(when));
    }
}
