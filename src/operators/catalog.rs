//! The built-in operator catalog.
//!
//! A flat, append-only list behind a `Lazy` static. Lookup is linear by
//! name; the catalog is small enough that an index would buy nothing.
//!
//! Evaluator order within each operator is load-bearing: typed comparisons
//! come first (int before float so pure-int pairs stay exact), the generic
//! fallback last.

use once_cell::sync::Lazy;

use super::Operator;
use super::comparisons::*;

static BUILT_IN: Lazy<Vec<Operator>> = Lazy::new(|| {
    vec![
        operator! {
            name: "=",
            label: "equals",
            evaluators: [int_eq, float_eq, str_eq, datetime_eq, bool_eq, any_eq],
        },
        operator! {
            name: "!=",
            label: "not equal",
            evaluators: [int_ne, float_ne, str_ne, datetime_ne, bool_ne, any_ne],
        },
        operator! {
            name: ">",
            label: "greater than",
            evaluators: [int_gt, float_gt, str_gt, datetime_gt, any_gt],
        },
        operator! {
            name: "<",
            label: "less than",
            evaluators: [int_lt, float_lt, str_lt, datetime_lt, any_lt],
        },
        operator! {
            name: ">=",
            label: "greater or equal",
            evaluators: [int_ge, float_ge, str_ge, datetime_ge, any_ge],
        },
        operator! {
            name: "<=",
            label: "less or equal",
            evaluators: [int_le, float_le, str_le, datetime_le, any_le],
        },
        operator! {
            name: "contains",
            label: "contains",
            evaluators: [str_contains, any_contains],
        },
        operator! {
            name: "startsWith",
            label: "starts with",
            evaluators: [str_starts_with, any_starts_with],
        },
        operator! {
            name: "endsWith",
            label: "ends with",
            evaluators: [str_ends_with, any_ends_with],
        },
        operator! {
            name: "matches",
            label: "matches pattern",
            evaluators: [str_matches, any_matches],
        },
        operator! {
            name: "in",
            label: "in",
            evaluators: [in_set],
        },
        operator! {
            name: "notIn",
            label: "not in",
            evaluators: [not_in_set],
        },
        operator! {
            name: "between",
            label: "between",
            evaluators: [between_int, between_float, between_datetime, between_any],
        },
    ]
});

/// All built-in operators, in catalog order.
pub fn built_in() -> &'static [Operator] {
    &BUILT_IN
}

/// Look up a built-in operator by name.
pub fn find(name: &str) -> Option<&'static Operator> {
    BUILT_IN.iter().find(|op| op.name == name)
}
