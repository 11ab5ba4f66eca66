use chrono::NaiveDate;

use super::catalog;
use crate::value::Value;

/// Run an operator's dispatch by hand: first applicable evaluator wins.
fn dispatch(op_name: &str, data: Value, rule: Value) -> Option<bool> {
    let op = catalog::find(op_name).unwrap_or_else(|| panic!("unknown operator {op_name}"));
    op.evaluators.iter().find_map(|ev| ev(&data, &rule))
}

fn march(day: u32) -> Value {
    Value::DateTime(NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(0, 0, 0).unwrap())
}

#[test]
fn catalog_contains_all_operators() {
    for name in
        ["=", "!=", ">", "<", ">=", "<=", "contains", "startsWith", "endsWith", "matches", "in", "notIn", "between"]
    {
        assert!(catalog::find(name).is_some(), "missing operator {name}");
        assert!(!catalog::find(name).unwrap().evaluators.is_empty());
    }
    assert!(catalog::find("~=").is_none());
}

#[test]
fn equality_examples() {
    // Array of (data, rule, expected)
    let cases: Vec<(Value, Value, bool)> = vec![
        (Value::from(25), Value::from(25), true),
        (Value::from(25), Value::from(26), false),
        (Value::from(25), Value::from(25.0), true),
        (Value::from(2.5), Value::from(2.5), true),
        (Value::from("john"), Value::from("john"), true),
        (Value::from("john"), Value::from("John"), false),
        (Value::from(true), Value::from(true), true),
        (Value::from(true), Value::from(false), false),
        (march(1), Value::from("2024-03-01"), true),
        (Value::from("2024-03-01"), march(1), true),
        // Mismatched kinds land on the generic fallback and compare unequal.
        (Value::from("25"), Value::from(25), false),
        (Value::Null, Value::from(25), false),
        (Value::Null, Value::Null, true),
    ];

    for (data, rule, expected) in cases {
        assert_eq!(dispatch("=", data.clone(), rule.clone()), Some(expected), "= on {data:?} vs {rule:?}");
        assert_eq!(dispatch("!=", data.clone(), rule.clone()), Some(!expected), "!= on {data:?} vs {rule:?}");
    }
}

#[test]
fn ordering_examples() {
    // Array of (operator, data, rule, expected)
    let cases: Vec<(&str, Value, Value, bool)> = vec![
        (">", Value::from(25), Value::from(18), true),
        (">", Value::from(15), Value::from(18), false),
        (">", Value::from(18), Value::from(18), false),
        (">=", Value::from(18), Value::from(18), true),
        ("<", Value::from(15), Value::from(18), true),
        ("<=", Value::from(19), Value::from(18), false),
        (">", Value::from(2.5), Value::from(2), true),
        ("<", Value::from("apple"), Value::from("banana"), true),
        (">", Value::from("b"), Value::from("a"), true),
        (">", march(2), march(1), true),
        ("<=", march(1), march(1), true),
        (">", march(2), Value::from("2024-03-01"), true),
        // Generic fallback orders a numeric against nothing else, but bools
        // order among themselves.
        (">", Value::from(true), Value::from(false), true),
    ];

    for (op, data, rule, expected) in cases {
        assert_eq!(dispatch(op, data.clone(), rule.clone()), Some(expected), "{op} on {data:?} vs {rule:?}");
    }
}

#[test]
fn ordering_on_incomparable_kinds_declines_everywhere() {
    assert_eq!(dispatch(">", Value::from(vec![1, 2]), Value::from(3)), None);
    assert_eq!(dispatch("<", Value::Null, Value::from(3)), None);
}

#[test]
fn substring_family_is_case_insensitive() {
    let cases: Vec<(&str, Value, Value, bool)> = vec![
        ("contains", Value::from("test@EXAMPLE.com"), Value::from("example"), true),
        ("contains", Value::from("test@home.com"), Value::from("example"), false),
        ("startsWith", Value::from("Johnson"), Value::from("john"), true),
        ("startsWith", Value::from("Johnson"), Value::from("son"), false),
        ("endsWith", Value::from("report.PDF"), Value::from(".pdf"), true),
        ("endsWith", Value::from("report.doc"), Value::from(".pdf"), false),
        // Generic stringify path: the number 12345 contains "234".
        ("contains", Value::from(12345), Value::from("234"), true),
        ("startsWith", Value::from(12345), Value::from("123"), true),
        ("endsWith", Value::from(12345), Value::from("45"), true),
    ];

    for (op, data, rule, expected) in cases {
        assert_eq!(dispatch(op, data.clone(), rule.clone()), Some(expected), "{op} on {data:?} vs {rule:?}");
    }
}

#[test]
fn matches_applies_patterns() {
    assert_eq!(dispatch("matches", Value::from("user@site.org"), Value::from(r"^\w+@\w+\.\w+$")), Some(true));
    assert_eq!(dispatch("matches", Value::from("invalid-email"), Value::from(r"^\w+@\w+\.\w+$")), Some(false));
}

#[test]
fn matches_invalid_pattern_is_a_non_match() {
    assert_eq!(dispatch("matches", Value::from("anything"), Value::from("([unclosed")), Some(false));
}

#[test]
fn membership_examples() {
    let list = Value::from(vec!["red", "green", "blue"]);
    let cases: Vec<(&str, Value, Value, bool)> = vec![
        ("in", Value::from("green"), list.clone(), true),
        ("in", Value::from("yellow"), list.clone(), false),
        ("notIn", Value::from("yellow"), list.clone(), true),
        // Numeric containment is loose across int/float.
        ("in", Value::from(2), Value::from(vec![1.0, 2.0]), true),
        // Comma-separated string form, with trimming.
        ("in", Value::from("green"), Value::from("red, green, blue"), true),
        ("in", Value::from("teal"), Value::from("red, green, blue"), false),
        ("in", Value::from(2), Value::from("1, 2, 3"), true),
        // A one-element comma form still works; a non-string scalar rule
        // value contains nothing.
        ("in", Value::from("red"), Value::from("red"), true),
        ("in", Value::from("red"), Value::from(42), false),
    ];

    for (op, data, rule, expected) in cases {
        assert_eq!(dispatch(op, data.clone(), rule.clone()), Some(expected), "{op} on {data:?} vs {rule:?}");
    }
}

#[test]
fn between_examples() {
    let cases: Vec<(Value, Value, Option<bool>)> = vec![
        (Value::from(25), Value::from(vec![18, 65]), Some(true)),
        (Value::from(18), Value::from(vec![18, 65]), Some(true)),
        (Value::from(65), Value::from(vec![18, 65]), Some(true)),
        (Value::from(17), Value::from(vec![18, 65]), Some(false)),
        (Value::from(20.5), Value::from(vec![18, 65]), Some(true)),
        (march(2), Value::from(vec![Value::from("2024-03-01"), Value::from("2024-03-03")]), Some(true)),
        (march(5), Value::from(vec![Value::from("2024-03-01"), Value::from("2024-03-03")]), Some(false)),
        ("m".into(), Value::from(vec!["a", "z"]), Some(true)),
        // Short or non-list rule values are non-matches, not errors.
        (Value::from(25), Value::from(vec![18]), Some(false)),
        (Value::from(25), Value::List(vec![]), Some(false)),
        (Value::from(25), Value::from(18), Some(false)),
        // Incomparable operands fall through every evaluator.
        (Value::from(vec![1]), Value::from(vec![18, 65]), None),
    ];

    for (data, rule, expected) in cases {
        assert_eq!(dispatch("between", data.clone(), rule.clone()), expected, "between on {data:?} vs {rule:?}");
    }
}

#[test]
fn int_pairs_resolve_before_the_generic_fallback() {
    let op = catalog::find("=").unwrap();
    let data = Value::from(25);
    let rule = Value::from(25);

    // The very first (integer) evaluator already answers.
    assert_eq!(op.evaluators[0](&data, &rule), Some(true));

    // A string/int pair declines every typed evaluator and only the last
    // (generic) one answers.
    let data = Value::from("25");
    let answered: Vec<Option<bool>> = op.evaluators.iter().map(|ev| ev(&data, &rule)).collect();
    let (generic, typed) = answered.split_last().unwrap();
    assert!(typed.iter().all(Option::is_none));
    assert_eq!(*generic, Some(false));
}

#[test]
fn operator_identity_is_by_name() {
    let a = operator! { name: "=", label: "equals", evaluators: [super::comparisons::any_eq] };
    let b = catalog::find("=").unwrap();
    assert_eq!(&a, b);
    assert_ne!(a, *catalog::find("!=").unwrap());
}
