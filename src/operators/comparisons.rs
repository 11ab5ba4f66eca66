//! Typed comparison functions used by the built-in catalog.
//!
//! Every function has the evaluator shape `fn(&Value, &Value) ->
//! Option<bool>` with the *data* value (from the record) first and the
//! *rule* value second. `None` always means "wrong operand kinds, skip me";
//! a definite non-match is `Some(false)`.
//!
//! Two deliberate carve-outs keep evaluation total where the wire format
//! allows sloppy input:
//!
//! - `str_matches`/`any_matches`: an invalid regex pattern is a non-match
//!   (`Some(false)`), not an error.
//! - `between_any`: a rule value that is not a list of at least two elements
//!   is a non-match, not an error.

use std::cmp::Ordering;

use regex::Regex;

use crate::value::Value;

// --- Kind-aware helpers -------------------------------------------------------

fn int_cmp(data: &Value, rule: &Value) -> Option<Ordering> {
    Some(data.as_int()?.cmp(&rule.as_int()?))
}

/// Numeric comparison with int-to-float widening. Runs after `int_cmp` in
/// catalog order, so pure-int pairs never reach it.
fn float_cmp(data: &Value, rule: &Value) -> Option<Ordering> {
    data.as_f64()?.partial_cmp(&rule.as_f64()?)
}

fn str_cmp(data: &Value, rule: &Value) -> Option<Ordering> {
    Some(data.as_str()?.cmp(rule.as_str()?))
}

fn datetime_cmp(data: &Value, rule: &Value) -> Option<Ordering> {
    Some(data.as_datetime()?.cmp(&rule.as_datetime()?))
}

/// Generic ordering over whatever runtime kinds still support one: numbers
/// (cross-kind), strings, booleans, datetime-coercible values. Anything else
/// is incomparable and falls through.
fn any_cmp(data: &Value, rule: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (data.as_f64(), rule.as_f64()) {
        return a.partial_cmp(&b);
    }
    if let (Some(a), Some(b)) = (data.as_str(), rule.as_str()) {
        return Some(a.cmp(b));
    }
    if let (Some(a), Some(b)) = (data.as_bool(), rule.as_bool()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (data.as_datetime(), rule.as_datetime()) {
        return Some(a.cmp(&b));
    }
    None
}

/// Loose equality used by the generic fallbacks and by `in` containment:
/// numeric values compare across int/float, everything else by value.
fn loose_eq(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x == y;
    }
    a == b
}

// --- Equality -----------------------------------------------------------------

pub fn int_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_int()? == rule.as_int()?)
}

pub fn float_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_f64()? == rule.as_f64()?)
}

pub fn str_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_str()? == rule.as_str()?)
}

/// Same-instant comparison; coerces ISO strings on either side.
pub fn datetime_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_datetime()? == rule.as_datetime()?)
}

pub fn bool_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_bool()? == rule.as_bool()?)
}

/// Generic equality fallback; always applicable. Mismatched kinds (say the
/// string `"25"` against the int `25`) compare unequal.
pub fn any_eq(data: &Value, rule: &Value) -> Option<bool> {
    Some(loose_eq(data, rule))
}

pub fn int_ne(data: &Value, rule: &Value) -> Option<bool> {
    int_eq(data, rule).map(|b| !b)
}

pub fn float_ne(data: &Value, rule: &Value) -> Option<bool> {
    float_eq(data, rule).map(|b| !b)
}

pub fn str_ne(data: &Value, rule: &Value) -> Option<bool> {
    str_eq(data, rule).map(|b| !b)
}

pub fn datetime_ne(data: &Value, rule: &Value) -> Option<bool> {
    datetime_eq(data, rule).map(|b| !b)
}

pub fn bool_ne(data: &Value, rule: &Value) -> Option<bool> {
    bool_eq(data, rule).map(|b| !b)
}

pub fn any_ne(data: &Value, rule: &Value) -> Option<bool> {
    any_eq(data, rule).map(|b| !b)
}

// --- Ordering -----------------------------------------------------------------

pub fn int_gt(data: &Value, rule: &Value) -> Option<bool> {
    int_cmp(data, rule).map(|o| o == Ordering::Greater)
}

pub fn float_gt(data: &Value, rule: &Value) -> Option<bool> {
    float_cmp(data, rule).map(|o| o == Ordering::Greater)
}

pub fn str_gt(data: &Value, rule: &Value) -> Option<bool> {
    str_cmp(data, rule).map(|o| o == Ordering::Greater)
}

pub fn datetime_gt(data: &Value, rule: &Value) -> Option<bool> {
    datetime_cmp(data, rule).map(|o| o == Ordering::Greater)
}

pub fn any_gt(data: &Value, rule: &Value) -> Option<bool> {
    any_cmp(data, rule).map(|o| o == Ordering::Greater)
}

pub fn int_lt(data: &Value, rule: &Value) -> Option<bool> {
    int_cmp(data, rule).map(|o| o == Ordering::Less)
}

pub fn float_lt(data: &Value, rule: &Value) -> Option<bool> {
    float_cmp(data, rule).map(|o| o == Ordering::Less)
}

pub fn str_lt(data: &Value, rule: &Value) -> Option<bool> {
    str_cmp(data, rule).map(|o| o == Ordering::Less)
}

pub fn datetime_lt(data: &Value, rule: &Value) -> Option<bool> {
    datetime_cmp(data, rule).map(|o| o == Ordering::Less)
}

pub fn any_lt(data: &Value, rule: &Value) -> Option<bool> {
    any_cmp(data, rule).map(|o| o == Ordering::Less)
}

pub fn int_ge(data: &Value, rule: &Value) -> Option<bool> {
    int_cmp(data, rule).map(|o| o != Ordering::Less)
}

pub fn float_ge(data: &Value, rule: &Value) -> Option<bool> {
    float_cmp(data, rule).map(|o| o != Ordering::Less)
}

pub fn str_ge(data: &Value, rule: &Value) -> Option<bool> {
    str_cmp(data, rule).map(|o| o != Ordering::Less)
}

pub fn datetime_ge(data: &Value, rule: &Value) -> Option<bool> {
    datetime_cmp(data, rule).map(|o| o != Ordering::Less)
}

pub fn any_ge(data: &Value, rule: &Value) -> Option<bool> {
    any_cmp(data, rule).map(|o| o != Ordering::Less)
}

pub fn int_le(data: &Value, rule: &Value) -> Option<bool> {
    int_cmp(data, rule).map(|o| o != Ordering::Greater)
}

pub fn float_le(data: &Value, rule: &Value) -> Option<bool> {
    float_cmp(data, rule).map(|o| o != Ordering::Greater)
}

pub fn str_le(data: &Value, rule: &Value) -> Option<bool> {
    str_cmp(data, rule).map(|o| o != Ordering::Greater)
}

pub fn datetime_le(data: &Value, rule: &Value) -> Option<bool> {
    datetime_cmp(data, rule).map(|o| o != Ordering::Greater)
}

pub fn any_le(data: &Value, rule: &Value) -> Option<bool> {
    any_cmp(data, rule).map(|o| o != Ordering::Greater)
}

// --- Substring family ---------------------------------------------------------

pub fn str_contains(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_str()?.to_lowercase().contains(&rule.as_str()?.to_lowercase()))
}

/// Stringify-both-sides fallback; always applicable.
pub fn any_contains(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.to_string().to_lowercase().contains(&rule.to_string().to_lowercase()))
}

pub fn str_starts_with(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_str()?.to_lowercase().starts_with(&rule.as_str()?.to_lowercase()))
}

pub fn any_starts_with(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.to_string().to_lowercase().starts_with(&rule.to_string().to_lowercase()))
}

pub fn str_ends_with(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.as_str()?.to_lowercase().ends_with(&rule.as_str()?.to_lowercase()))
}

pub fn any_ends_with(data: &Value, rule: &Value) -> Option<bool> {
    Some(data.to_string().to_lowercase().ends_with(&rule.to_string().to_lowercase()))
}

// --- Regex --------------------------------------------------------------------

/// Match the data string against the pattern in the rule value. An invalid
/// pattern yields a non-match, not an error.
pub fn str_matches(data: &Value, rule: &Value) -> Option<bool> {
    let text = data.as_str()?;
    let pattern = rule.as_str()?;
    Some(match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    })
}

pub fn any_matches(data: &Value, rule: &Value) -> Option<bool> {
    let text = data.to_string();
    Some(match Regex::new(&rule.to_string()) {
        Ok(re) => re.is_match(&text),
        Err(_) => false,
    })
}

// --- Membership ---------------------------------------------------------------

/// Set membership. A list rule value tests direct containment; a string rule
/// value is split on commas, trimmed, and tested against the stringified
/// data value. Other rule kinds never contain anything.
pub fn in_set(data: &Value, rule: &Value) -> Option<bool> {
    Some(match rule {
        Value::List(items) => items.iter().any(|item| loose_eq(data, item)),
        Value::Str(s) => {
            let needle = data.to_string();
            s.split(',').any(|part| part.trim() == needle)
        }
        _ => false,
    })
}

pub fn not_in_set(data: &Value, rule: &Value) -> Option<bool> {
    in_set(data, rule).map(|b| !b)
}

// --- Range --------------------------------------------------------------------

fn bounds(rule: &Value) -> Option<(&Value, &Value)> {
    let items = rule.as_list()?;
    match items {
        [low, high, ..] => Some((low, high)),
        _ => None,
    }
}

pub fn between_int(data: &Value, rule: &Value) -> Option<bool> {
    let (low, high) = bounds(rule)?;
    let v = data.as_int()?;
    Some(low.as_int()? <= v && v <= high.as_int()?)
}

pub fn between_float(data: &Value, rule: &Value) -> Option<bool> {
    let (low, high) = bounds(rule)?;
    let v = data.as_f64()?;
    Some(low.as_f64()? <= v && v <= high.as_f64()?)
}

/// Inclusive on both ends.
pub fn between_datetime(data: &Value, rule: &Value) -> Option<bool> {
    let (low, high) = bounds(rule)?;
    let v = data.as_datetime()?;
    Some(low.as_datetime()? <= v && v <= high.as_datetime()?)
}

/// Generic range fallback. A rule value without two elements fails its
/// length check and is a non-match; bounds the data value cannot be ordered
/// against fall through to the next (nonexistent) evaluator.
pub fn between_any(data: &Value, rule: &Value) -> Option<bool> {
    let Some((low, high)) = bounds(rule) else {
        return Some(false);
    };
    let ge_low = any_cmp(data, low)? != Ordering::Less;
    let le_high = any_cmp(data, high)? != Ordering::Greater;
    Some(ge_low && le_high)
}
