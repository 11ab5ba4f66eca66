//! Tagged runtime values.
//!
//! Rule operands and record values are dynamically typed on the wire (JSON)
//! but evaluation needs to know *which* typed comparison applies. `Value`
//! closes the type universe with an explicit kind tag, so operator dispatch
//! can check applicability instead of trying a comparison and catching its
//! failure.
//!
//! ## JSON mapping
//!
//! - JSON numbers split into [`Value::Int`] (fits `i64`) and [`Value::Float`].
//! - JSON strings in the strict wire form `YYYY-MM-DDTHH:MM:SS[.frac]`
//!   deserialize as [`Value::DateTime`]; all other strings stay
//!   [`Value::Str`]. A `DateTime` serializes back to exactly that form, so
//!   round-trips are stable.
//! - Arrays, booleans and `null` map structurally.
//!
//! Looser datetime forms (date-only, space-separated) are *not* sniffed on
//! the wire; the datetime comparisons coerce them at evaluation time via
//! [`Value::as_datetime`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Strict wire format for datetime values. `%.f` prints nothing when the
/// fractional part is zero, so whole seconds stay compact.
pub(crate) const WIRE_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A dynamically typed operand: either a rule's comparison value or a value
/// resolved from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
}

/// Kind tag of a [`Value`], used in dispatch-failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    DateTime,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::List => "list",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Exact integer view. No coercion from floats or strings.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view: floats as-is, integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Datetime view with string coercion: accepts `DateTime` values and
    /// strings in ISO datetime form (`T` or space separated) or plain
    /// `YYYY-MM-DD` form (midnight).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Str(s) => parse_datetime_lenient(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Canonical, injective string encoding used for cache keys.
    ///
    /// Strings and lists are length-prefixed so no two distinct values share
    /// an encoding; floats encode their raw bits (same trick as hashing an
    /// `f64` by `to_bits`).
    pub(crate) fn canonical(&self) -> String {
        match self {
            Value::Null => "n".to_string(),
            Value::Bool(b) => format!("b:{b}"),
            Value::Int(i) => format!("i:{i}"),
            Value::Float(f) => format!("f:{:016x}", f.to_bits()),
            Value::Str(s) => format!("s:{}:{}", s.len(), s),
            Value::DateTime(dt) => format!("d:{}", dt.format(WIRE_DATETIME)),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::canonical).collect();
                format!("l:{}:[{}]", items.len(), inner.join(","))
            }
        }
    }
}

/// Display is the "stringify" used by the generic fallback comparisons
/// (`contains`, `startsWith`, `in`, ...): scalars render bare, `Null` renders
/// empty, lists render bracketed.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(WIRE_DATETIME)),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Strict wire-form parse. Used by deserialization sniffing; must accept
/// exactly what `Value::DateTime` serialization emits.
pub(crate) fn parse_wire_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, WIRE_DATETIME).ok()
}

/// Lenient parse for evaluation-time coercion.
fn parse_datetime_lenient(s: &str) -> Option<NaiveDateTime> {
    parse_wire_datetime(s)
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

// --- Conversions -------------------------------------------------------------

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        // Midnight; NaiveDate::and_hms_opt(0,0,0) cannot fail.
        Value::DateTime(v.and_hms_opt(0, 0, 0).unwrap_or_default())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

// --- Serde -------------------------------------------------------------------

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.serialize_str(&dt.format(WIRE_DATETIME).to_string()),
            Value::List(items) => serializer.collect_seq(items),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("null, a boolean, a number, a string, or an array")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                if let Ok(i) = i64::try_from(v) { Ok(Value::Int(i)) } else { Ok(Value::Float(v as f64)) }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                match parse_wire_datetime(v) {
                    Some(dt) => Ok(Value::DateTime(dt)),
                    None => Ok(Value::Str(v.to_string())),
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
