//! Scalar values carried by bracketed-table text.
//!
//! The format knows exactly two kinds of field: double-quoted strings and bare
//! numbers. [`Value`] models both; numbers are always `f64`.
//!
//! ## Creating Values
//!
//! ```rust
//! use opl_text::Value;
//!
//! let text = Value::from("chicken");
//! let number = Value::from(2.5);
//! let whole = Value::from(3);
//!
//! assert!(text.is_string());
//! assert_eq!(number.as_f64(), Some(2.5));
//! assert_eq!(whole, Value::Number(3.0));
//! ```
//!
//! ## Rendering
//!
//! `Display` writes a value exactly the way it appears inside a row:
//!
//! ```rust
//! use opl_text::Value;
//!
//! assert_eq!(Value::from("he said \"hi\"").to_string(), r#""he said \"hi\"""#);
//! assert_eq!(Value::from(3.0).to_string(), "3");
//! assert_eq!(Value::from(0.25).to_string(), "0.25");
//! ```
//!
//! ## Equality and Hashing
//!
//! Values key the rows of keyed tables, so `Value` is `Eq + Hash`. Two numbers
//! are equal when their floats compare equal, except that every NaN equals every
//! other NaN. `0.0` and `-0.0` are therefore the same key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single field value: a string or a floating-point number.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Number(f64),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::Value;
    ///
    /// assert_eq!(Value::from("milk").as_str(), Some("milk"));
    /// assert_eq!(Value::from(1).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// If the value is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(_) => None,
        }
    }

    /// Returns `true` if this value can be written as a field token.
    ///
    /// The only escape the format knows is `\"`, so a string ending in a
    /// backslash would swallow its own closing quote.
    #[inline]
    #[must_use]
    pub fn is_representable(&self) -> bool {
        match self {
            Value::String(s) => !s.ends_with('\\'),
            Value::Number(_) => true,
        }
    }

    fn canonical_bits(n: f64) -> u64 {
        if n == 0.0 {
            0
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Value::Number(n) => {
                1u8.hash(state);
                Value::canonical_bits(*n).hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a number")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n),
            Value::String(s) => Err(crate::Error::Message(format!(
                "expected number, found string {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Err(crate::Error::Message(format!(
                "expected string, found number {}",
                n
            ))),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}
