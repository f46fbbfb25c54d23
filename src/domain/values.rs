//! Loosely-typed wire values
//!
//! The ChessERP API sends several identifiers and amounts either as JSON
//! numbers or as strings, sometimes for the same field across records.
//! These unions make that explicit and normalize at the parsing boundary:
//! a string holding a canonical integer becomes [`IntOrText::Int`], so
//! downstream code never has to compare `"1842"` with `1842`. Strings that
//! would change when printed back (`"0001"`, `"+5"`) stay text.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field the server sends as either an integer or text
///
/// # Examples
///
/// ```
/// use chess_erp::domain::values::IntOrText;
///
/// let postal: IntOrText = serde_json::from_str("\"1842\"").unwrap();
/// assert_eq!(postal, IntOrText::Int(1842));
///
/// let series: IntOrText = serde_json::from_str("\"0001\"").unwrap();
/// assert_eq!(series.as_text(), Some("0001"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum IntOrText {
    /// Integer value, including integer strings after normalization
    Int(i64),
    /// Anything else
    Text(String),
}

impl IntOrText {
    /// Normalizes a textual value, turning integer strings into `Int`
    ///
    /// Only strings that print back unchanged are converted, so leading
    /// zeros and explicit signs survive.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        match trimmed.parse::<i64>() {
            Ok(value) if value.to_string() == trimmed => IntOrText::Int(value),
            _ => IntOrText::Text(text),
        }
    }

    /// Returns the integer value, if any
    pub fn as_int(&self) -> Option<i64> {
        match self {
            IntOrText::Int(v) => Some(*v),
            IntOrText::Text(_) => None,
        }
    }

    /// Returns the text value, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IntOrText::Int(_) => None,
            IntOrText::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for IntOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOrText::Int(v) => write!(f, "{v}"),
            IntOrText::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for IntOrText {
    fn from(value: i64) -> Self {
        IntOrText::Int(value)
    }
}

impl From<&str> for IntOrText {
    fn from(value: &str) -> Self {
        IntOrText::from_text(value)
    }
}

struct IntOrTextVisitor;

impl<'de> Visitor<'de> for IntOrTextVisitor {
    type Value = IntOrText;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(IntOrText::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(IntOrText::Int)
            .map_err(|_| E::custom(format!("integer {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(IntOrText::Int(v as i64))
        } else {
            Err(E::invalid_type(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(IntOrText::from_text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(IntOrText::from_text(v))
    }
}

impl<'de> Deserialize<'de> for IntOrText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IntOrTextVisitor)
    }
}

/// A monetary or quantity field sent as either a number or text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumberOrText {
    /// Numeric value, including numeric strings after normalization
    Number(f64),
    /// Anything else
    Text(String),
}

impl NumberOrText {
    /// Normalizes a textual value, turning numeric strings into `Number`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => NumberOrText::Number(value),
            _ => NumberOrText::Text(text),
        }
    }

    /// Returns the numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(v) => Some(*v),
            NumberOrText::Text(_) => None,
        }
    }
}

struct NumberOrTextVisitor;

impl<'de> Visitor<'de> for NumberOrTextVisitor {
    type Value = NumberOrText;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(NumberOrText::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(NumberOrText::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(NumberOrText::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(NumberOrText::from_text(v))
    }
}

impl<'de> Deserialize<'de> for NumberOrText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberOrTextVisitor)
    }
}

/// Deserializes an optional integer that the server may send as `""`
///
/// Use with `#[serde(default, deserialize_with = "lenient_int")]`.
/// Empty or blank strings and `null` map to `None`; integer strings are parsed.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientIntVisitor;

    impl<'de> Visitor<'de> for LenientIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, an integer string, an empty string or null")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::custom(format!("integer {v} out of range")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_option(LenientIntVisitor)
}
