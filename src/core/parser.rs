//! Resilient per-item validation
//!
//! Raw items are validated one by one against a typed schema. A record that
//! fails is set aside with its index, raw payload and error; the rest of the
//! batch is unaffected.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Item that failed schema validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    /// Position in the concatenated input list
    pub index: usize,
    /// Raw payload as received
    pub raw: Value,
    /// Validation error description
    pub error: String,
}

/// Validated entities plus the items that were discarded
#[derive(Debug, Clone)]
pub struct ParseReport<T> {
    pub successes: Vec<T>,
    pub failures: Vec<ParseFailure>,
}

impl<T> ParseReport<T> {
    pub fn empty() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of items examined
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Drops the diagnostics and keeps the validated entities
    pub fn into_entities(self) -> Vec<T> {
        self.successes
    }
}

impl<T> Default for ParseReport<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Validates every item of a raw list against `T`
///
/// A non-list input is logged and yields an empty report. Successes keep
/// their relative input order.
///
/// # Examples
///
/// ```
/// use chess_erp::core::parser::parse_list;
/// use chess_erp::domain::Staff;
/// use serde_json::json;
///
/// let raw = json!([
///     {"idSucursal": 1, "idPersonal": 7, "desPersonal": "GOMEZ"},
///     {"idSucursal": 1}
/// ]);
/// let report = parse_list::<Staff>(&raw, "staff");
/// assert_eq!(report.successes.len(), 1);
/// assert_eq!(report.failures[0].index, 1);
/// ```
pub fn parse_list<T: DeserializeOwned>(raw: &Value, entity_name: &str) -> ParseReport<T> {
    let Some(items) = raw.as_array() else {
        tracing::warn!(entity = entity_name, "Expected a list of items, nothing parsed");
        return ParseReport::empty();
    };
    parse_items(items, entity_name)
}

/// Same as [`parse_list`] over an already split item slice
pub fn parse_items<T: DeserializeOwned>(items: &[Value], entity_name: &str) -> ParseReport<T> {
    let mut report = ParseReport::empty();

    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(entity) => report.successes.push(entity),
            Err(e) => {
                tracing::warn!(
                    entity = entity_name,
                    index = index,
                    error = %e,
                    raw = %item,
                    "Discarding item that failed validation"
                );
                report.failures.push(ParseFailure {
                    index,
                    raw: item.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if report.has_failures() {
        tracing::warn!(
            entity = entity_name,
            parsed = report.successes.len(),
            failed = report.failures.len(),
            "Parsed with failures"
        );
    } else {
        tracing::debug!(entity = entity_name, parsed = report.successes.len(), "Parsed all items");
    }

    report
}
