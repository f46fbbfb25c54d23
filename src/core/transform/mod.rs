//! Record shaping for export
//!
//! Validated entities are written either as they came (nested children kept
//! as JSON values) or denormalized into flat parent×child rows.
//!
//! - **Nested**: one row per entity, child collections left as JSON
//! - **Flat**: one row per leaf combination, see [`flatten`]

pub mod flatten;

pub use flatten::{FlatRow, Flatten};

use crate::domain::{ChessError, Result};
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// Row shape of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Keep nested collections as JSON values
    Nested,
    /// Denormalize into parent×child rows
    Flat,
}

impl FromStr for RecordShape {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nested" | "raw" => Ok(Self::Nested),
            "flat" | "flatten" | "flattened" => Ok(Self::Flat),
            _ => Err(ChessError::Configuration(format!(
                "Invalid record shape: {s}. Expected 'nested' or 'flat'"
            ))),
        }
    }
}

impl From<bool> for RecordShape {
    fn from(flatten: bool) -> Self {
        if flatten {
            Self::Flat
        } else {
            Self::Nested
        }
    }
}

/// Shapes validated entities into rows
///
/// # Examples
///
/// ```
/// use chess_erp::core::transform::{to_rows, RecordShape};
/// use chess_erp::domain::StockRecord;
///
/// # fn example() -> chess_erp::domain::Result<()> {
/// let stock: Vec<StockRecord> = serde_json::from_str(
///     r#"[{"idDeposito": 1, "idArticulo": 7, "cantBultos": 2, "cantUnidades": 0}]"#,
/// )?;
/// let rows = to_rows(&stock, RecordShape::Flat)?;
/// assert_eq!(rows.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn to_rows<T: Flatten + Serialize>(records: &[T], shape: RecordShape) -> Result<Vec<FlatRow>> {
    match shape {
        RecordShape::Flat => T::flatten(records),
        RecordShape::Nested => records
            .iter()
            .map(|r| flatten::entity_columns(r, "", &[]))
            .collect(),
    }
}

/// Rows for unvalidated items: objects keep their keys, anything else
/// lands in a single `value` column
pub fn raw_rows(items: &[Value]) -> Vec<FlatRow> {
    items
        .iter()
        .map(|item| {
            let mut row = FlatRow::new();
            match item {
                Value::Object(map) => {
                    for (key, value) in map {
                        row.push(key.clone(), value.clone());
                    }
                }
                other => row.push("value", other.clone()),
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Order;
    use serde_json::json;

    fn orders() -> Vec<Order> {
        serde_json::from_value(json!([{
            "idPedido": "NXB-1",
            "origen": "WEB",
            "idUsuario": "ANA",
            "idEmpresa": 1,
            "idSucursal": 1,
            "idCliente": 9,
            "líneas del pedido": [
                {"idLineaDetalle": 1, "idArticulo": 100},
                {"idLineaDetalle": 2, "idArticulo": 101}
            ]
        }]))
        .unwrap()
    }

    #[test]
    fn test_record_shape_from_str() {
        assert_eq!(RecordShape::from_str("flat").unwrap(), RecordShape::Flat);
        assert_eq!(RecordShape::from_str("NESTED").unwrap(), RecordShape::Nested);
        assert!(RecordShape::from_str("tree").is_err());
        assert_eq!(RecordShape::from(true), RecordShape::Flat);
    }

    #[test]
    fn test_to_rows_flat_vs_nested() {
        let orders = orders();
        let flat = to_rows(&orders, RecordShape::Flat).unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1].get("linea_idArticulo"), Some(&json!(101)));

        let nested = to_rows(&orders, RecordShape::Nested).unwrap();
        assert_eq!(nested.len(), 1);
        assert!(nested[0].get("líneas del pedido").unwrap().is_array());
    }

    #[test]
    fn test_raw_rows() {
        let rows = raw_rows(&[json!({"a": 1, "b": "x"}), json!(5)]);
        assert_eq!(rows[0].get("b"), Some(&json!("x")));
        assert_eq!(rows[1].get("value"), Some(&json!(5)));
    }
}
