//! Endpoint table and envelope extraction
//!
//! Every ChessERP read endpoint wraps its items differently: two levels deep
//! under vendor-specific keys, one level deep, or as a bare list. Paginated
//! ones add a free-text lot counter at the envelope root. The table below is
//! the only place that knows those shapes.

use crate::domain::ChessError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Read endpoints exposed by the ChessERP API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Sales,
    Articles,
    Customers,
    Stock,
    Orders,
    Staff,
    Routes,
    Marketing,
}

impl Endpoint {
    /// All endpoints, in export order
    pub const ALL: [Endpoint; 8] = [
        Endpoint::Sales,
        Endpoint::Articles,
        Endpoint::Customers,
        Endpoint::Stock,
        Endpoint::Orders,
        Endpoint::Staff,
        Endpoint::Routes,
        Endpoint::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Sales => "sales",
            Endpoint::Articles => "articles",
            Endpoint::Customers => "customers",
            Endpoint::Stock => "stock",
            Endpoint::Orders => "orders",
            Endpoint::Staff => "staff",
            Endpoint::Routes => "routes",
            Endpoint::Marketing => "marketing",
        }
    }

    /// Path relative to the API base, with trailing slash
    pub fn path(&self) -> &'static str {
        self.definition().path
    }

    /// Query parameter carrying the 1-based lot index, for paginated endpoints
    pub fn lot_param(&self) -> Option<&'static str> {
        self.definition().lot_param
    }

    /// Envelope extractor for this endpoint
    pub fn extractor(&self) -> &'static dyn ResponseExtractor {
        &self.definition().extractor
    }

    fn definition(&self) -> &'static EndpointDef {
        match self {
            Endpoint::Sales => &SALES,
            Endpoint::Articles => &ARTICLES,
            Endpoint::Customers => &CUSTOMERS,
            Endpoint::Stock => &STOCK,
            Endpoint::Orders => &ORDERS,
            Endpoint::Staff => &STAFF,
            Endpoint::Routes => &ROUTES,
            Endpoint::Marketing => &MARKETING,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ChessError::Configuration(format!(
                    "Unknown endpoint '{s}'. Expected one of: {}",
                    Endpoint::ALL.map(|e| e.as_str()).join(", ")
                ))
            })
    }
}

/// Items and lot counter text split out of one response envelope
#[derive(Debug, Clone, PartialEq)]
pub struct LotEnvelope {
    /// Item list; not necessarily an array when the envelope was unexpected
    pub items: Value,
    /// Free-text counter such as `"1/70. Total: 6912"`
    pub counter_text: Option<String>,
}

impl LotEnvelope {
    /// Number of items, zero when `items` is not an array
    pub fn len(&self) -> usize {
        self.items.as_array().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_items(self) -> Value {
        self.items
    }
}

/// Splits a raw response envelope into items and lot counter
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, envelope: Value) -> LotEnvelope;

    /// Whether this endpoint reports a lot counter
    fn has_counter(&self) -> bool;
}

/// Extractor that follows a fixed key path to the items
#[derive(Debug)]
pub struct PathExtractor {
    /// Keys from the envelope root down to the item list
    pub items_path: &'static [&'static str],
    /// Key holding the counter text, read at the envelope root and, failing
    /// that, next to the item list
    pub counter_key: Option<&'static str>,
    /// Accept a bare top-level list as the items
    pub bare_list: bool,
}

impl ResponseExtractor for PathExtractor {
    fn extract(&self, envelope: Value) -> LotEnvelope {
        if self.bare_list && envelope.is_array() {
            return LotEnvelope {
                items: envelope,
                counter_text: None,
            };
        }

        let mut counter_text = self
            .counter_key
            .and_then(|k| envelope.get(k))
            .and_then(counter_to_text);

        let mut current = envelope;
        for (depth, key) in self.items_path.iter().enumerate() {
            let Value::Object(mut map) = current else {
                return LotEnvelope {
                    items: Value::Null,
                    counter_text,
                };
            };
            if counter_text.is_none() && depth + 1 == self.items_path.len() {
                counter_text = self
                    .counter_key
                    .and_then(|k| map.get(k))
                    .and_then(counter_to_text);
            }
            current = map.remove(*key).unwrap_or(Value::Null);
        }

        LotEnvelope {
            items: current,
            counter_text,
        }
    }

    fn has_counter(&self) -> bool {
        self.counter_key.is_some()
    }
}

fn counter_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

struct EndpointDef {
    path: &'static str,
    lot_param: Option<&'static str>,
    extractor: PathExtractor,
}

static SALES: EndpointDef = EndpointDef {
    path: "ventas/",
    lot_param: Some("nroLote"),
    extractor: PathExtractor {
        items_path: &["dsReporteComprobantesApi", "VentasResumen"],
        counter_key: Some("cantComprobantesVentas"),
        bare_list: false,
    },
};

static ARTICLES: EndpointDef = EndpointDef {
    path: "articulos/",
    lot_param: Some("nroLote"),
    extractor: PathExtractor {
        items_path: &["Articulos", "eArticulos"],
        counter_key: Some("cantArticulos"),
        bare_list: false,
    },
};

static CUSTOMERS: EndpointDef = EndpointDef {
    path: "clientes/",
    lot_param: Some("nroLote"),
    extractor: PathExtractor {
        items_path: &["Clientes", "eClientes"],
        counter_key: Some("cantClientes"),
        bare_list: false,
    },
};

static STOCK: EndpointDef = EndpointDef {
    path: "stock/",
    lot_param: None,
    extractor: PathExtractor {
        items_path: &["dsStockFisicoApi", "dsStock"],
        counter_key: None,
        bare_list: false,
    },
};

static ORDERS: EndpointDef = EndpointDef {
    path: "pedidos/",
    lot_param: None,
    extractor: PathExtractor {
        items_path: &["pedidos"],
        counter_key: None,
        bare_list: true,
    },
};

static STAFF: EndpointDef = EndpointDef {
    path: "personalComercial/",
    lot_param: None,
    extractor: PathExtractor {
        items_path: &["PersonalComercial", "ePersCom"],
        counter_key: None,
        bare_list: true,
    },
};

static ROUTES: EndpointDef = EndpointDef {
    path: "rutasVenta/",
    lot_param: None,
    extractor: PathExtractor {
        items_path: &["RutasVenta", "eRutasVenta"],
        counter_key: None,
        bare_list: false,
    },
};

static MARKETING: EndpointDef = EndpointDef {
    path: "jerarquiaMkt/",
    lot_param: None,
    extractor: PathExtractor {
        items_path: &["SubcanalesMkt", "SegmentosMkt"],
        counter_key: None,
        bare_list: false,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("sales", Endpoint::Sales)]
    #[test_case("Customers", Endpoint::Customers)]
    #[test_case(" marketing ", Endpoint::Marketing)]
    fn test_endpoint_from_str(input: &str, expected: Endpoint) {
        assert_eq!(input.parse::<Endpoint>().unwrap(), expected);
    }

    #[test]
    fn test_endpoint_from_str_unknown() {
        let err = "invoices".parse::<Endpoint>().unwrap_err();
        assert!(err.to_string().contains("Unknown endpoint 'invoices'"));
    }

    #[test]
    fn test_paginated_endpoints() {
        let paginated: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|e| e.lot_param().is_some())
            .collect();
        assert_eq!(
            paginated,
            vec![Endpoint::Sales, Endpoint::Articles, Endpoint::Customers]
        );
    }

    #[test]
    fn test_extract_sales_envelope() {
        let envelope = json!({
            "dsReporteComprobantesApi": {
                "VentasResumen": [{"a": 1}, {"a": 2}]
            },
            "cantComprobantesVentas": "Numero de lote obtenido: 1/70. Total: 6912"
        });
        let lot = Endpoint::Sales.extractor().extract(envelope);
        assert_eq!(lot.len(), 2);
        assert_eq!(
            lot.counter_text.as_deref(),
            Some("Numero de lote obtenido: 1/70. Total: 6912")
        );
    }

    #[test]
    fn test_extract_root_counter_for_articles_and_customers() {
        let articles = Endpoint::Articles.extractor().extract(json!({
            "Articulos": {"eArticulos": [{"a": 1}]},
            "cantArticulos": "2/5"
        }));
        assert_eq!(articles.counter_text.as_deref(), Some("2/5"));

        let customers = Endpoint::Customers.extractor().extract(json!({
            "Clientes": {"eClientes": []},
            "cantClientes": "1/9"
        }));
        assert!(customers.is_empty());
        assert_eq!(customers.counter_text.as_deref(), Some("1/9"));
    }

    #[test]
    fn test_extract_counter_next_to_items() {
        let envelope = json!({
            "dsReporteComprobantesApi": {
                "VentasResumen": [{"a": 1}],
                "cantComprobantesVentas": "1/3"
            }
        });
        let lot = Endpoint::Sales.extractor().extract(envelope);
        assert_eq!(lot.counter_text.as_deref(), Some("1/3"));
    }

    #[test]
    fn test_extract_missing_counter() {
        let envelope = json!({"Clientes": {"eClientes": [{"a": 1}]}});
        let lot = Endpoint::Customers.extractor().extract(envelope);
        assert_eq!(lot.len(), 1);
        assert_eq!(lot.counter_text, None);
    }

    #[test]
    fn test_extract_bare_list() {
        let lot = Endpoint::Orders.extractor().extract(json!([{"a": 1}, {"b": 2}]));
        assert_eq!(lot.len(), 2);

        let wrapped = Endpoint::Orders
            .extractor()
            .extract(json!({"pedidos": [{"a": 1}]}));
        assert_eq!(wrapped.len(), 1);
    }

    #[test]
    fn test_extract_unexpected_shape_yields_null() {
        let lot = Endpoint::Stock.extractor().extract(json!({"error": "x"}));
        assert_eq!(lot.items, Value::Null);
        assert!(lot.is_empty());

        let lot = Endpoint::Routes.extractor().extract(json!("text"));
        assert_eq!(lot.items, Value::Null);
    }

    #[test]
    fn test_numeric_counter_is_stringified() {
        let envelope = json!({"Articulos": {"eArticulos": [], "cantArticulos": 3}});
        let lot = Endpoint::Articles.extractor().extract(envelope);
        assert_eq!(lot.counter_text.as_deref(), Some("3"));
    }
}
