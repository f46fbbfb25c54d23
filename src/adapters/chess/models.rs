//! Request models for the ChessERP API
//!
//! Each query struct is bound to one endpoint and renders its filters as
//! the query pairs the server expects. Booleans go out lower-case and
//! absent filters go out as empty strings.

use super::extractor::Endpoint;
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Filter set bound to one read endpoint
pub trait EndpointQuery {
    const ENDPOINT: Endpoint;

    /// Query pairs, excluding the lot index
    fn params(&self) -> Vec<(String, String)>;

    /// Lot to fetch alone instead of walking every lot
    fn single_lot(&self) -> Option<u32> {
        None
    }
}

fn pair(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn opt_pair<T: ToString>(key: &str, value: Option<T>) -> (String, String) {
    (key.to_string(), value.map(|v| v.to_string()).unwrap_or_default())
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sales vouchers between two dates
#[derive(Debug, Clone, PartialEq)]
pub struct SalesQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// Comma-separated company ids, empty for all
    pub companies: String,
    /// Include detail lines
    pub detailed: bool,
}

impl SalesQuery {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            date_from,
            date_to,
            companies: String::new(),
            detailed: false,
        }
    }

    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn companies(mut self, companies: impl Into<String>) -> Self {
        self.companies = companies.into();
        self
    }
}

impl EndpointQuery for SalesQuery {
    const ENDPOINT: Endpoint = Endpoint::Sales;

    fn params(&self) -> Vec<(String, String)> {
        vec![
            pair("fechaDesde", iso(self.date_from)),
            pair("fechaHasta", iso(self.date_to)),
            pair("empresas", &self.companies),
            pair("detallado", self.detailed),
        ]
    }
}

/// Article master, optionally a single article
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlesQuery {
    pub article: Option<i64>,
    pub voided: bool,
}

impl EndpointQuery for ArticlesQuery {
    const ENDPOINT: Endpoint = Endpoint::Articles;

    fn params(&self) -> Vec<(String, String)> {
        vec![
            opt_pair("articulo", self.article.filter(|id| *id != 0)),
            pair("anulado", self.voided),
        ]
    }
}

/// Customer master
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomersQuery {
    pub voided: bool,
    /// Fetch only this lot
    pub lot: Option<u32>,
}

impl EndpointQuery for CustomersQuery {
    const ENDPOINT: Endpoint = Endpoint::Customers;

    fn params(&self) -> Vec<(String, String)> {
        vec![pair("cliente", 0), pair("anulado", self.voided)]
    }

    fn single_lot(&self) -> Option<u32> {
        self.lot
    }
}

/// Physical stock of one deposit
#[derive(Debug, Clone, PartialEq)]
pub struct StockQuery {
    pub deposit_id: i64,
    /// Stock date; the server uses today when absent
    pub date: Option<NaiveDate>,
    /// Split by freshness; `frescura` is only sent when set
    pub freshness: Option<bool>,
}

impl Default for StockQuery {
    fn default() -> Self {
        Self {
            deposit_id: 1,
            date: None,
            freshness: None,
        }
    }
}

impl EndpointQuery for StockQuery {
    const ENDPOINT: Endpoint = Endpoint::Stock;

    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            pair("idDeposito", self.deposit_id),
            opt_pair("DD-MM-AAAA", self.date.map(|d| d.format("%d-%m-%Y"))),
        ];
        if let Some(freshness) = self.freshness {
            params.push(pair("frescura", freshness));
        }
        params
    }
}

/// Orders by delivery and order date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersQuery {
    pub delivery_date: Option<NaiveDate>,
    pub order_date: Option<NaiveDate>,
    pub invoiced: bool,
}

impl EndpointQuery for OrdersQuery {
    const ENDPOINT: Endpoint = Endpoint::Orders;

    fn params(&self) -> Vec<(String, String)> {
        vec![
            opt_pair("fechaEntrega", self.delivery_date.map(iso)),
            opt_pair("fechaPedido", self.order_date.map(iso)),
            pair("facturado", self.invoiced),
        ]
    }
}

/// Commercial staff, optionally filtered by branch or person
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffQuery {
    pub branch: Option<i64>,
    pub staff: Option<i64>,
}

impl EndpointQuery for StaffQuery {
    const ENDPOINT: Endpoint = Endpoint::Staff;

    fn params(&self) -> Vec<(String, String)> {
        vec![opt_pair("sucursal", self.branch), opt_pair("personal", self.staff)]
    }
}

/// Sales routes of one branch and sales force
#[derive(Debug, Clone, PartialEq)]
pub struct RoutesQuery {
    pub branch: i64,
    pub sales_force: i64,
    pub voided: bool,
}

impl Default for RoutesQuery {
    fn default() -> Self {
        Self {
            branch: 1,
            sales_force: 1,
            voided: false,
        }
    }
}

impl EndpointQuery for RoutesQuery {
    const ENDPOINT: Endpoint = Endpoint::Routes;

    fn params(&self) -> Vec<(String, String)> {
        vec![
            pair("sucursal", self.branch),
            pair("fuerzaventa", self.sales_force),
            pair("anulada", self.voided),
        ]
    }
}

/// Marketing hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketingQuery {
    pub scan_code: Option<String>,
}

impl EndpointQuery for MarketingQuery {
    const ENDPOINT: Endpoint = Endpoint::Marketing;

    fn params(&self) -> Vec<(String, String)> {
        vec![opt_pair("CodScan", self.scan_code.as_deref())]
    }
}

/// Filters of the sales voucher report export
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilter {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub branch: String,
    pub companies: String,
    pub doc_types: String,
    pub article_groupings: String,
}

impl ReportFilter {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            date_from,
            date_to,
            branch: "1".to_string(),
            companies: "1".to_string(),
            doc_types: "DVVTA,FCVTA".to_string(),
            article_groupings: "MARCA,GENERICO,,,,,,,,".to_string(),
        }
    }

    /// JSON body for `reporteComprobantesVta/exportarExcel`
    pub fn to_payload(&self) -> Value {
        json!({
            "dsFiltrosRepCbtsVta": {
                "eFiltros": [{
                    "letra": null,
                    "serie": null,
                    "numero": null,
                    "numeroHasta": null,
                    "fechadesde": iso(self.date_from),
                    "fechahasta": iso(self.date_to),
                    "idsucur": self.branch,
                    "timbrado": "",
                    "empresas": self.companies,
                    "tiposdoc": self.doc_types,
                    "formasagruart": self.article_groupings,
                }]
            },
            "pcTipo": "D"
        })
    }
}
