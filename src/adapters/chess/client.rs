//! ChessERP client facade
//!
//! One [`ChessClient`] per ERP instance. It owns the session and the lot
//! fetcher, and exposes a raw and a validated accessor per domain.

use super::extractor::Endpoint;
use super::models::{
    ArticlesQuery, CustomersQuery, EndpointQuery, MarketingQuery, OrdersQuery, ReportFilter,
    RoutesQuery, SalesQuery, StaffQuery, StockQuery,
};
use super::session::SessionManager;
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::config::{InstanceConfig, PaginationConfig};
use crate::core::batch::BatchFetcher;
use crate::core::parser::{parse_items, ParseReport};
use crate::domain::{
    Article, ChessError, Customer, MarketingSegment, Order, Result, Route, Sale, Staff,
    StockRecord,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Client for one ChessERP instance
///
/// # Example
///
/// ```no_run
/// use chess_erp::adapters::chess::{ChessClient, SalesQuery};
/// use chess_erp::config::{InstanceConfig, PaginationConfig};
/// use chrono::NaiveDate;
///
/// # async fn example() -> chess_erp::domain::Result<()> {
/// let instance = InstanceConfig::from_env("CHESS_S_")?;
/// let mut client = ChessClient::new(instance, &PaginationConfig::default())?;
///
/// let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let report = client.sales(&SalesQuery::new(from, to)).await?;
/// println!("{} sales, {} discarded", report.successes.len(), report.failures.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChessClient {
    fetcher: BatchFetcher,
}

impl ChessClient {
    /// Creates a client over a `reqwest` transport using the instance timeout
    pub fn new(instance: InstanceConfig, pagination: &PaginationConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(instance.timeout_seconds))?;
        Ok(Self::with_transport(instance, pagination, Arc::new(transport)))
    }

    /// Creates a client over any transport
    pub fn with_transport(
        instance: InstanceConfig,
        pagination: &PaginationConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let session = SessionManager::new(instance, transport);
        let fetcher = BatchFetcher::new(session, pagination.strip_total_separators.iter().copied());
        Self { fetcher }
    }

    /// Creates a client from `{prefix}API_URL`, `{prefix}USERNAME` and `{prefix}PASSWORD`
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::new(InstanceConfig::from_env(prefix)?, &PaginationConfig::default())
    }

    pub fn instance(&self) -> &InstanceConfig {
        self.fetcher.session().instance()
    }

    /// Logs in eagerly; data calls log in on demand otherwise
    pub async fn login(&mut self) -> Result<String> {
        self.fetcher.session_mut().login().await
    }

    /// Fetches a single raw envelope
    pub async fn fetch_lot(
        &mut self,
        endpoint: Endpoint,
        params: &[(String, String)],
        lot: u32,
    ) -> Result<Value> {
        self.fetcher.fetch_lot(endpoint, params, Some(lot)).await
    }

    /// Raw items of every lot for a query, or of its single lot when set
    pub async fn fetch_raw<Q: EndpointQuery>(&mut self, query: &Q) -> Result<Vec<Value>> {
        let endpoint = Q::ENDPOINT;
        let params = query.params();

        match query.single_lot() {
            Some(lot) => {
                let envelope = self.fetcher.fetch_lot(endpoint, &params, Some(lot)).await?;
                match endpoint.extractor().extract(envelope).into_items() {
                    Value::Array(items) => Ok(items),
                    _ => {
                        tracing::warn!(endpoint = %endpoint, lot = lot, "Lot items are not a list");
                        Ok(Vec::new())
                    }
                }
            }
            None => self.fetcher.fetch_all(endpoint, &params).await,
        }
    }

    /// Validated entities for a query
    pub async fn fetch<T, Q>(&mut self, query: &Q) -> Result<ParseReport<T>>
    where
        T: DeserializeOwned,
        Q: EndpointQuery,
    {
        let items = self.fetch_raw(query).await?;
        Ok(parse_items(&items, Q::ENDPOINT.as_str()))
    }

    pub async fn sales_raw(&mut self, query: &SalesQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn sales(&mut self, query: &SalesQuery) -> Result<ParseReport<Sale>> {
        self.fetch(query).await
    }

    pub async fn articles_raw(&mut self, query: &ArticlesQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn articles(&mut self, query: &ArticlesQuery) -> Result<ParseReport<Article>> {
        self.fetch(query).await
    }

    pub async fn customers_raw(&mut self, query: &CustomersQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn customers(&mut self, query: &CustomersQuery) -> Result<ParseReport<Customer>> {
        self.fetch(query).await
    }

    pub async fn stock_raw(&mut self, query: &StockQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn stock(&mut self, query: &StockQuery) -> Result<ParseReport<StockRecord>> {
        self.fetch(query).await
    }

    pub async fn orders_raw(&mut self, query: &OrdersQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn orders(&mut self, query: &OrdersQuery) -> Result<ParseReport<Order>> {
        self.fetch(query).await
    }

    pub async fn staff_raw(&mut self, query: &StaffQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn staff(&mut self, query: &StaffQuery) -> Result<ParseReport<Staff>> {
        self.fetch(query).await
    }

    pub async fn routes_raw(&mut self, query: &RoutesQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn routes(&mut self, query: &RoutesQuery) -> Result<ParseReport<Route>> {
        self.fetch(query).await
    }

    pub async fn marketing_raw(&mut self, query: &MarketingQuery) -> Result<Vec<Value>> {
        self.fetch_raw(query).await
    }

    pub async fn marketing(&mut self, query: &MarketingQuery) -> Result<ParseReport<MarketingSegment>> {
        self.fetch(query).await
    }

    /// Exports the sales voucher report and returns the file bytes
    ///
    /// The server first answers with a file path (`pcArchivo`) which is then
    /// downloaded relative to the instance URL.
    pub async fn export_sales_report(&mut self, filter: &ReportFilter) -> Result<Vec<u8>> {
        let session = self.fetcher.session_mut();
        let url = format!(
            "{}reporteComprobantesVta/exportarExcel",
            session.instance().api_base()
        );

        tracing::info!(
            instance = %session.instance_name(),
            from = %filter.date_from,
            to = %filter.date_to,
            branch = %filter.branch,
            "Requesting sales report export"
        );
        let response = session
            .execute(HttpRequest::post_json(url, filter.to_payload()))
            .await?;

        let path = response
            .json()
            .ok()
            .and_then(|v| v.get("pcArchivo").and_then(Value::as_str).map(str::to_string))
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                ChessError::api(Some(500), "missing pcArchivo", Some(response.text()))
            })?;

        let file_url = format!(
            "{}/{}",
            session.instance().api_url.trim_end_matches('/'),
            path.trim().trim_start_matches('/')
        );
        tracing::info!(instance = %session.instance_name(), url = %file_url, "Downloading report file");

        let file = session.execute(HttpRequest::get(file_url)).await?;
        tracing::info!(bytes = file.body.len(), "Report downloaded");
        Ok(file.body)
    }
}
