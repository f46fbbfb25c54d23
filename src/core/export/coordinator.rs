//! Export coordinator - runs domain fetches for one instance and writes files
//!
//! Domains run one after another over a single session. A domain that fails
//! is recorded in the summary and the run moves on to the next one.

use crate::adapters::chess::{
    ArticlesQuery, ChessClient, CustomersQuery, Endpoint, EndpointQuery, MarketingQuery,
    OrdersQuery, RoutesQuery, SalesQuery, StaffQuery, StockQuery,
};
use crate::core::export::summary::{DomainOutcome, ExportError, ExportSummary};
use crate::core::export::writer::OutputWriter;
use crate::core::parser::parse_items;
use crate::core::transform::{raw_rows, to_rows, Flatten, RecordShape};
use crate::domain::{
    Article, Customer, MarketingSegment, Order, Result, Route, Sale, Staff, StockRecord,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

/// Query used for each domain of a run
#[derive(Debug, Clone, PartialEq)]
pub struct DomainFilters {
    pub sales: SalesQuery,
    pub articles: ArticlesQuery,
    pub customers: CustomersQuery,
    pub stock: StockQuery,
    pub orders: OrdersQuery,
    pub staff: StaffQuery,
    pub routes: RoutesQuery,
    pub marketing: MarketingQuery,
}

impl DomainFilters {
    /// Default filters with sales restricted to a period
    pub fn for_period(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            sales: SalesQuery::new(date_from, date_to),
            articles: ArticlesQuery::default(),
            customers: CustomersQuery::default(),
            stock: StockQuery::default(),
            orders: OrdersQuery::default(),
            staff: StaffQuery::default(),
            routes: RoutesQuery::default(),
            marketing: MarketingQuery::default(),
        }
    }
}

/// Export coordinator
#[derive(Debug)]
pub struct ExportCoordinator {
    client: ChessClient,
    writer: OutputWriter,
    shape: RecordShape,
    raw: bool,
}

impl ExportCoordinator {
    pub fn new(client: ChessClient, writer: OutputWriter, shape: RecordShape) -> Self {
        Self {
            client,
            writer,
            shape,
            raw: false,
        }
    }

    /// Skip validation and write the server items as they came
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn client_mut(&mut self) -> &mut ChessClient {
        &mut self.client
    }

    /// Exports each endpoint in order
    pub async fn run(&mut self, endpoints: &[Endpoint], filters: &DomainFilters) -> ExportSummary {
        let start_time = Instant::now();
        let instance = self.client.instance().name.clone();
        let timestamp = Local::now();
        let mut summary = ExportSummary::new(&instance);

        tracing::info!(
            instance = %instance,
            domains = endpoints.len(),
            output_dir = %self.writer.dir().display(),
            format = ?self.writer.format(),
            shape = ?self.shape,
            raw = self.raw,
            "Starting export"
        );

        for &endpoint in endpoints {
            let outcome = match self.export_domain(endpoint, filters, &timestamp).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(
                        instance = %instance,
                        endpoint = %endpoint,
                        error = %e,
                        "Domain export failed"
                    );
                    DomainOutcome::failed(endpoint, ExportError::from(&e))
                }
            };
            summary.record(outcome);
        }

        summary.with_duration(start_time.elapsed())
    }

    async fn export_domain(
        &mut self,
        endpoint: Endpoint,
        filters: &DomainFilters,
        timestamp: &DateTime<Local>,
    ) -> Result<DomainOutcome> {
        match endpoint {
            Endpoint::Sales => self.export::<Sale, _>(&filters.sales, timestamp).await,
            Endpoint::Articles => self.export::<Article, _>(&filters.articles, timestamp).await,
            Endpoint::Customers => self.export::<Customer, _>(&filters.customers, timestamp).await,
            Endpoint::Stock => self.export::<StockRecord, _>(&filters.stock, timestamp).await,
            Endpoint::Orders => self.export::<Order, _>(&filters.orders, timestamp).await,
            Endpoint::Staff => self.export::<Staff, _>(&filters.staff, timestamp).await,
            Endpoint::Routes => self.export::<Route, _>(&filters.routes, timestamp).await,
            Endpoint::Marketing => {
                self.export::<MarketingSegment, _>(&filters.marketing, timestamp)
                    .await
            }
        }
    }

    async fn export<T, Q>(&mut self, query: &Q, timestamp: &DateTime<Local>) -> Result<DomainOutcome>
    where
        T: DeserializeOwned + Serialize + Flatten,
        Q: EndpointQuery,
    {
        let endpoint = Q::ENDPOINT;
        let items = self.client.fetch_raw(query).await?;
        let mut outcome = DomainOutcome::new(endpoint);
        outcome.raw_items = items.len();

        let rows = if self.raw {
            raw_rows(&items)
        } else {
            let report = parse_items::<T>(&items, endpoint.as_str());
            outcome.validated = Some(report.successes.len());
            outcome.parse_failures = report.failures.len();
            to_rows(&report.successes, self.shape)?
        };

        let path = self.writer.write(
            &self.client.instance().name,
            endpoint.as_str(),
            timestamp,
            &rows,
        )?;

        tracing::info!(
            endpoint = %endpoint,
            rows = rows.len(),
            path = %path.display(),
            "Domain written"
        );
        outcome.rows_written = rows.len();
        outcome.output_path = Some(path);
        Ok(outcome)
    }
}
