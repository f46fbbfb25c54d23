//! Fetch command implementation
//!
//! Retrieves one domain from one instance and writes it to a file.

use super::{exit_code, report_summary, single_domain_exit_code, InstanceArgs, OutputArgs};
use crate::adapters::chess::{
    ArticlesQuery, ChessClient, CustomersQuery, Endpoint, MarketingQuery, OrdersQuery,
    RoutesQuery, SalesQuery, StaffQuery, StockQuery,
};
use crate::core::export::{DomainFilters, ExportCoordinator, OutputWriter};
use crate::core::transform::RecordShape;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Domain to fetch (sales, articles, customers, stock, orders, staff, routes, marketing)
    pub domain: Endpoint,

    #[command(flatten)]
    pub instance: InstanceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Start date (YYYY-MM-DD), required for sales
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), required for sales
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Comma-separated company ids (sales)
    #[arg(long, default_value = "")]
    pub companies: String,

    /// Include detail lines (sales)
    #[arg(long)]
    pub detailed: bool,

    /// Single article id (articles)
    #[arg(long)]
    pub article: Option<i64>,

    /// Include voided records (articles, customers, routes)
    #[arg(long)]
    pub voided: bool,

    /// Fetch only this lot (customers)
    #[arg(long)]
    pub lot: Option<u32>,

    /// Deposit id (stock)
    #[arg(long, default_value_t = 1)]
    pub deposit: i64,

    /// Stock date (YYYY-MM-DD); the server uses today when absent
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Split stock by freshness (stock)
    #[arg(long)]
    pub freshness: bool,

    /// Delivery date (orders)
    #[arg(long)]
    pub delivery_date: Option<NaiveDate>,

    /// Order date (orders)
    #[arg(long)]
    pub order_date: Option<NaiveDate>,

    /// Only invoiced orders
    #[arg(long)]
    pub invoiced: bool,

    /// Branch id (staff, routes)
    #[arg(long)]
    pub branch: Option<i64>,

    /// Staff id (staff)
    #[arg(long)]
    pub staff: Option<i64>,

    /// Sales force id (routes)
    #[arg(long, default_value_t = 1)]
    pub sales_force: i64,

    /// Scan code (marketing)
    #[arg(long)]
    pub scan_code: Option<String>,
}

impl FetchArgs {
    /// Filters for the selected domain
    pub fn filters(&self) -> DomainFilters {
        let today = Local::now().date_naive();
        let from = self.from.unwrap_or(today);
        let to = self.to.unwrap_or(from);

        DomainFilters {
            sales: SalesQuery::new(from, to)
                .companies(self.companies.clone())
                .detailed(self.detailed),
            articles: ArticlesQuery {
                article: self.article,
                voided: self.voided,
            },
            customers: CustomersQuery {
                voided: self.voided,
                lot: self.lot,
            },
            stock: StockQuery {
                deposit_id: self.deposit,
                date: self.date,
                freshness: self.freshness.then_some(true),
            },
            orders: OrdersQuery {
                delivery_date: self.delivery_date,
                order_date: self.order_date,
                invoiced: self.invoiced,
            },
            staff: StaffQuery {
                branch: self.branch,
                staff: self.staff,
            },
            routes: RoutesQuery {
                branch: self.branch.unwrap_or(1),
                sales_force: self.sales_force,
                voided: self.voided,
            },
            marketing: MarketingQuery {
                scan_code: self.scan_code.clone(),
            },
        }
    }

    /// Execute the fetch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(domain = %self.domain, "Starting fetch command");

        if self.domain == Endpoint::Sales && (self.from.is_none() || self.to.is_none()) {
            eprintln!("Fetching sales requires --from and --to");
            return Ok(super::EXIT_CONFIGURATION);
        }

        let mut target = match self.instance.resolve(config_path) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve instance");
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };
        self.output.apply(&mut target.export);

        let client = ChessClient::new(target.instance, &target.pagination);
        let writer = OutputWriter::from_config(&target.export);
        let (client, writer) = match (client, writer) {
            (Ok(c), Ok(w)) => (c, w),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };

        println!(
            "🚀 Fetching {} from {}...",
            self.domain,
            client.instance().name
        );

        let mut coordinator =
            ExportCoordinator::new(client, writer, RecordShape::from(target.export.flatten))
                .with_raw(self.output.raw);
        let summary = coordinator.run(&[self.domain], &self.filters()).await;

        let printed = report_summary(&summary);
        let code = single_domain_exit_code(&summary);
        Ok(if code == super::EXIT_SUCCESS { printed } else { code })
    }
}
