//! Export-all command implementation
//!
//! Logs in once and exports every domain with default filters.

use super::{exit_code, report_summary, InstanceArgs, OutputArgs};
use crate::adapters::chess::{ChessClient, Endpoint};
use crate::core::export::{DomainFilters, ExportCoordinator, OutputWriter};
use crate::core::transform::RecordShape;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Arguments for the export-all command
#[derive(Args, Debug)]
pub struct ExportAllArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Sales start date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Sales end date (YYYY-MM-DD), defaults to the start date
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Deposit id for stock
    #[arg(long, default_value_t = 1)]
    pub deposit: i64,
}

impl ExportAllArgs {
    pub fn filters(&self) -> DomainFilters {
        let from = self.from.unwrap_or_else(|| Local::now().date_naive());
        let to = self.to.unwrap_or(from);
        let mut filters = DomainFilters::for_period(from, to);
        filters.stock.deposit_id = self.deposit;
        filters
    }

    /// Execute the export-all command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export-all command");

        let mut target = match self.instance.resolve(config_path) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve instance");
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };
        self.output.apply(&mut target.export);

        let writer = match OutputWriter::from_config(&target.export) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };
        let mut client = match ChessClient::new(target.instance, &target.pagination) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };

        if let Err(e) = client.login().await {
            tracing::error!(error = %e, "Login failed");
            eprintln!("❌ {e}");
            return Ok(exit_code(&e));
        }

        println!("🚀 Exporting all domains from {}...", client.instance().name);

        let mut coordinator =
            ExportCoordinator::new(client, writer, RecordShape::from(target.export.flatten))
                .with_raw(self.output.raw);
        let summary = coordinator.run(&Endpoint::ALL, &self.filters()).await;

        Ok(report_summary(&summary))
    }
}
