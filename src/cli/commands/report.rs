//! Report command implementation
//!
//! Exports the sales voucher report and saves the downloaded file.

use super::{exit_code, InstanceArgs};
use crate::adapters::chess::{ChessClient, ReportFilter};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,

    /// Branch id
    #[arg(long, default_value = "1")]
    pub branch: String,

    /// Comma-separated company ids
    #[arg(long, default_value = "1")]
    pub companies: String,

    /// Comma-separated document types
    #[arg(long, default_value = "DVVTA,FCVTA")]
    pub doc_types: String,

    /// Article grouping columns
    #[arg(long, default_value = "MARCA,GENERICO,,,,,,,,")]
    pub grouping: String,

    /// File to write the report to
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl ReportArgs {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            branch: self.branch.clone(),
            companies: self.companies.clone(),
            doc_types: self.doc_types.clone(),
            article_groupings: self.grouping.clone(),
            ..ReportFilter::new(self.from, self.to)
        }
    }

    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(from = %self.from, to = %self.to, "Starting report command");

        let target = match self.instance.resolve(config_path) {
            Ok(t) => t,
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

        let bytes = match client.export_sales_report(&self.filter()).await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(error = %e, "Report export failed");
                eprintln!("❌ {e}");
                return Ok(exit_code(&e));
            }
        };

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.output, &bytes)?;

        println!(
            "✅ Report saved to {} ({} bytes)",
            self.output.display(),
            bytes.len()
        );
        Ok(super::EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_report_defaults() {
        let cli = Cli::parse_from([
            "chess-erp", "report", "--from", "2025-01-01", "--to", "2025-01-31", "-o",
            "out/report.xls",
        ]);
        let Commands::Report(args) = cli.command else {
            panic!("expected report");
        };

        let filter = args.filter();
        assert_eq!(filter.branch, "1");
        assert_eq!(filter.doc_types, "DVVTA,FCVTA");
        assert_eq!(filter.article_groupings, "MARCA,GENERICO,,,,,,,,");
        assert_eq!(args.output, PathBuf::from("out/report.xls"));
    }

    #[test]
    fn test_report_requires_dates() {
        assert!(Cli::try_parse_from(["chess-erp", "report", "-o", "r.xls"]).is_err());
    }
}
