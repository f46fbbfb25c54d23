//! CLI command implementations
//!
//! Shared pieces live here: instance selection, output overrides and the
//! mapping from errors to exit codes.

pub mod check;
pub mod export_all;
pub mod fetch;
pub mod init;
pub mod report;
pub mod validate;

use crate::config::{load_config, ExportConfig, InstanceConfig, OutputFormat, PaginationConfig};
use crate::core::export::{ExportErrorType, ExportSummary};
use crate::domain::{ChessError, Result};
use clap::Args;
use std::path::Path;

/// Completed without failures
pub const EXIT_SUCCESS: i32 = 0;
/// Completed, but some items failed validation or some domains failed
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_CONFIGURATION: i32 = 2;
pub const EXIT_AUTH: i32 = 3;
/// API or connection failure
pub const EXIT_API: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error that stopped a command
pub fn exit_code(error: &ChessError) -> i32 {
    match error {
        ChessError::Configuration(_) => EXIT_CONFIGURATION,
        ChessError::Auth(_) => EXIT_AUTH,
        ChessError::Api { .. } => EXIT_API,
        _ => EXIT_FATAL,
    }
}

/// Which ERP instance a command talks to
#[derive(Args, Debug, Clone, Default)]
pub struct InstanceArgs {
    /// Instance name from the config file (optional when only one is configured)
    #[arg(short, long, conflicts_with = "env_prefix")]
    pub instance: Option<String>,

    /// Read API_URL, USERNAME and PASSWORD from environment variables with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub env_prefix: Option<String>,
}

/// Instance plus the settings a command needs alongside it
#[derive(Debug, Clone)]
pub struct Target {
    pub instance: InstanceConfig,
    pub pagination: PaginationConfig,
    pub export: ExportConfig,
}

impl InstanceArgs {
    /// Resolves the instance from the config file or the environment
    ///
    /// With `--env-prefix` the config file is optional and only supplies
    /// pagination and export settings when present.
    pub fn resolve(&self, config_path: &str) -> Result<Target> {
        match &self.env_prefix {
            Some(prefix) => {
                let instance = InstanceConfig::from_env(prefix)?;
                let (pagination, export) = if Path::new(config_path).exists() {
                    let config = load_config(config_path)?;
                    (config.pagination, config.export)
                } else {
                    (PaginationConfig::default(), ExportConfig::default())
                };
                Ok(Target {
                    instance,
                    pagination,
                    export,
                })
            }
            None => {
                let config = load_config(config_path)?;
                let instance = config.instance(self.instance.as_deref())?.clone();
                Ok(Target {
                    instance,
                    pagination: config.pagination,
                    export: config.export,
                })
            }
        }
    }
}

/// Output settings a command can override
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (csv or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,

    /// Keep nested children instead of one row per leaf
    #[arg(long)]
    pub no_flatten: bool,

    /// Write the server items as they came, without validation
    #[arg(long)]
    pub raw: bool,
}

impl OutputArgs {
    pub fn apply(&self, export: &mut ExportConfig) {
        if let Some(format) = self.format {
            export.format = format;
        }
        if let Some(output) = &self.output {
            export.output_dir = output.clone();
        }
        if self.no_flatten {
            export.flatten = false;
        }
    }
}

/// Prints a run summary and picks the exit code
pub(crate) fn report_summary(summary: &ExportSummary) -> i32 {
    summary.log_summary();

    println!();
    println!("📊 Export Summary ({}):", summary.instance);
    for domain in &summary.domains {
        match &domain.error {
            None => println!(
                "  {:<10} raw={:<6} valid={:<6} failed={:<4} rows={:<6} {}",
                domain.endpoint.as_str(),
                domain.raw_items,
                domain
                    .validated
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                domain.parse_failures,
                domain.rows_written,
                domain
                    .output_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            Some(error) => println!(
                "  {:<10} ❌ {:?}: {}",
                domain.endpoint.as_str(),
                error.error_type,
                error.message
            ),
        }
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if summary.is_successful() {
        println!("✅ Export completed successfully!");
        EXIT_SUCCESS
    } else {
        println!("⚠️  Export completed with failures");
        EXIT_PARTIAL
    }
}

/// Exit code for a single-domain run: the failure's own code, else partial/success
pub(crate) fn single_domain_exit_code(summary: &ExportSummary) -> i32 {
    let failure = summary.errors().next().map(|e| e.error_type);
    match failure {
        Some(ExportErrorType::Authentication) => EXIT_AUTH,
        Some(ExportErrorType::Api) | Some(ExportErrorType::Connection) => EXIT_API,
        Some(ExportErrorType::Configuration) => EXIT_CONFIGURATION,
        Some(_) => EXIT_FATAL,
        None if summary.is_successful() => EXIT_SUCCESS,
        None => EXIT_PARTIAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chess::Endpoint;
    use crate::core::export::{DomainOutcome, ExportError};

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(&ChessError::Configuration("x".into())), 2);
        assert_eq!(exit_code(&ChessError::Auth("x".into())), 3);
        assert_eq!(exit_code(&ChessError::api(Some(500), "x", None)), 4);
        assert_eq!(exit_code(&ChessError::Io("x".into())), 5);
    }

    #[test]
    fn test_single_domain_exit_code() {
        let mut summary = ExportSummary::new("s");
        summary.record(DomainOutcome::failed(
            Endpoint::Sales,
            ExportError::new(ExportErrorType::Authentication, "denied"),
        ));
        assert_eq!(single_domain_exit_code(&summary), EXIT_AUTH);

        let mut summary = ExportSummary::new("s");
        let mut outcome = DomainOutcome::new(Endpoint::Stock);
        outcome.parse_failures = 2;
        summary.record(outcome);
        assert_eq!(single_domain_exit_code(&summary), EXIT_PARTIAL);

        let mut summary = ExportSummary::new("s");
        summary.record(DomainOutcome::new(Endpoint::Stock));
        assert_eq!(single_domain_exit_code(&summary), EXIT_SUCCESS);
    }

    #[test]
    fn test_output_args_apply() {
        let mut export = ExportConfig::default();
        OutputArgs {
            format: Some(OutputFormat::Json),
            output: Some("out".to_string()),
            no_flatten: true,
            raw: false,
        }
        .apply(&mut export);
        assert_eq!(export.format, OutputFormat::Json);
        assert_eq!(export.output_dir, "out");
        assert!(!export.flatten);
    }
}
