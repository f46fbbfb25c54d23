//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// ChessERP client - fetch and export ERP data
#[derive(Parser, Debug)]
#[command(name = "chess-erp")]
#[command(version, about, long_about = None)]
#[command(author = "Chess ERP Client Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "chess.toml", env = "CHESS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CHESS_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one domain and write it to a file
    Fetch(commands::fetch::FetchArgs),

    /// Fetch every domain with default filters
    ExportAll(commands::export_all::ExportAllArgs),

    /// Download the sales voucher report
    Report(commands::report::ReportArgs),

    /// Log in and report whether it worked
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the selected command and return its exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Fetch(args) => args.execute(&self.config).await,
            Commands::ExportAll(args) => args.execute(&self.config).await,
            Commands::Report(args) => args.execute(&self.config).await,
            Commands::Check(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}
