//! Configuration management.
//!
//! TOML-based configuration with `${VAR}` substitution, `CHESS_*`
//! environment overrides and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chess_erp::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("chess.toml")?;
//! for instance in &config.instances {
//!     println!("{} -> {}", instance.name, instance.api_base());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and environment
//! - [`InstanceConfig`] - one `[[instances]]` entry per ERP server
//! - [`PaginationConfig`] - lot counter handling per endpoint
//! - [`ExportConfig`] - output directory, format, flattening
//! - [`LoggingConfig`] - optional JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [[instances]]
//! name = "s"
//! api_url = "https://erp.example.com"
//! username = "api_user"
//! password = "${CHESS_S_PASSWORD}"
//!
//! [export]
//! output_dir = "data"
//! format = "csv"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ChessConfig, Environment, ExportConfig, InstanceConfig, LoggingConfig,
    OutputFormat, PaginationConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
