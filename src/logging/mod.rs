//! Logging and observability
//!
//! Structured logging through `tracing`: human-readable console output and
//! optional JSON log files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use chess_erp::logging::init_logging;
//! use chess_erp::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(instance = "s", lots = 3, "Fetching sales");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
