//! Core retrieval logic.
//!
//! # Modules
//!
//! - [`batch`] - lot counter parsing and multi-lot fetching
//! - [`parser`] - per-item validation into entities, collecting failures
//! - [`transform`] - nested or flat row shaping
//! - [`export`] - per-domain orchestration and output files
//!
//! # Retrieval Workflow
//!
//! 1. **Login**: the session logs in on first use and re-logs in once on 401
//! 2. **Fetch**: lot 1 is requested, its counter gives the remaining lots
//! 3. **Parse**: every item is validated independently
//! 4. **Shape**: entities are kept nested or denormalized into flat rows
//! 5. **Write**: one CSV or JSON file per domain
//!
//! # Example
//!
//! ```rust,no_run
//! use chess_erp::adapters::chess::{ChessClient, Endpoint};
//! use chess_erp::config::load_config;
//! use chess_erp::core::export::{DomainFilters, ExportCoordinator, OutputWriter};
//! use chess_erp::core::transform::RecordShape;
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("chess.toml")?;
//! let instance = config.instance(None)?.clone();
//! let client = ChessClient::new(instance, &config.pagination)?;
//! let writer = OutputWriter::from_config(&config.export)?;
//!
//! let mut coordinator = ExportCoordinator::new(client, writer, RecordShape::Flat);
//! let day = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! let summary = coordinator
//!     .run(&Endpoint::ALL, &DomainFilters::for_period(day, day))
//!     .await;
//! summary.log_summary();
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod export;
pub mod parser;
pub mod transform;
