// Chess ERP Client - ChessERP REST data retrieval
// Copyright (c) 2025 Chess ERP Client Contributors
// Licensed under the MIT License

//! # ChessERP client
//!
//! Retrieves sales, articles, customers, stock, orders, staff, routes and
//! the marketing hierarchy from ChessERP REST instances, validates every
//! item independently and writes the results as CSV or JSON.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Lot pagination, resilient parsing, row shaping, export
//! - [`adapters`] - ChessERP session, endpoints and query builders
//! - [`domain`] - Errors, loose value types and entity models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chess_erp::adapters::chess::{ChessClient, CustomersQuery};
//! use chess_erp::config::ChessConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChessConfig::from_file("chess.toml")?;
//!     let instance = config.instance(Some("s"))?.clone();
//!     let mut client = ChessClient::new(instance, &config.pagination)?;
//!
//!     let customers = client.customers(&CustomersQuery::default()).await?;
//!     println!(
//!         "{} customers, {} rejected",
//!         customers.successes.len(),
//!         customers.failures.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! Each client logs in on first use and attaches the session cookie to every
//! call. A 401 triggers exactly one re-login and one retry; a second 401 is
//! an API error.
//!
//! ## Partial results
//!
//! Items that fail validation never abort a fetch. They are collected in
//! [`core::parser::ParseReport::failures`] with their index and raw JSON:
//!
//! ```rust
//! use chess_erp::core::parser::parse_items;
//! use chess_erp::domain::StockRecord;
//! use serde_json::json;
//!
//! let items = vec![
//!     json!({"idDeposito": 1, "idArticulo": 7, "cantBultos": 2, "cantUnidades": 0}),
//!     json!({"idDeposito": 1}),
//! ];
//! let report = parse_items::<StockRecord>(&items, "stock");
//! assert_eq!(report.successes.len(), 1);
//! assert_eq!(report.failures[0].index, 1);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
