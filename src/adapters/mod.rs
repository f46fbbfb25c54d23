//! External system integrations.
//!
//! - [`chess`] - ChessERP REST API client
//!
//! # Design Pattern
//!
//! The adapter isolates the vendor's wire conventions (cookie sessions,
//! envelope shapes, lot counters) from the rest of the crate. Network access
//! goes through the [`chess::Transport`] trait so the session and pagination
//! logic can be exercised without a server.
//!
//! ```rust,no_run
//! use chess_erp::adapters::chess::{ChessClient, StockQuery};
//! use chess_erp::config::{InstanceConfig, PaginationConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let instance = InstanceConfig::new("s", "https://erp.example.com", "api_user", "secret");
//! let mut client = ChessClient::new(instance, &PaginationConfig::default())?;
//!
//! let stock = client.stock(&StockQuery::default()).await?;
//! println!("{} stock records", stock.successes.len());
//! # Ok(())
//! # }
//! ```

pub mod chess;
