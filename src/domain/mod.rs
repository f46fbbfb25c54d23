//! Domain models and types for the ChessERP client.
//!
//! This module contains the entity schemas returned by the ChessERP REST API,
//! the loose-value unions used at the parsing boundary, and the error taxonomy.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity models** ([`Sale`], [`Article`], [`StockRecord`], [`Customer`],
//!   [`Order`], [`Staff`], [`Route`], [`MarketingSegment`]) and their children
//! - **Loose values** ([`IntOrText`], [`NumberOrText`]) for fields the server
//!   sends either as numbers or as text
//! - **Error types** ([`ChessError`], [`TransportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ChessError>`]:
//!
//! ```rust
//! use chess_erp::domain::{ChessError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = chess_erp::config::ChessConfig::from_file("chess.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! Entities are validated strictly: a missing required field fails the
//! whole record, which the resilient parser then reports as a failure.

pub mod customers;
pub mod errors;
pub mod inventory;
pub mod marketing;
pub mod orders;
pub mod result;
pub mod routes;
pub mod sales;
pub mod staff;
pub mod values;

// Re-export commonly used types for convenience
pub use customers::{Customer, CustomerAlias, SalesForceAssignment};
pub use errors::{ChessError, TransportError};
pub use inventory::{Article, ArticleGrouping, ContainerRelation, StockRecord};
pub use marketing::{MarketingChannel, MarketingSegment, MarketingSubchannel};
pub use orders::{Order, OrderLine};
pub use result::Result;
pub use routes::{Route, RouteClient};
pub use sales::{Sale, SaleLine};
pub use staff::Staff;
pub use values::{IntOrText, NumberOrText};
