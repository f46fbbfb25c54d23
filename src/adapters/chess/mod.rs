//! ChessERP REST adapter
//!
//! - [`transport`] - HTTP call primitive and its `reqwest` implementation
//! - [`session`] - login, cookie attachment and the single re-login retry
//! - [`extractor`] - endpoint table and envelope unwrapping
//! - [`models`] - per-domain query builders and the report filter
//! - [`client`] - [`ChessClient`] facade with raw and validated accessors

pub mod client;
pub mod extractor;
pub mod models;
pub mod session;
pub mod transport;

pub use client::ChessClient;
pub use extractor::{Endpoint, LotEnvelope, PathExtractor, ResponseExtractor};
pub use models::{
    ArticlesQuery, CustomersQuery, EndpointQuery, MarketingQuery, OrdersQuery, ReportFilter,
    RoutesQuery, SalesQuery, StaffQuery, StockQuery,
};
pub use session::SessionManager;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
