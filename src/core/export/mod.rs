//! Export orchestration
//!
//! - [`coordinator`] - sequential per-domain fetch, shape and write
//! - [`writer`] - CSV / JSON output files
//! - [`summary`] - per-domain counts, paths and failures

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::{DomainFilters, ExportCoordinator};
pub use summary::{DomainOutcome, ExportError, ExportErrorType, ExportSummary};
pub use writer::OutputWriter;
