//! Export summary and reporting
//!
//! Tracks, per domain, how many items came back from the server, how many
//! validated, how many rows were written and where, plus any failure.

use crate::adapters::chess::Endpoint;
use crate::domain::ChessError;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of exporting one domain
#[derive(Debug, Clone)]
pub struct DomainOutcome {
    pub endpoint: Endpoint,

    /// Items returned across all lots
    pub raw_items: usize,

    /// Items that passed validation; `None` when exported raw
    pub validated: Option<usize>,

    pub parse_failures: usize,

    pub rows_written: usize,

    pub output_path: Option<PathBuf>,

    pub error: Option<ExportError>,
}

impl DomainOutcome {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            raw_items: 0,
            validated: None,
            parse_failures: 0,
            rows_written: 0,
            output_path: None,
            error: None,
        }
    }

    pub fn failed(endpoint: Endpoint, error: ExportError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(endpoint)
        }
    }

    pub fn is_successful(&self) -> bool {
        self.error.is_none() && self.parse_failures == 0
    }
}

/// Summary of an export run for one instance
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub instance: String,

    pub domains: Vec<DomainOutcome>,

    pub duration: Duration,
}

impl ExportSummary {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            domains: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn record(&mut self, outcome: DomainOutcome) {
        self.domains.push(outcome);
    }

    pub fn outcome(&self, endpoint: Endpoint) -> Option<&DomainOutcome> {
        self.domains.iter().find(|d| d.endpoint == endpoint)
    }

    /// True when every domain was written without errors or parse failures
    pub fn is_successful(&self) -> bool {
        self.domains.iter().all(DomainOutcome::is_successful)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ExportError> {
        self.domains.iter().filter_map(|d| d.error.as_ref())
    }

    pub fn total_rows(&self) -> usize {
        self.domains.iter().map(|d| d.rows_written).sum()
    }

    pub fn total_parse_failures(&self) -> usize {
        self.domains.iter().map(|d| d.parse_failures).sum()
    }

    pub fn log_summary(&self) {
        for domain in &self.domains {
            match &domain.error {
                None => tracing::info!(
                    instance = %self.instance,
                    endpoint = %domain.endpoint,
                    raw = domain.raw_items,
                    validated = ?domain.validated,
                    failures = domain.parse_failures,
                    rows = domain.rows_written,
                    path = ?domain.output_path,
                    "Domain exported"
                ),
                Some(error) => tracing::warn!(
                    instance = %self.instance,
                    endpoint = %domain.endpoint,
                    error_type = ?error.error_type,
                    message = %error.message,
                    "Domain failed"
                ),
            }
        }

        tracing::info!(
            instance = %self.instance,
            domains = self.domains.len(),
            failed_domains = self.errors().count(),
            parse_failures = self.total_parse_failures(),
            rows = self.total_rows(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Login rejected or impossible
    Authentication,
    /// Server answered with a non-200 status or unreadable body
    Api,
    /// No HTTP response at all
    Connection,
    Serialization,
    /// Writing the output file failed
    Storage,
    Configuration,
}

impl From<&ChessError> for ExportErrorType {
    fn from(error: &ChessError) -> Self {
        match error {
            ChessError::Auth(_) => Self::Authentication,
            ChessError::Api { status: None, .. } => Self::Connection,
            ChessError::Api { .. } => Self::Api,
            ChessError::Serialization(_) => Self::Serialization,
            ChessError::Io(_) | ChessError::Export(_) => Self::Storage,
            ChessError::Configuration(_) => Self::Configuration,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    pub error_type: ExportErrorType,

    pub message: String,
}

impl ExportError {
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

impl From<&ChessError> for ExportError {
    fn from(error: &ChessError) -> Self {
        Self::new(ExportErrorType::from(error), error.to_string())
    }
}
