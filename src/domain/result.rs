//! Result type alias
//!
//! Convenience alias that fixes the error type to [`ChessError`].

use super::errors::ChessError;

/// Result type alias for ChessERP operations
///
/// # Examples
///
/// ```
/// use chess_erp::domain::result::Result;
/// use chess_erp::domain::errors::ChessError;
///
/// fn example_function() -> Result<String> {
///     Ok("ABC123".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ChessError::Auth("No sessionId returned from API".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChessError>;
