//! Error types for the calview engine.

use thiserror::Error;

/// Errors surfaced by the calendar engine.
///
/// Malformed backend events are deliberately *not* errors: they are returned
/// as [`crate::bucket::MalformedEvent`] diagnostics next to a valid partial
/// result. The variants here are fail-fast programmer or input errors.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Unsupported view '{0}'. Expected one of: day, week, month")]
    UnsupportedView(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for engine operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
