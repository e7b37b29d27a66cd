//! Scheduling error types.

use thiserror::Error;

/// Errors that can occur while building or submitting a schedule.
///
/// Capability contract violations (e.g. a `delay` implementation that does
/// not round-trip through `plus`) are not represented here: they cannot be
/// detected at runtime by the core and are undefined behavior of the
/// offending capability implementation.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Invalid schedule configuration, e.g. a non-positive period.
    #[error("invalid schedule configuration: {0}")]
    InvalidConfiguration(String),

    /// A blocking wait was interrupted before the interval elapsed.
    #[error("interrupted while waiting")]
    Interrupted,

    /// The execution strategy failed to accept or run a submission.
    #[error("execution strategy failure: {0}")]
    Strategy(String),
}

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
