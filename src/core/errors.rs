/*!
 * Error Types
 * Centralized error handling with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export subsystem errors so callers only need this module
pub use crate::process::types::ProcessError;
pub use crate::signals::types::SignalError;

/// Command-line usage errors, all detected before any process is launched
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum UsageError {
    #[error("expected a quantum and at least one program")]
    #[diagnostic(
        code(usage::missing_arguments),
        help("Usage: schedule <quantum_ms> <prog 1> [args] [: <prog 2> [args] [: ...]]")
    )]
    MissingArguments,

    #[error("invalid quantum '{0}'")]
    #[diagnostic(
        code(usage::invalid_quantum),
        help("The quantum is a positive whole number of milliseconds, e.g. 100.")
    )]
    InvalidQuantum(String),

    #[error("process spec #{index} is empty")]
    #[diagnostic(
        code(usage::empty_spec),
        help("Separate programs with a standalone ':' and give each one a program name.")
    )]
    EmptySpec { index: usize },

    #[error("maximum number of processes exceeded (limit {limit})")]
    #[diagnostic(
        code(usage::too_many_processes),
        help("Raise --max-processes or SCHEDULE_MAX_PROCESSES, or schedule fewer programs.")
    )]
    TooManyProcesses { limit: usize },

    #[error("maximum number of arguments exceeded for process spec #{index} (limit {limit})")]
    #[diagnostic(
        code(usage::too_many_arguments),
        help("The limit counts the program name and one reserved terminator slot.")
    )]
    TooManyArguments { index: usize, limit: usize },
}

/// Unified scheduler error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SchedulerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),

    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Signal error: {0}")]
    #[diagnostic(transparent)]
    Signal(#[from] SignalError),
}

impl SchedulerError {
    /// True when the error came from the command line rather than the OS
    pub fn is_usage(&self) -> bool {
        matches!(self, SchedulerError::Usage(_))
    }
}

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_conversion() {
        let err: SchedulerError = UsageError::MissingArguments.into();
        assert!(err.is_usage());
        assert_eq!(
            err.to_string(),
            "expected a quantum and at least one program"
        );
    }

    #[test]
    fn test_process_error_is_not_usage() {
        let err: SchedulerError = ProcessError::SpawnFailed("fork: EAGAIN".into()).into();
        assert!(!err.is_usage());
        assert!(err.to_string().contains("fork: EAGAIN"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = UsageError::TooManyProcesses { limit: 3 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("usage::too_many_processes"));
    }
}
