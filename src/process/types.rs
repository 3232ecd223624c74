/*!
 * Process Types
 * Common types for process control
 */

use miette::Diagnostic;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ProcessError {
    #[error("Spawn failed: {0}")]
    #[diagnostic(
        code(process::spawn_failed),
        help("The system refused to create a process. Check process limits (ulimit -u).")
    )]
    SpawnFailed(String),

    #[error("Invalid argument {0:?}: contains an interior NUL byte")]
    #[diagnostic(code(process::invalid_argument))]
    InvalidArgument(String),

    #[error("Failed to send {signal} to PID {pid}: {source}")]
    #[diagnostic(code(process::signal_failed))]
    SignalFailed {
        pid: String,
        signal: Signal,
        #[source]
        source: Errno,
    },

    #[error("Failed to wait for PID {pid}: {source}")]
    #[diagnostic(code(process::wait_failed))]
    WaitFailed {
        pid: String,
        #[source]
        source: Errno,
    },
}

/// What a wait on a single child observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Child exited with a status code
    Exited(i32),
    /// Child was killed by a signal
    Signaled(Signal),
    /// Child is no longer waitable (already reaped)
    Vanished,
    /// Child was stopped by a signal
    Stopped(Signal),
    /// Wait was interrupted before the child changed state
    Interrupted,
}

impl WaitOutcome {
    /// True when the child is gone for good
    #[inline]
    pub const fn is_terminated(&self) -> bool {
        matches!(
            self,
            WaitOutcome::Exited(_) | WaitOutcome::Signaled(_) | WaitOutcome::Vanished
        )
    }
}

impl fmt::Display for WaitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitOutcome::Exited(code) => write!(f, "exited with status {}", code),
            WaitOutcome::Signaled(signal) => write!(f, "killed by {}", signal),
            WaitOutcome::Vanished => f.write_str("already reaped"),
            WaitOutcome::Stopped(signal) => write!(f, "stopped by {}", signal),
            WaitOutcome::Interrupted => f.write_str("interrupted"),
        }
    }
}

/// State a freshly spawned child was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    /// Child stopped itself and is waiting to be resumed
    Stopped,
    /// Child terminated before it could stop
    Exited(WaitOutcome),
}

/// A spawned child and the state the launch wait observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launched<H> {
    pub handle: H,
    pub state: LaunchState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_outcomes() {
        assert!(WaitOutcome::Exited(0).is_terminated());
        assert!(WaitOutcome::Signaled(Signal::SIGKILL).is_terminated());
        assert!(WaitOutcome::Vanished.is_terminated());
        assert!(!WaitOutcome::Stopped(Signal::SIGSTOP).is_terminated());
        assert!(!WaitOutcome::Interrupted.is_terminated());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(WaitOutcome::Exited(3).to_string(), "exited with status 3");
        assert_eq!(
            WaitOutcome::Signaled(Signal::SIGTERM).to_string(),
            "killed by SIGTERM"
        );
    }
}
