/*!
 * Signal Types
 * Error and result types for timer and handler setup
 */

use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SignalError {
    #[error("Signal handler registration failed: {0}")]
    #[diagnostic(
        code(signals::handler_install),
        help("SIGALRM could not be hooked. Check that it is not blocked by the parent.")
    )]
    HandlerInstall(#[source] Errno),

    #[error("Timer creation failed: {0}")]
    #[diagnostic(code(signals::timer_create))]
    TimerCreate(#[source] Errno),

    #[error("Timer initialization failed: {0}")]
    #[diagnostic(code(signals::timer_arm))]
    TimerArm(#[source] Errno),
}
