/*!
 * Scheduler States
 */

use crate::process::types::WaitOutcome;

/// Scheduler loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Pick the process to run and arm its quantum
    Selecting,
    /// Blocked on the current process
    Waiting,
    /// Current process terminated with the given outcome
    Terminated(WaitOutcome),
    /// Current process gave up the CPU: its quantum expired, or it was
    /// stopped by someone else (`yielded`)
    Preempted { yielded: bool },
    /// Ring is empty
    Terminal,
}
