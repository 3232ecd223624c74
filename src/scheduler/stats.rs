/*!
 * Scheduler Statistics
 * Counters kept by the scheduler loop
 */

use std::fmt;

/// Scheduler event counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Children registered in the ring
    pub launched: usize,
    /// Children that died before reaching the stopped state
    pub launch_failures: usize,
    /// Resumes issued to children
    pub dispatches: u64,
    /// Quantum expiries acted upon
    pub preemptions: u64,
    /// Children removed from the ring after terminating
    pub completed: usize,
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "launched={} launch_failures={} dispatches={} preemptions={} completed={}",
            self.launched, self.launch_failures, self.dispatches, self.preemptions, self.completed
        )
    }
}
