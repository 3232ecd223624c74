/*!
 * Round-Robin Process Scheduler
 * Launches child programs stopped and time-slices them with SIGSTOP/SIGCONT
 */

pub mod cli;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod signals;

// Re-exports
pub use crate::core::errors::{SchedulerError, SchedulerResult, UsageError};
pub use crate::core::types::Quantum;
pub use config::SchedulerConfig;
pub use monitoring::init_tracing;
pub use process::{ProcessControl, ProcessExecutor, ProcessSpec, SpecLimits, WaitOutcome};
pub use scheduler::{Scheduler, SchedulerStats};
pub use signals::{IntervalTimer, QuantumTimer};

/// Launch every configured program and schedule them until all terminate
#[tracing::instrument(
    skip_all,
    fields(
        quantum = %config.quantum,
        processes = config.specs.len(),
        max_processes = config.limits.max_processes,
        max_arguments = config.limits.max_arguments
    )
)]
pub fn run(config: &SchedulerConfig) -> SchedulerResult<SchedulerStats> {
    let timer = IntervalTimer::new(config.quantum)?;
    let mut scheduler = Scheduler::new(ProcessExecutor::new(), timer);
    scheduler.launch(&config.specs)?;
    scheduler.run()
}
