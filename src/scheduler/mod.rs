/*!
 * Round-Robin Scheduler
 * Time-slices a ring of stopped children using job-control signals
 */

use crate::core::errors::SchedulerResult;
use crate::process::launcher::{self, LaunchReport};
use crate::process::spec::ProcessSpec;
use crate::process::traits::ProcessControl;
use crate::signals::traits::QuantumTimer;
use tracing::info;

mod operations;
pub mod ring;
mod state;
mod stats;

pub use ring::{Cursor, Ring};
pub use state::State;
pub use stats::SchedulerStats;

/// Scheduler context
///
/// Owns the run ring, the `current` cursor, the process control backend and
/// the quantum timer. Everything here is touched by a single thread; the only
/// datum shared with signal context lives behind the timer.
pub struct Scheduler<C: ProcessControl, T: QuantumTimer> {
    control: C,
    timer: T,
    ring: Ring<C::Handle>,
    current: Cursor,
    stats: SchedulerStats,
}

impl<C: ProcessControl, T: QuantumTimer> Scheduler<C, T> {
    /// Create a scheduler with an empty ring
    pub fn new(control: C, timer: T) -> Self {
        info!(quantum = %timer.quantum(), "Scheduler initialized");
        Self {
            control,
            timer,
            ring: Ring::new(),
            current: Cursor::SENTINEL,
            stats: SchedulerStats::default(),
        }
    }

    /// Launch every spec as a stopped child and register it in the ring
    pub fn launch(&mut self, specs: &[ProcessSpec]) -> SchedulerResult<LaunchReport> {
        let report = launcher::launch(&mut self.control, specs, &mut self.ring)?;
        self.stats.launched += report.launched;
        self.stats.launch_failures += report.early_exits;
        Ok(report)
    }

    pub fn ring(&self) -> &Ring<C::Handle> {
        &self.ring
    }

    /// Process currently holding the CPU, if any
    pub fn current(&self) -> Option<C::Handle> {
        self.ring.get(self.current)
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}
