/*!
 * Process Launcher
 * Spawns every spec into a stopped child and registers it in the run ring
 */

use super::spec::ProcessSpec;
use super::traits::ProcessControl;
use super::types::{LaunchState, ProcessResult};
use crate::scheduler::ring::Ring;
use tracing::{info, warn};

/// What a launch pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchReport {
    /// Children registered in the ring
    pub launched: usize,
    /// Children that terminated before reaching the stopped state
    pub early_exits: usize,
}

/// Launch `specs` in order, appending each child to the ring tail
///
/// A child that dies before stopping (typically because its program could
/// not be executed) is still registered; the scheduler loop reaps it on its
/// first turn. A spawn failure kills and reaps the children already created
/// before the error is returned.
pub fn launch<C: ProcessControl>(
    control: &mut C,
    specs: &[ProcessSpec],
    ring: &mut Ring<C::Handle>,
) -> ProcessResult<LaunchReport> {
    let mut report = LaunchReport::default();

    for spec in specs {
        let launched = match control.spawn(spec) {
            Ok(launched) => launched,
            Err(e) => {
                warn!(command = %spec, error = %e, "Launch aborted, killing launched children");
                release_all(control, ring);
                return Err(e);
            }
        };

        if let LaunchState::Exited(outcome) = launched.state {
            warn!(pid = %launched.handle, command = %spec, %outcome, "Child terminated before stopping");
            report.early_exits += 1;
        }

        ring.append(launched.handle);
        report.launched += 1;
    }

    info!(
        launched = report.launched,
        early_exits = report.early_exits,
        "All children launched"
    );
    Ok(report)
}

/// Kill and unlink every child still in the ring
pub fn release_all<C: ProcessControl>(control: &mut C, ring: &mut Ring<C::Handle>) {
    let handles: Vec<C::Handle> = ring.iter().collect();
    for handle in handles {
        if let Err(e) = control.kill(handle) {
            warn!(pid = %handle, error = %e, "Failed to kill child");
        }
        ring.remove(handle);
    }
}
