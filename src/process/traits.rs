/*!
 * Process Traits
 * Process control abstractions
 */

use super::spec::ProcessSpec;
use super::types::{Launched, ProcessResult, WaitOutcome};
use std::fmt;

/// Capabilities the scheduler needs over child processes
///
/// The scheduling core only talks to children through this trait, so it can
/// be driven by the Unix backend or by a simulated one.
pub trait ProcessControl {
    /// Identifier of a spawned child
    type Handle: Copy + Eq + fmt::Debug + fmt::Display;

    /// Create a child for `spec` and block until it has stopped itself
    /// (or died trying)
    fn spawn(&mut self, spec: &ProcessSpec) -> ProcessResult<Launched<Self::Handle>>;

    /// Suspend a running child
    fn stop(&mut self, handle: Self::Handle) -> ProcessResult<()>;

    /// Continue a stopped child
    fn resume(&mut self, handle: Self::Handle) -> ProcessResult<()>;

    /// Block until the child exits or stops, or a signal interrupts the wait
    fn wait(&mut self, handle: Self::Handle) -> ProcessResult<WaitOutcome>;

    /// Forcefully terminate and reap a child
    fn kill(&mut self, handle: Self::Handle) -> ProcessResult<()>;
}
