/*!
 * Scheduler Operations
 * The select / wait / terminate / preempt state machine
 */

use super::state::State;
use super::stats::SchedulerStats;
use super::{Cursor, Scheduler};
use crate::core::errors::SchedulerResult;
use crate::process::launcher::release_all;
use crate::process::traits::ProcessControl;
use crate::process::types::WaitOutcome;
use crate::signals::traits::QuantumTimer;
use tracing::{debug, error, info, trace, warn};

impl<C: ProcessControl, T: QuantumTimer> Scheduler<C, T> {
    /// Run until every child has terminated
    ///
    /// On a fatal error the remaining children are killed and reaped before
    /// the error is returned.
    pub fn run(&mut self) -> SchedulerResult<SchedulerStats> {
        match self.drive() {
            Ok(()) => {
                info!(stats = %self.stats, "All processes completed");
                Ok(self.stats)
            }
            Err(e) => {
                error!(error = %e, "Scheduler aborted");
                self.abort();
                Err(e)
            }
        }
    }

    fn drive(&mut self) -> SchedulerResult<()> {
        let mut state = self.start()?;
        while state != State::Terminal {
            state = self.step(state)?;
        }
        self.timer.disarm()?;
        Ok(())
    }

    /// Resume the first live entry; `Terminal` if nothing was launched
    pub fn start(&mut self) -> SchedulerResult<State> {
        self.current = self.ring.first();
        match self.ring.get(self.current) {
            Some(first) => {
                self.dispatch(first)?;
                Ok(State::Selecting)
            }
            None => Ok(State::Terminal),
        }
    }

    /// Perform one state transition
    pub fn step(&mut self, state: State) -> SchedulerResult<State> {
        match state {
            State::Selecting => self.select(),
            State::Waiting => self.wait_current(),
            State::Terminated(outcome) => self.handle_termination(outcome),
            State::Preempted { yielded } => self.handle_preemption(yielded),
            State::Terminal => Ok(State::Terminal),
        }
    }

    fn select(&mut self) -> SchedulerResult<State> {
        if self.ring.is_empty() {
            return Ok(State::Terminal);
        }
        if self.current.is_sentinel() {
            self.current = self.ring.advance(self.current);
            return Ok(State::Selecting);
        }

        self.timer.arm()?;
        Ok(State::Waiting)
    }

    fn wait_current(&mut self) -> SchedulerResult<State> {
        let Some(handle) = self.ring.get(self.current) else {
            return Ok(State::Selecting);
        };

        let next = match self.control.wait(handle)? {
            WaitOutcome::Interrupted if self.timer.expired() => State::Preempted { yielded: false },
            WaitOutcome::Interrupted => State::Waiting,
            WaitOutcome::Stopped(signal) => {
                debug!(pid = %handle, %signal, "Process stopped on its own, yielding");
                State::Preempted { yielded: true }
            }
            outcome => State::Terminated(outcome),
        };
        Ok(next)
    }

    fn handle_termination(&mut self, outcome: WaitOutcome) -> SchedulerResult<State> {
        let Some(finished) = self.ring.get(self.current) else {
            return Ok(State::Selecting);
        };

        // Step off the node before it is unlinked
        self.current = self.ring.advance(self.current);
        self.ring.remove(finished);
        self.stats.completed += 1;
        info!(pid = %finished, %outcome, remaining = self.ring.len(), "Process terminated");

        if self.ring.is_empty() {
            self.current = Cursor::SENTINEL;
            return Ok(State::Terminal);
        }

        self.current = self.skip_sentinel(self.current);
        if let Some(next) = self.ring.get(self.current) {
            self.dispatch(next)?;
        }
        Ok(State::Selecting)
    }

    fn handle_preemption(&mut self, yielded: bool) -> SchedulerResult<State> {
        let Some(outgoing) = self.ring.get(self.current) else {
            self.timer.clear();
            return Ok(State::Selecting);
        };

        let next = self.ring.advance(self.current);
        self.stats.preemptions += 1;

        match self.ring.get(next) {
            Some(incoming) if incoming != outgoing => {
                self.control.stop(outgoing)?;
                trace!(pid = %outgoing, "Preempted");
                self.current = next;
                self.dispatch(incoming)?;
            }
            // Sole survivor was stopped from outside; it still needs a resume
            _ if yielded => {
                trace!(pid = %outgoing, "Sole survivor stopped externally, resuming");
                self.dispatch(outgoing)?;
            }
            // Sole survivor keeps the CPU for another quantum
            _ => trace!(pid = %outgoing, "Quantum renewed"),
        }

        self.timer.clear();
        Ok(State::Selecting)
    }

    fn dispatch(&mut self, handle: C::Handle) -> SchedulerResult<()> {
        self.control.resume(handle)?;
        self.stats.dispatches += 1;
        trace!(pid = %handle, dispatch = self.stats.dispatches, "Resumed");
        Ok(())
    }

    fn skip_sentinel(&self, cursor: Cursor) -> Cursor {
        if cursor.is_sentinel() {
            self.ring.advance(cursor)
        } else {
            cursor
        }
    }

    /// Disarm the timer and kill every child still in the ring
    fn abort(&mut self) {
        if let Err(e) = self.timer.disarm() {
            warn!(error = %e, "Failed to disarm quantum timer");
        }
        release_all(&mut self.control, &mut self.ring);
        self.current = Cursor::SENTINEL;
    }
}
