/*!
 * Simulated process control and quantum timer
 *
 * Each simulated child needs a number of quanta of CPU time, taken from its
 * second token (`job 3`). A wait on a running child either consumes one
 * quantum and reports an interrupted wait with the expiry flag set, or
 * reports the child's exit once its work is done.
 *
 * Special program names:
 * - `missing`      child dies before stopping (exec failure)
 * - `fail-spawn`   spawn itself fails
 * - `noisy`        first wait is interrupted without an expiry
 * - `tstp`         first wait reports an external SIGTSTP stop
 * - `unstoppable`  stop() fails
 */

#![allow(dead_code)]

use nix::errno::Errno;
use nix::sys::signal::Signal;
use rr_schedule::core::types::Quantum;
use rr_schedule::process::{LaunchState, Launched, ProcessError, ProcessResult, WaitOutcome};
use rr_schedule::signals::SignalResult;
use rr_schedule::{ProcessControl, ProcessSpec, QuantumTimer};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Spawn(u32),
    Stop(u32),
    Resume(u32),
    Kill(u32),
}

#[derive(Debug)]
struct SimProcess {
    program: String,
    remaining: u32,
    running: bool,
    alive: bool,
    reaped: bool,
    quirk_pending: bool,
}

pub struct SimControl {
    next_handle: u32,
    processes: HashMap<u32, SimProcess>,
    events: Vec<Event>,
    expired: Rc<Cell<bool>>,
}

impl SimControl {
    pub fn new(expired: Rc<Cell<bool>>) -> Self {
        Self {
            next_handle: 100,
            processes: HashMap::new(),
            events: Vec::new(),
            expired,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn resumes(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Resume(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn killed(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Kill(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn running(&self) -> Vec<u32> {
        let mut running: Vec<u32> = self
            .processes
            .iter()
            .filter(|(_, p)| p.running && p.alive)
            .map(|(h, _)| *h)
            .collect();
        running.sort();
        running
    }

    fn process(&mut self, handle: u32) -> &mut SimProcess {
        self.processes
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("unknown handle {}", handle))
    }
}

impl ProcessControl for SimControl {
    type Handle = u32;

    fn spawn(&mut self, spec: &ProcessSpec) -> ProcessResult<Launched<u32>> {
        if spec.program() == "fail-spawn" {
            return Err(ProcessError::SpawnFailed("fail-spawn: EAGAIN".into()));
        }

        let handle = self.next_handle;
        self.next_handle += 1;

        let remaining = spec
            .args()
            .get(1)
            .and_then(|w| w.parse().ok())
            .unwrap_or(1);
        let alive = spec.program() != "missing";

        self.processes.insert(
            handle,
            SimProcess {
                program: spec.program().to_string(),
                remaining,
                running: false,
                alive,
                reaped: false,
                quirk_pending: true,
            },
        );
        self.events.push(Event::Spawn(handle));

        let state = if alive {
            LaunchState::Stopped
        } else {
            LaunchState::Exited(WaitOutcome::Exited(1))
        };
        Ok(Launched { handle, state })
    }

    fn stop(&mut self, handle: u32) -> ProcessResult<()> {
        if self.process(handle).program == "unstoppable" {
            return Err(ProcessError::SignalFailed {
                pid: handle.to_string(),
                signal: Signal::SIGSTOP,
                source: Errno::EPERM,
            });
        }
        self.process(handle).running = false;
        self.events.push(Event::Stop(handle));
        Ok(())
    }

    fn resume(&mut self, handle: u32) -> ProcessResult<()> {
        let others = self.running();
        assert!(
            others.iter().all(|h| *h == handle),
            "resuming {} while {:?} still running",
            handle,
            others
        );
        let process = self.process(handle);
        assert!(!process.reaped, "resumed reaped child {}", handle);
        process.running = true;
        self.events.push(Event::Resume(handle));
        Ok(())
    }

    fn wait(&mut self, handle: u32) -> ProcessResult<WaitOutcome> {
        let expired = Rc::clone(&self.expired);
        let process = self.process(handle);
        assert!(!process.reaped, "waited on reaped child {}", handle);

        if !process.alive {
            process.reaped = true;
            return Ok(WaitOutcome::Exited(1));
        }
        assert!(process.running, "waited on stopped child {}", handle);

        if process.quirk_pending {
            process.quirk_pending = false;
            match process.program.as_str() {
                "noisy" => return Ok(WaitOutcome::Interrupted),
                "tstp" => {
                    process.running = false;
                    return Ok(WaitOutcome::Stopped(Signal::SIGTSTP));
                }
                _ => {}
            }
        }

        if process.remaining > 1 {
            process.remaining -= 1;
            expired.set(true);
            return Ok(WaitOutcome::Interrupted);
        }

        process.remaining = 0;
        process.alive = false;
        process.running = false;
        process.reaped = true;
        Ok(WaitOutcome::Exited(0))
    }

    fn kill(&mut self, handle: u32) -> ProcessResult<()> {
        let process = self.process(handle);
        process.alive = false;
        process.running = false;
        process.reaped = true;
        self.events.push(Event::Kill(handle));
        Ok(())
    }
}

pub struct SimTimer {
    expired: Rc<Cell<bool>>,
    pub arms: usize,
    pub armed: bool,
}

impl SimTimer {
    pub fn new(expired: Rc<Cell<bool>>) -> Self {
        Self {
            expired,
            arms: 0,
            armed: false,
        }
    }
}

impl QuantumTimer for SimTimer {
    fn quantum(&self) -> Quantum {
        Quantum::from_millis(10).unwrap()
    }

    fn arm(&mut self) -> SignalResult<()> {
        self.expired.set(false);
        self.arms += 1;
        self.armed = true;
        Ok(())
    }

    fn disarm(&mut self) -> SignalResult<()> {
        self.armed = false;
        Ok(())
    }

    fn expired(&self) -> bool {
        self.expired.get()
    }

    fn clear(&mut self) {
        self.expired.set(false);
    }
}

pub type SimScheduler = rr_schedule::Scheduler<SimControl, SimTimer>;

pub fn sim_scheduler() -> SimScheduler {
    let expired = Rc::new(Cell::new(false));
    rr_schedule::Scheduler::new(SimControl::new(expired.clone()), SimTimer::new(expired))
}

/// Build specs from a command line such as `"job 3 : job 1"`
pub fn specs(line: &str) -> Vec<ProcessSpec> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    rr_schedule::process::parse_specs(&tokens, Default::default()).unwrap()
}
