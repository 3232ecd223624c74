/*!
 * Interval Timer
 * SIGALRM-driven quantum countdown backed by a POSIX timer
 */

use super::preemption::{on_quantum_expired, PreemptionFlag};
use super::traits::QuantumTimer;
use super::types::{SignalError, SignalResult};
use crate::core::types::Quantum;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigEvent, SigHandler, SigSet, SigevNotify, Signal};
use nix::sys::time::TimeSpec;
use nix::sys::timer::{Expiration, Timer, TimerSetTimeFlags};
use nix::time::ClockId;
use tracing::{debug, warn};

/// Installed SIGALRM disposition; restores the previous one on drop
struct HandlerGuard {
    previous: SigAction,
}

impl HandlerGuard {
    fn install() -> SignalResult<Self> {
        // No SA_RESTART: an expiry must interrupt the blocking waitpid
        let action = SigAction::new(
            SigHandler::Handler(on_quantum_expired),
            SaFlags::empty(),
            SigSet::empty(),
        );

        // SAFETY: the handler performs a single atomic store.
        let previous = unsafe { sigaction(Signal::SIGALRM, &action) }
            .map_err(SignalError::HandlerInstall)?;

        Ok(Self { previous })
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        // SAFETY: reinstates the disposition that was active before install.
        if let Err(e) = unsafe { sigaction(Signal::SIGALRM, &self.previous) } {
            warn!(error = %e, "Failed to restore SIGALRM disposition");
        }
    }
}

/// Expiries are delivered to the thread that created the timer, which is
/// the thread blocking in waitpid.
#[cfg(target_os = "linux")]
fn expiry_event() -> SigEvent {
    SigEvent::new(SigevNotify::SigevThreadId {
        signal: Signal::SIGALRM,
        thread_id: nix::unistd::gettid().as_raw(),
        si_value: 0,
    })
}

#[cfg(not(target_os = "linux"))]
fn expiry_event() -> SigEvent {
    SigEvent::new(SigevNotify::SigevSignal {
        signal: Signal::SIGALRM,
        si_value: 0,
    })
}

/// Repeating quantum timer that sets the preemption flag on every expiry
///
/// Arming restarts the countdown from a full quantum; after the first expiry
/// it keeps firing every quantum until re-armed or disarmed, so an expiry
/// that lands before the loop blocks is followed by another one.
pub struct IntervalTimer {
    quantum: Quantum,
    flag: PreemptionFlag,
    // Dropped before the handler guard: the timer is deleted first
    timer: Timer,
    _handler: HandlerGuard,
}

impl IntervalTimer {
    /// Hook SIGALRM and create a disarmed timer
    pub fn new(quantum: Quantum) -> SignalResult<Self> {
        let flag = PreemptionFlag::global();
        flag.clear();

        let handler = HandlerGuard::install()?;
        let timer = Timer::new(ClockId::CLOCK_MONOTONIC, expiry_event())
            .map_err(SignalError::TimerCreate)?;

        debug!(%quantum, "Interval timer ready");
        Ok(Self {
            quantum,
            flag,
            timer,
            _handler: handler,
        })
    }

    fn period(&self) -> TimeSpec {
        TimeSpec::from_duration(self.quantum.as_duration())
    }
}

impl QuantumTimer for IntervalTimer {
    fn quantum(&self) -> Quantum {
        self.quantum
    }

    fn arm(&mut self) -> SignalResult<()> {
        self.flag.clear();
        let period = self.period();
        self.timer
            .set(
                Expiration::IntervalDelayed(period, period),
                TimerSetTimeFlags::empty(),
            )
            .map_err(SignalError::TimerArm)
    }

    fn disarm(&mut self) -> SignalResult<()> {
        self.timer
            .set(
                Expiration::OneShot(TimeSpec::new(0, 0)),
                TimerSetTimeFlags::empty(),
            )
            .map_err(SignalError::TimerArm)
    }

    fn expired(&self) -> bool {
        self.flag.is_set()
    }

    fn clear(&mut self) {
        self.flag.clear();
    }
}
