/*!
 * Process Executor
 * OS-level child spawning and control via fork/exec and job-control signals
 */

use super::spec::ProcessSpec;
use super::traits::ProcessControl;
use super::types::{LaunchState, Launched, ProcessError, ProcessResult, WaitOutcome};
use crate::core::limits::CHILD_EXEC_FAILURE;
use nix::errno::Errno;
use nix::sys::signal::{kill, raise, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{execvp, fork, write, ForkResult, Pid};
use std::convert::Infallible;
use std::ffi::CString;
use std::io;
use tracing::{debug, info, warn};

/// Everything a child needs to exec its program, prepared before forking
struct ExecPlan {
    program: CString,
    fallback: CString,
    argv: Vec<CString>,
    diagnostic: Vec<u8>,
}

impl ExecPlan {
    fn new(spec: &ProcessSpec) -> ProcessResult<Self> {
        let argv = spec
            .args()
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<ProcessResult<Vec<_>>>()?;

        Ok(Self {
            program: to_cstring(spec.program())?,
            fallback: to_cstring(&format!("./{}", spec.program()))?,
            argv,
            diagnostic: format!("schedule: cannot execute '{}': ", spec.program()).into_bytes(),
        })
    }

    /// Child side of the launch protocol; never returns
    ///
    /// Only async-signal-safe work happens here: the stop, the two exec
    /// attempts, a raw write to stderr and `_exit`.
    fn exec_stopped(&self) -> ! {
        let _ = raise(Signal::SIGSTOP);

        let _ = execvp(&self.program, &self.argv);
        let errno = unreachable_ok(execvp(&self.fallback, &self.argv));

        let _ = write(io::stderr(), &self.diagnostic);
        let _ = write(io::stderr(), errno.desc().as_bytes());
        let _ = write(io::stderr(), b"\n");
        // SAFETY: skips the parent's atexit handlers and stdio buffers that
        // were duplicated by fork.
        unsafe { nix::libc::_exit(CHILD_EXEC_FAILURE) }
    }
}

fn unreachable_ok(result: nix::Result<Infallible>) -> Errno {
    match result {
        Ok(never) => match never {},
        Err(errno) => errno,
    }
}

fn to_cstring(value: &str) -> ProcessResult<CString> {
    CString::new(value).map_err(|_| ProcessError::InvalidArgument(value.to_string()))
}

/// Map a wait status to an outcome; `None` for transitions the scheduler
/// does not track (continued, still alive)
fn outcome_from(status: WaitStatus) -> Option<WaitOutcome> {
    match status {
        WaitStatus::Exited(_, code) => Some(WaitOutcome::Exited(code)),
        WaitStatus::Signaled(_, signal, _) => Some(WaitOutcome::Signaled(signal)),
        WaitStatus::Stopped(_, signal) => Some(WaitOutcome::Stopped(signal)),
        _ => None,
    }
}

/// Unix process control backed by fork, execvp, kill and waitpid
#[derive(Debug, Default)]
pub struct ProcessExecutor {
    spawned: usize,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        debug!("Process executor initialized");
        Self::default()
    }

    /// Number of children created so far
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Wait for the launch transition of a fresh child (stop or exit)
    fn await_launch(&self, child: Pid) -> ProcessResult<LaunchState> {
        loop {
            match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
                Ok(WaitStatus::Stopped(_, _)) => return Ok(LaunchState::Stopped),
                Ok(status) => {
                    if let Some(outcome) = outcome_from(status) {
                        return Ok(LaunchState::Exited(outcome));
                    }
                }
                Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => return Ok(LaunchState::Exited(WaitOutcome::Vanished)),
                Err(source) => {
                    return Err(ProcessError::WaitFailed {
                        pid: child.to_string(),
                        source,
                    })
                }
            }
        }
    }

    fn signal(&self, handle: Pid, signal: Signal) -> ProcessResult<()> {
        match kill(handle, signal) {
            Ok(()) => Ok(()),
            // Already reaped elsewhere; the next wait reports it as vanished
            Err(Errno::ESRCH) => {
                warn!(pid = %handle, %signal, "Signal target no longer exists");
                Ok(())
            }
            Err(source) => Err(ProcessError::SignalFailed {
                pid: handle.to_string(),
                signal,
                source,
            }),
        }
    }
}

impl ProcessControl for ProcessExecutor {
    type Handle = Pid;

    fn spawn(&mut self, spec: &ProcessSpec) -> ProcessResult<Launched<Pid>> {
        let plan = ExecPlan::new(spec)?;

        // SAFETY: the child only runs `ExecPlan::exec_stopped`, which stops,
        // execs or exits without touching shared parent state.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => plan.exec_stopped(),
            Ok(ForkResult::Parent { child }) => {
                self.spawned += 1;
                let state = self.await_launch(child)?;
                info!(pid = %child, command = %spec, "Spawned OS process");
                Ok(Launched {
                    handle: child,
                    state,
                })
            }
            Err(errno) => Err(ProcessError::SpawnFailed(format!(
                "{}: {}",
                spec.program(),
                errno.desc()
            ))),
        }
    }

    fn stop(&mut self, handle: Pid) -> ProcessResult<()> {
        self.signal(handle, Signal::SIGSTOP)
    }

    fn resume(&mut self, handle: Pid) -> ProcessResult<()> {
        self.signal(handle, Signal::SIGCONT)
    }

    fn wait(&mut self, handle: Pid) -> ProcessResult<WaitOutcome> {
        loop {
            match waitpid(handle, Some(WaitPidFlag::WUNTRACED)) {
                Ok(status) => {
                    if let Some(outcome) = outcome_from(status) {
                        return Ok(outcome);
                    }
                }
                Err(Errno::EINTR) => return Ok(WaitOutcome::Interrupted),
                Err(Errno::ECHILD) => return Ok(WaitOutcome::Vanished),
                Err(source) => {
                    return Err(ProcessError::WaitFailed {
                        pid: handle.to_string(),
                        source,
                    })
                }
            }
        }
    }

    fn kill(&mut self, handle: Pid) -> ProcessResult<()> {
        self.signal(handle, Signal::SIGKILL)?;

        loop {
            match waitpid(handle, None) {
                Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => break,
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => break,
                Err(source) => {
                    return Err(ProcessError::WaitFailed {
                        pid: handle.to_string(),
                        source,
                    })
                }
            }
        }

        info!(pid = %handle, "Killed OS process");
        Ok(())
    }
}
