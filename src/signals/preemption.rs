/*!
 * Preemption Flag
 *
 * The only datum shared between the scheduler loop and the SIGALRM handler.
 * The handler performs a single atomic store and nothing else.
 */

use nix::libc::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

static QUANTUM_EXPIRED: AtomicBool = AtomicBool::new(false);

/// SIGALRM handler
pub(super) extern "C" fn on_quantum_expired(_signal: c_int) {
    QUANTUM_EXPIRED.store(true, Ordering::SeqCst);
}

/// Handle on an expiry flag written from signal context
#[derive(Debug, Clone, Copy)]
pub struct PreemptionFlag {
    flag: &'static AtomicBool,
}

impl PreemptionFlag {
    /// The flag set by the process-wide SIGALRM handler
    pub fn global() -> Self {
        Self::new(&QUANTUM_EXPIRED)
    }

    pub const fn new(flag: &'static AtomicBool) -> Self {
        Self { flag }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LOCAL: AtomicBool = AtomicBool::new(false);

    #[test]
    fn test_flag_set_and_clear() {
        let flag = PreemptionFlag::new(&LOCAL);
        assert!(!flag.is_set());

        flag.set();
        assert!(flag.is_set());

        flag.clear();
        assert!(!flag.is_set());
    }
}
