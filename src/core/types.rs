/*!
 * Core Types
 * Common types used across the scheduler
 */

use super::errors::UsageError;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;

/// Fixed time slice granted to a process before it is preempted
///
/// Always positive; immutable once the scheduler has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    /// Create a quantum from milliseconds, rejecting zero
    pub fn from_millis(millis: u64) -> Option<Self> {
        NonZeroU64::new(millis).map(Self)
    }

    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0.get()
    }

    /// Whole seconds and the remaining microseconds
    pub const fn split(&self) -> (u64, u32) {
        let millis = self.0.get();
        (millis / 1000, ((millis % 1000) * 1000) as u32)
    }

    pub fn as_duration(&self) -> Duration {
        let (secs, micros) = self.split();
        Duration::new(secs, micros * 1000)
    }
}

impl FromStr for Quantum {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::from_millis)
            .ok_or_else(|| UsageError::InvalidQuantum(s.to_string()))
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
