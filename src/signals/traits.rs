/*!
 * Signal Traits
 * Quantum timer abstraction
 */

use super::types::SignalResult;
use crate::core::types::Quantum;

/// Source of quantum expiries for the scheduler loop
///
/// Expiry is reported through a flag that only the asynchronous side sets
/// and only the loop clears.
pub trait QuantumTimer {
    /// Length of one time slice
    fn quantum(&self) -> Quantum;

    /// Clear the expiry flag and start a fresh, full quantum
    fn arm(&mut self) -> SignalResult<()>;

    /// Stop the countdown
    fn disarm(&mut self) -> SignalResult<()>;

    /// Has the current quantum run out
    fn expired(&self) -> bool;

    /// Acknowledge an expiry
    fn clear(&mut self);
}
