/*!
 * Signals Module
 * Quantum timer and the SIGALRM preemption flag
 */

pub mod preemption;
pub mod timer;
pub mod traits;
pub mod types;

// Re-export public API
pub use preemption::PreemptionFlag;
pub use timer::IntervalTimer;
pub use traits::QuantumTimer;
pub use types::{SignalError, SignalResult};
