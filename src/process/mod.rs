/*!
 * Process Module
 * Process specs, OS-level execution and launch protocol
 */

pub mod executor;
pub mod launcher;
pub mod spec;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use executor::ProcessExecutor;
pub use launcher::{launch, LaunchReport};
pub use spec::{parse_specs, ProcessSpec, SpecLimits};
pub use traits::ProcessControl;
pub use types::{LaunchState, Launched, ProcessError, ProcessResult, WaitOutcome};
