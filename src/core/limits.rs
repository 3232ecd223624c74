/*!
 * System Limits and Constants
 *
 * Centralized location for scheduler-wide limits and reserved values.
 * Every bound here can be overridden at startup through `SchedulerConfig`.
 */

// =============================================================================
// PROCESS SPEC LIMITS
// =============================================================================

/// Maximum number of processes a single run may schedule
pub const MAX_PROCESSES: usize = 100;

/// Maximum argument slots per process, including the program name.
/// One slot is reserved for the terminator consumed by `execvp`, so a
/// process may carry at most `MAX_ARGUMENTS - 1` tokens.
pub const MAX_ARGUMENTS: usize = 10;

/// Reserved standalone token separating process specs on the command line
pub const SPEC_SEPARATOR: &str = ":";

// =============================================================================
// EXIT CODES
// =============================================================================

/// Usage errors and fatal internal failures
pub const EXIT_FAILURE: u8 = 1;

/// Status a child reports when neither resolution strategy could exec it
pub const CHILD_EXEC_FAILURE: i32 = 1;
