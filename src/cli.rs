/*!
 * Command Line Interface
 */

use crate::config::SchedulerConfig;
use crate::core::errors::UsageError;
use crate::core::limits::{MAX_ARGUMENTS, MAX_PROCESSES};
use crate::process::spec::SpecLimits;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "schedule")]
#[command(version, about = "Round-robin scheduler for child processes", long_about = None)]
#[command(
    override_usage = "schedule [OPTIONS] <QUANTUM_MS> <PROG 1> [ARGS] [: <PROG 2> [ARGS] [: ...]]"
)]
pub struct Cli {
    /// Maximum number of processes to schedule
    #[arg(
        long,
        env = "SCHEDULE_MAX_PROCESSES",
        default_value_t = MAX_PROCESSES as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_processes: u32,

    /// Argument slots per process, program name and exec terminator included
    #[arg(
        long,
        env = "SCHEDULE_MAX_ARGUMENTS",
        default_value_t = MAX_ARGUMENTS as u32,
        value_parser = clap::value_parser!(u32).range(2..)
    )]
    pub max_arguments: u32,

    /// Time slice in milliseconds
    #[arg(value_name = "QUANTUM_MS", allow_negative_numbers = true)]
    pub quantum: Option<String>,

    /// Programs with their arguments, separated by a standalone ':'
    #[arg(value_name = "PROGRAM", trailing_var_arg = true, allow_hyphen_values = true)]
    pub programs: Vec<String>,
}

impl Cli {
    pub fn limits(&self) -> SpecLimits {
        SpecLimits {
            max_processes: self.max_processes as usize,
            max_arguments: self.max_arguments as usize,
        }
    }

    /// Validate the parsed arguments into a run configuration
    pub fn into_config(self) -> Result<SchedulerConfig, UsageError> {
        let limits = self.limits();
        SchedulerConfig::from_args(self.quantum.as_deref(), &self.programs, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_child_flags_are_not_ours() {
        let cli = Cli::try_parse_from(["schedule", "50", "ls", "-l", ":", "echo", "--help"]).unwrap();
        assert_eq!(cli.quantum.as_deref(), Some("50"));
        assert_eq!(cli.programs, vec!["ls", "-l", ":", "echo", "--help"]);
    }

    #[test]
    fn test_limit_options() {
        let cli = Cli::try_parse_from(["schedule", "--max-processes", "2", "10", "true"]).unwrap();
        assert_eq!(cli.limits().max_processes, 2);
        assert_eq!(cli.limits().max_arguments, MAX_ARGUMENTS);
    }

    #[test]
    fn test_negative_quantum_is_a_usage_error() {
        let cli = Cli::try_parse_from(["schedule", "-5", "true"]).unwrap();
        assert_eq!(
            cli.into_config(),
            Err(UsageError::InvalidQuantum("-5".into()))
        );
    }

    #[test]
    fn test_quantum_only() {
        let cli = Cli::try_parse_from(["schedule", "10"]).unwrap();
        assert_eq!(cli.into_config(), Err(UsageError::MissingArguments));
    }
}
