/*!
 * Scheduler Configuration
 * Validated startup parameters built from the command line
 */

use crate::core::errors::UsageError;
use crate::core::types::Quantum;
use crate::process::spec::{parse_specs, ProcessSpec, SpecLimits};

/// Everything a scheduler run needs, validated before any process exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub quantum: Quantum,
    pub limits: SpecLimits,
    pub specs: Vec<ProcessSpec>,
}

impl SchedulerConfig {
    /// Validate the raw quantum and program tokens
    pub fn from_args<S: AsRef<str>>(
        quantum: Option<&str>,
        programs: &[S],
        limits: SpecLimits,
    ) -> Result<Self, UsageError> {
        let Some(quantum) = quantum else {
            return Err(UsageError::MissingArguments);
        };
        if programs.is_empty() {
            return Err(UsageError::MissingArguments);
        }

        let quantum = quantum.parse::<Quantum>()?;
        let specs = parse_specs(programs, limits)?;

        Ok(Self {
            quantum,
            limits,
            specs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_config() {
        let config =
            SchedulerConfig::from_args(Some("100"), &["sleep", "1", ":", "true"], SpecLimits::default())
                .unwrap();
        assert_eq!(config.quantum.as_millis(), 100);
        assert_eq!(config.specs.len(), 2);
    }

    #[test]
    fn test_limits_carried_into_config() {
        let limits = SpecLimits {
            max_processes: 3,
            max_arguments: 4,
        };
        let config = SchedulerConfig::from_args(Some("10"), &["echo", "hi"], limits).unwrap();
        assert_eq!(config.limits, limits);
    }

    #[test]
    fn test_missing_programs() {
        let none: [&str; 0] = [];
        assert_eq!(
            SchedulerConfig::from_args(Some("10"), &none, SpecLimits::default()),
            Err(UsageError::MissingArguments)
        );
        assert_eq!(
            SchedulerConfig::from_args(None, &none, SpecLimits::default()),
            Err(UsageError::MissingArguments)
        );
    }

    #[test]
    fn test_bad_quantum_checked_before_specs() {
        assert_eq!(
            SchedulerConfig::from_args(Some("0"), &[":"], SpecLimits::default()),
            Err(UsageError::InvalidQuantum("0".into()))
        );
    }
}
