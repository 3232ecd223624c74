/*!
 * Process Specs
 * Splits command-line tokens into per-process argument vectors
 */

use crate::core::errors::UsageError;
use crate::core::limits::{MAX_ARGUMENTS, MAX_PROCESSES, SPEC_SEPARATOR};
use std::fmt;

/// Bounds applied while building process specs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecLimits {
    /// Maximum number of specs
    pub max_processes: usize,
    /// Maximum argument slots per spec, terminator slot included
    pub max_arguments: usize,
}

impl Default for SpecLimits {
    fn default() -> Self {
        Self {
            max_processes: MAX_PROCESSES,
            max_arguments: MAX_ARGUMENTS,
        }
    }
}

/// Program name followed by its arguments; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    argv: Vec<String>,
}

impl ProcessSpec {
    /// Build a spec from an argument vector, `None` if it is empty
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }

    /// Program to execute (argv[0])
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Full argument vector, program name included
    pub fn args(&self) -> &[String] {
        &self.argv
    }

    pub fn len(&self) -> usize {
        self.argv.len()
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// Split tokens on the standalone `:` separator into process specs
///
/// Bounds are checked as tokens are consumed, so an oversized command line
/// is rejected at the first offending token.
pub fn parse_specs<S: AsRef<str>>(
    tokens: &[S],
    limits: SpecLimits,
) -> Result<Vec<ProcessSpec>, UsageError> {
    if tokens.is_empty() {
        return Err(UsageError::MissingArguments);
    }

    let mut specs = Vec::new();
    let mut argv: Vec<String> = Vec::new();

    for token in tokens {
        let token = token.as_ref();

        if token == SPEC_SEPARATOR {
            push_spec(&mut specs, std::mem::take(&mut argv), limits)?;
            continue;
        }

        argv.push(token.to_string());
        if argv.len() >= limits.max_arguments {
            return Err(UsageError::TooManyArguments {
                index: specs.len() + 1,
                limit: limits.max_arguments,
            });
        }
    }

    push_spec(&mut specs, argv, limits)?;
    Ok(specs)
}

fn push_spec(
    specs: &mut Vec<ProcessSpec>,
    argv: Vec<String>,
    limits: SpecLimits,
) -> Result<(), UsageError> {
    let index = specs.len() + 1;
    let spec = ProcessSpec::new(argv).ok_or(UsageError::EmptySpec { index })?;

    if specs.len() >= limits.max_processes {
        return Err(UsageError::TooManyProcesses {
            limit: limits.max_processes,
        });
    }

    specs.push(spec);
    Ok(())
}
