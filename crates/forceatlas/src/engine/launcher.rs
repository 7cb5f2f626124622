//! Running the engine process.
//!
//! The driver never spawns processes itself; it hands an [`EngineCommand`] to
//! a [`Launcher`]. [`SystemLauncher`] runs the real JVM. Any closure with the
//! right signature is a launcher too, which lets callers substitute a
//! different engine or a test double that writes the agreed output file.

use std::{io, path::PathBuf, process::Command};

use log::debug;

use super::EngineCommand;
use crate::error::EngineInvocationError;

/// How an engine process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    code: Option<i32>,
}

impl ExitOutcome {
    /// A process that exited with status 0.
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    /// A process that exited with the given status code.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that was killed without an exit code.
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Converts a non-zero outcome into an error.
    pub fn check(self) -> Result<(), EngineInvocationError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(EngineInvocationError::ExitStatus { code: self.code })
        }
    }
}

/// Capability to run an engine command to completion.
///
/// Implementations block until the engine has exited and must not interpret
/// its output streams.
pub trait Launcher {
    /// Runs `command` and reports how it ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be run at all.
    fn launch(&self, command: &EngineCommand) -> Result<ExitOutcome, EngineInvocationError>;
}

impl<F> Launcher for F
where
    F: Fn(&EngineCommand) -> io::Result<ExitOutcome>,
{
    fn launch(&self, command: &EngineCommand) -> Result<ExitOutcome, EngineInvocationError> {
        self(command).map_err(|source| EngineInvocationError::Launch {
            program: command.program().to_path_buf(),
            source,
        })
    }
}

/// Runs the engine as a child process with inherited standard streams.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    classpath: Vec<PathBuf>,
}

impl SystemLauncher {
    /// Creates a launcher that verifies `classpath` entries before starting.
    pub fn new(classpath: Vec<PathBuf>) -> Self {
        Self { classpath }
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, command: &EngineCommand) -> Result<ExitOutcome, EngineInvocationError> {
        if let Some(entry) = self.classpath.iter().find(|entry| !entry.exists()) {
            return Err(EngineInvocationError::MissingClasspath {
                entry: entry.clone(),
            });
        }

        debug!(program = command.program().display().to_string(); "Starting engine process");
        let status = Command::new(command.program())
            .args(command.args())
            .status()
            .map_err(|source| EngineInvocationError::Launch {
                program: command.program().to_path_buf(),
                source,
            })?;

        Ok(ExitOutcome { code: status.code() })
    }
}
