//! Git command execution layer
//!
//! Every interaction with the repository goes through the [CommandRunner]
//! trait, which runs one git subcommand against a fixed working directory and
//! reports its exit status and captured output.
//!
//! # Overview
//!
//! - [runner::GitCommandRunner]: spawns the real `git` executable
//! - [mock::MockRunner]: replays canned results keyed by argument vector
//!
//! Code in the operations layer depends on the trait only, so workflows can be
//! exercised without spawning processes.
//!
//! ```rust
//! # use git_manager::git::{CommandRunner, MockRunner, CommandResult};
//! let runner = MockRunner::new();
//! runner.respond(&["branch", "--show-current"], CommandResult::success("main\n"));
//! let result = runner.run(&["branch", "--show-current"]).unwrap();
//! assert_eq!(result.stdout.trim(), "main");
//! ```

pub mod mock;
pub mod runner;

pub use mock::MockRunner;
pub use runner::GitCommandRunner;

use crate::error::{GitManagerError, Result};

/// Captured outcome of one git invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Process exit code; `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with the given standard output
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandResult {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given exit code and standard error
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        CommandResult {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the invocation counts as successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs git subcommands against a single working repository
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; the session itself never runs two
/// commands at once.
///
/// ## Error Handling
///
/// [CommandRunner::execute] fails only when git cannot be launched at all.
/// [CommandRunner::run] additionally turns a non-zero exit into
/// [GitManagerError::CommandFailed]. Callers that expect a particular non-zero
/// exit match on that variant and reinterpret it.
pub trait CommandRunner: Send + Sync {
    /// Run `git <args>` and capture the result, whatever the exit code
    ///
    /// # Arguments
    /// * `args` - Non-empty argument vector, without the leading `git`
    ///
    /// # Returns
    /// * `Ok(CommandResult)` - The process ran to completion
    /// * `Err` - The process could not be spawned
    fn execute(&self, args: &[&str]) -> Result<CommandResult>;

    /// Run `git <args>` and fail on a non-zero exit code
    ///
    /// # Returns
    /// * `Ok(CommandResult)` - The command exited with status 0
    /// * `Err(GitManagerError::CommandFailed)` - Non-zero exit, with stderr attached
    fn run(&self, args: &[&str]) -> Result<CommandResult> {
        let result = self.execute(args)?;
        if result.is_success() {
            Ok(result)
        } else {
            Err(GitManagerError::command_failed(
                args,
                result.exit_code,
                result.stderr,
            ))
        }
    }
}
