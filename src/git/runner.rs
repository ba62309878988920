use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::Result;
use crate::git::{CommandResult, CommandRunner};

/// Runs the `git` executable with its working directory fixed to one repository.
///
/// Invocations block until git exits; there is no timeout because pushes may
/// legitimately take a long time.
pub struct GitCommandRunner {
    working_dir: PathBuf,
}

impl GitCommandRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        GitCommandRunner {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl CommandRunner for GitCommandRunner {
    fn execute(&self, args: &[&str]) -> Result<CommandResult> {
        debug!(args = ?args, dir = %self.working_dir.display(), "Running git command");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .output()?;

        let result = CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.is_success() {
            debug!(
                args = ?args,
                exit_code = result.exit_code,
                stderr = %result.stderr.trim(),
                "Git command exited with failure"
            );
        }

        Ok(result)
    }
}
