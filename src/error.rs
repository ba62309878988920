use thiserror::Error;

/// Unified error type for git-manager operations
#[derive(Error, Debug)]
pub enum GitManagerError {
    #[error("git {} failed with exit code {exit_code}: {}", .args.join(" "), .stderr.trim())]
    CommandFailed {
        args: Vec<String>,
        exit_code: i32,
        stderr: String,
    },

    #[error("Could not determine current branch")]
    NoBranchResolved,

    #[error("Invalid branch name: {0}")]
    InvalidBranch(String),

    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-manager
pub type Result<T> = std::result::Result<T, GitManagerError>;

impl GitManagerError {
    /// Create a command failure from the argument vector that was run
    pub fn command_failed(args: &[&str], exit_code: i32, stderr: impl Into<String>) -> Self {
        GitManagerError::CommandFailed {
            args: args.iter().map(|arg| arg.to_string()).collect(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitManagerError::Config(msg.into())
    }

    /// Create a not-a-repository error with context
    pub fn not_a_repository(msg: impl Into<String>) -> Self {
        GitManagerError::NotARepository(msg.into())
    }

    /// Exit code of a failed git invocation, if this error is one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GitManagerError::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = GitManagerError::command_failed(&["push", "origin", "main"], 128, "fatal: no remote\n");
        assert_eq!(
            err.to_string(),
            "git push origin main failed with exit code 128: fatal: no remote"
        );
    }

    #[test]
    fn test_exit_code_only_for_command_failures() {
        let err = GitManagerError::command_failed(&["diff"], 1, "");
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(GitManagerError::NoBranchResolved.exit_code(), None);
    }

    #[test]
    fn test_invalid_branch_display() {
        let err = GitManagerError::InvalidBranch("--mirror".to_string());
        assert_eq!(err.to_string(), "Invalid branch name: --mirror");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not found");
        let err: GitManagerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitManagerError::config("x"), "Configuration error"),
            (GitManagerError::not_a_repository("x"), "Not a git repository"),
            (GitManagerError::NoBranchResolved, "Could not determine"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
