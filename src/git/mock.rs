use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::git::{CommandResult, CommandRunner};

/// Mock runner for testing without spawning git
///
/// Results are keyed by the exact argument vector. Unregistered commands
/// succeed with empty output. Every invocation is recorded in order.
pub struct MockRunner {
    responses: Mutex<HashMap<Vec<String>, CommandResult>>,
    calls: Mutex<Vec<Vec<String>>>,
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

impl MockRunner {
    /// Create a runner where every command succeeds silently
    pub fn new() -> Self {
        MockRunner {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register the result returned for an argument vector
    pub fn respond(&self, args: &[&str], result: CommandResult) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key(args), result);
    }

    /// Register a failing result for an argument vector
    pub fn fail(&self, args: &[&str], exit_code: i32, stderr: &str) {
        self.respond(args, CommandResult::failure(exit_code, stderr));
    }

    /// All invocations so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether the exact argument vector was run at least once
    pub fn was_called(&self, args: &[&str]) -> bool {
        let wanted = key(args);
        self.calls().iter().any(|call| *call == wanted)
    }

    /// Whether any invocation started with the given subcommand
    pub fn was_called_with_subcommand(&self, subcommand: &str) -> bool {
        self.calls()
            .iter()
            .any(|call| call.first().map(String::as_str) == Some(subcommand))
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn execute(&self, args: &[&str]) -> Result<CommandResult> {
        let args = key(args);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(args.clone());

        let responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(responses.get(&args).cloned().unwrap_or_default())
    }
}
