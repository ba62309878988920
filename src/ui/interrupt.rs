use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

/// Shared flag raised when the user presses Ctrl-C.
///
/// Once [InterruptToken::install] has registered the handler, SIGINT no longer
/// terminates the process. Prompts and the session loop poll the token and
/// wind down on their own, so a git command that is already running is
/// allowed to finish first.
#[derive(Debug, Clone, Default)]
pub struct InterruptToken {
    triggered: Arc<AtomicBool>,
}

impl InterruptToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token and routes Ctrl-C to it for the rest of the process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let token = InterruptToken::new();
        let handler_token = token.clone();
        ctrlc::set_handler(move || {
            warn!("Received Ctrl+C, ending session...");
            handler_token.trigger();
        })?;
        Ok(token)
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}
