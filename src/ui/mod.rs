//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `interrupt` - Ctrl-C handling shared by prompts and the session loop
//! - `scripted` - Queued answers for headless sessions
//! - This module - The [Prompter] seam and prompt helpers built on it
//!
//! Every helper re-issues its prompt on unusable input instead of failing.
//! The only errors they return are I/O errors from the [Prompter], including
//! [io::ErrorKind::Interrupted] after Ctrl-C and
//! [io::ErrorKind::UnexpectedEof] when input is closed; see [is_interrupt].

use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use console::Term;

use crate::git_ops::Confirmation;

pub mod formatter;
pub mod interrupt;
pub mod scripted;

// Re-export formatter functions for convenience
pub use formatter::{
    display_banner, display_deletion_preview, display_deletion_report, display_error,
    display_goodbye, display_heading, display_menu, display_status, display_success,
    display_tag_table, display_warning,
};
pub use interrupt::InterruptToken;
pub use scripted::ScriptedPrompter;

const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source of line-based user input.
pub trait Prompter {
    /// Shows `prompt` and reads one line, without its line terminator.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads answers from the attached terminal.
///
/// Each line is read on a helper thread while this side polls the
/// [InterruptToken], so Ctrl-C ends a pending prompt with
/// [io::ErrorKind::Interrupted] whether input comes from a tty or a pipe.
/// The token only sees Ctrl-C once [InterruptToken::install] has run; without
/// it SIGINT keeps its default behavior. End of piped input is reported as
/// [io::ErrorKind::UnexpectedEof].
pub struct TerminalPrompter {
    term: Term,
    interrupt: InterruptToken,
}

impl TerminalPrompter {
    pub fn new(interrupt: InterruptToken) -> Self {
        TerminalPrompter {
            term: Term::stdout(),
            interrupt,
        }
    }

    fn check_interrupt(&self) -> io::Result<()> {
        if self.interrupt.is_triggered() {
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by user"))
        } else {
            Ok(())
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new(InterruptToken::new())
    }
}

fn read_input(term: &Term) -> io::Result<String> {
    if term.is_term() {
        return term.read_line();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ));
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.check_interrupt()?;
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let (tx, rx) = mpsc::channel();
        let term = self.term.clone();
        thread::spawn(move || {
            let _ = tx.send(read_input(&term));
        });

        loop {
            match rx.recv_timeout(INTERRUPT_POLL_INTERVAL) {
                Ok(result) => {
                    self.check_interrupt()?;
                    return result;
                }
                Err(RecvTimeoutError::Timeout) => self.check_interrupt()?,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input reader stopped",
                    ))
                }
            }
        }
    }
}

/// Whether an input error means the user wants out rather than a real failure.
pub fn is_interrupt(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
    )
}

fn with_default(prompt: &str, default: &str) -> String {
    if default.is_empty() {
        format!("{}: ", prompt)
    } else {
        format!("{} [{}]: ", prompt, default)
    }
}

/// Prompts for free text; empty input yields `default`.
pub fn prompt_text<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default: &str,
) -> io::Result<String> {
    let input = prompter.read_line(&with_default(prompt, default))?;
    let input = input.trim();
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Prompts for a non-negative number; empty input yields `default`.
///
/// Anything that is not a non-negative integer is reported and asked again.
pub fn prompt_count<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default: usize,
) -> io::Result<usize> {
    let full_prompt = with_default(prompt, &default.to_string());
    loop {
        let input = prompter.read_line(&full_prompt)?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(default);
        }
        match input.parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => display_error("Invalid input. Expected a non-negative number"),
        }
    }
}

/// Prompts for a numbered option between 1 and `max`; empty input yields `default`.
pub fn prompt_choice<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default: usize,
    max: usize,
) -> io::Result<usize> {
    loop {
        let choice = prompt_count(prompter, prompt, default)?;
        if (1..=max).contains(&choice) {
            return Ok(choice);
        }
        display_error(&format!("Invalid choice. Please select 1-{}.", max));
    }
}

/// Prompts a yes/no question.
///
/// Accepts "y", "yes", "true" or "1" (case-insensitive) as yes; empty input
/// yields `default`; anything else is no.
pub fn prompt_yes_no<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default: bool,
) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    let input = prompter.read_line(&format!("{} ({}): ", prompt, hint))?;
    let response = input.trim().to_lowercase();

    if response.is_empty() {
        return Ok(default);
    }
    Ok(matches!(response.as_str(), "y" | "yes" | "true" | "1"))
}

/// Asks the user to type `token` exactly (case-sensitive, surrounding
/// whitespace ignored). A blank token never confirms.
pub fn confirm_token<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    token: &str,
) -> io::Result<bool> {
    let token = token.trim();
    let input = prompter.read_line(&format!("{} Type '{}' to confirm: ", prompt, token))?;
    Ok(!token.is_empty() && input.trim() == token)
}

/// Adapts a [Prompter] into the yes/no [Confirmation] used by workflows.
pub struct PromptConfirmation<'a, P: Prompter + ?Sized> {
    prompter: &'a mut P,
}

impl<'a, P: Prompter + ?Sized> PromptConfirmation<'a, P> {
    pub fn new(prompter: &'a mut P) -> Self {
        PromptConfirmation { prompter }
    }
}

impl<P: Prompter + ?Sized> Confirmation for PromptConfirmation<'_, P> {
    fn confirm(&mut self, message: &str) -> crate::Result<bool> {
        display_warning(message);
        Ok(prompt_yes_no(&mut *self.prompter, "Are you sure?", false)?)
    }
}
