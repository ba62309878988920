//! Interactive menu loop
//!
//! The session moves between [SessionState]s until the user exits. Workflow
//! failures are reported and the session carries on; only input errors other
//! than an interrupt leave [Session::run] as errors. A Ctrl-C that lands while
//! git is running takes effect once that flow returns.

use std::io;

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::domain::{is_valid_branch_name, DeletionPlan, DeletionScope, PushPlan};
use crate::git::CommandRunner;
use crate::git_ops::GitManager;
use crate::ui::{self, InterruptToken, Prompter};

/// Where the session is in its menu loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Push,
    ListTags,
    DeleteTags,
    /// A flow finished; offer to continue or quit
    Continue,
    Exit,
}

/// A main menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Push,
    ListTags,
    DeleteTags,
    Exit,
}

impl MenuChoice {
    pub fn from_input(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::Push),
            "2" => Some(MenuChoice::ListTags),
            "3" => Some(MenuChoice::DeleteTags),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    fn next_state(self) -> SessionState {
        match self {
            MenuChoice::Push => SessionState::Push,
            MenuChoice::ListTags => SessionState::ListTags,
            MenuChoice::DeleteTags => SessionState::DeleteTags,
            MenuChoice::Exit => SessionState::Exit,
        }
    }
}

/// Maps the deletion option number to a scope; `None` cancels.
fn scope_from_choice(choice: usize) -> Option<DeletionScope> {
    match choice {
        1 => Some(DeletionScope::Both),
        2 => Some(DeletionScope::LocalOnly),
        3 => Some(DeletionScope::RemoteOnly),
        _ => None,
    }
}

pub struct Session<'a, R: CommandRunner, P: Prompter> {
    manager: &'a GitManager<R>,
    prompter: P,
    config: &'a Config,
    interrupt: InterruptToken,
}

impl<'a, R: CommandRunner, P: Prompter> Session<'a, R, P> {
    pub fn new(manager: &'a GitManager<R>, prompter: P, config: &'a Config) -> Self {
        Session {
            manager,
            prompter,
            config,
            interrupt: InterruptToken::new(),
        }
    }

    /// Ends the session at the next state change once `interrupt` fires.
    pub fn with_interrupt(mut self, interrupt: InterruptToken) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Runs the menu loop until the user exits or interrupts.
    ///
    /// # Returns
    /// * `Ok(())` - Graceful exit, including Ctrl-C or closed input
    /// * `Err` - An input error that is not an interrupt
    pub fn run(&mut self) -> Result<()> {
        let mut state = SessionState::Menu;

        while state != SessionState::Exit {
            if self.interrupt.is_triggered() {
                debug!("Interrupted between steps");
                println!();
                break;
            }
            state = match self.step(state) {
                Ok(next) => next,
                Err(e) if ui::is_interrupt(&e) => {
                    debug!("Input interrupted: {}", e);
                    println!();
                    SessionState::Exit
                }
                Err(e) => return Err(e.into()),
            };
        }

        ui::display_goodbye();
        Ok(())
    }

    /// Performs one state's work and returns the state that follows.
    pub fn step(&mut self, state: SessionState) -> io::Result<SessionState> {
        match state {
            SessionState::Menu => self.menu(),
            SessionState::Push => {
                self.push_flow()?;
                Ok(SessionState::Continue)
            }
            SessionState::ListTags => {
                self.list_flow()?;
                Ok(SessionState::Continue)
            }
            SessionState::DeleteTags => {
                self.delete_flow()?;
                Ok(SessionState::Continue)
            }
            SessionState::Continue => self.continue_or_quit(),
            SessionState::Exit => Ok(SessionState::Exit),
        }
    }

    fn menu(&mut self) -> io::Result<SessionState> {
        ui::display_menu();
        loop {
            let input = ui::prompt_text(&mut self.prompter, "Select an option (1-4)", "4")?;
            match MenuChoice::from_input(&input) {
                Some(choice) => return Ok(choice.next_state()),
                None => ui::display_error("Invalid choice. Please select 1-4."),
            }
        }
    }

    fn continue_or_quit(&mut self) -> io::Result<SessionState> {
        let input = self
            .prompter
            .read_line("\nPress Enter to continue or 'q' to quit: ")?;
        if input.trim().eq_ignore_ascii_case("q") {
            Ok(SessionState::Exit)
        } else {
            Ok(SessionState::Menu)
        }
    }

    fn push_flow(&mut self) -> io::Result<()> {
        ui::display_heading("PUSH CHANGES TO REMOTE");

        let current_branch = match self.manager.current_branch() {
            Ok(branch) if !branch.is_empty() => {
                println!("Current branch: {}", branch);
                branch
            }
            _ => self.config.behavior.fallback_branch.clone(),
        };

        let branch = loop {
            let branch =
                ui::prompt_text(&mut self.prompter, "Branch to push to", &current_branch)?;
            if is_valid_branch_name(&branch) {
                break branch;
            }
            ui::display_error(&format!("Invalid branch name: {}", branch));
        };
        let force = ui::prompt_yes_no(&mut self.prompter, "Force push?", false)?;

        if force {
            ui::display_warning("Force push can overwrite remote history.");
            if !ui::prompt_yes_no(&mut self.prompter, "Continue?", false)? {
                ui::display_status("Operation cancelled");
                return Ok(());
            }
        }

        ui::display_status(&format!(
            "Pushing changes to {}/{}...",
            self.manager.remote(),
            branch
        ));
        if self.manager.synchronize(&PushPlan::new(branch.as_str(), force)) {
            ui::display_success(&format!(
                "Successfully pushed to {}/{}",
                self.manager.remote(),
                branch
            ));
        } else {
            ui::display_error("Push failed!");
        }
        Ok(())
    }

    fn list_flow(&mut self) -> io::Result<()> {
        ui::display_heading("LIST RECENT TAGS");

        let count = ui::prompt_count(
            &mut self.prompter,
            "Number of tags to show",
            self.config.tags.default_count,
        )?;
        let tags = self.manager.list_recent_tags(count);
        ui::display_tag_table(
            &tags,
            self.config.tags.name_width,
            self.config.tags.subject_width,
        );
        Ok(())
    }

    fn delete_flow(&mut self) -> io::Result<()> {
        ui::display_heading("DELETE TAGS");

        let count = ui::prompt_count(
            &mut self.prompter,
            "Number of recent tags to show/delete",
            self.config.tags.default_count,
        )?;
        let tags = self.manager.list_recent_tags(count);
        if tags.is_empty() {
            ui::display_status("No tags to delete");
            return Ok(());
        }
        ui::display_tag_table(
            &tags,
            self.config.tags.name_width,
            self.config.tags.subject_width,
        );

        println!("\nDeletion options:");
        println!("1. Delete both locally and remotely (recommended)");
        println!("2. Delete only locally");
        println!("3. Delete only remotely");
        println!("4. Cancel");
        let choice = ui::prompt_choice(&mut self.prompter, "Choose option (1-4)", 1, 4)?;
        let Some(scope) = scope_from_choice(choice) else {
            ui::display_status("Operation cancelled");
            return Ok(());
        };

        let names: Vec<String> = tags.into_iter().map(|tag| tag.name).collect();
        ui::display_deletion_preview(&names, scope);

        let token = &self.config.behavior.delete_confirmation_token;
        if !ui::confirm_token(&mut self.prompter, "Are you absolutely sure?", token)? {
            ui::display_status("Operation cancelled");
            return Ok(());
        }

        let report = self.manager.delete_tags_report(&DeletionPlan::new(names, scope));
        ui::display_deletion_report(&report);
        if report.succeeded() {
            ui::display_success("Tags deleted successfully!");
        } else {
            ui::display_error(&format!(
                "{} tag deletions failed!",
                report.failures().count()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{CommandResult, MockRunner};
    use crate::ui::ScriptedPrompter;

    const TAG_LIST_ARGS: &[&str] = &[
        "tag",
        "--sort=-creatordate",
        "--format=%(refname:strip=2)|%(creatordate:short)|%(subject)",
    ];

    fn manager_with_tags(output: &str) -> GitManager<MockRunner> {
        let runner = MockRunner::new();
        runner.respond(TAG_LIST_ARGS, CommandResult::success(output));
        runner.respond(&["branch", "--show-current"], CommandResult::success("main\n"));
        GitManager::new(runner, &Config::default())
    }

    fn run_session(manager: &GitManager<MockRunner>, answers: &[&str]) -> usize {
        let config = Config::default();
        let mut session = Session::new(manager, ScriptedPrompter::new(answers.iter().copied()), &config);
        session.run().unwrap();
        session.prompter().remaining()
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::from_input("1"), Some(MenuChoice::Push));
        assert_eq!(MenuChoice::from_input(" 3 "), Some(MenuChoice::DeleteTags));
        assert_eq!(MenuChoice::from_input("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_input("5"), None);
        assert_eq!(MenuChoice::from_input("push"), None);
    }

    #[test]
    fn test_scope_from_choice() {
        assert_eq!(scope_from_choice(1), Some(DeletionScope::Both));
        assert_eq!(scope_from_choice(2), Some(DeletionScope::LocalOnly));
        assert_eq!(scope_from_choice(3), Some(DeletionScope::RemoteOnly));
        assert_eq!(scope_from_choice(4), None);
    }

    #[test]
    fn test_exit_from_menu() {
        let manager = manager_with_tags("");
        assert_eq!(run_session(&manager, &["4"]), 0);
        assert!(manager.runner().calls().is_empty());
    }

    #[test]
    fn test_empty_menu_input_exits() {
        let manager = manager_with_tags("");
        assert_eq!(run_session(&manager, &[""]), 0);
    }

    #[test]
    fn test_interrupt_exits_gracefully() {
        let manager = manager_with_tags("");
        assert_eq!(run_session(&manager, &[]), 0);
    }

    #[test]
    fn test_invalid_menu_choice_reprompts() {
        let manager = manager_with_tags("");
        let config = Config::default();
        let mut session = Session::new(&manager, ScriptedPrompter::new(["9", "abc", "4"]), &config);
        session.run().unwrap();
        assert_eq!(
            session.prompter().prompts(),
            [
                "Select an option (1-4) [4]: ",
                "Select an option (1-4) [4]: ",
                "Select an option (1-4) [4]: ",
            ]
        );
    }

    #[test]
    fn test_push_flow_defaults() {
        let manager = manager_with_tags("");
        run_session(&manager, &["1", "", "", "q"]);
        assert!(manager.runner().was_called(&["push", "origin", "main"]));
    }

    #[test]
    fn test_push_flow_reprompts_for_option_like_branch() {
        let manager = manager_with_tags("");
        run_session(&manager, &["1", "--mirror", "-d", "release", "", "q"]);
        assert!(manager.runner().was_called(&["push", "origin", "release"]));
        assert!(!manager
            .runner()
            .calls()
            .iter()
            .any(|call| call.iter().any(|arg| arg == "--mirror" || arg == "-d")));
    }

    #[test]
    fn test_interrupt_before_first_prompt() {
        let manager = manager_with_tags("");
        let config = Config::default();
        let interrupt = InterruptToken::new();
        interrupt.trigger();

        let mut session = Session::new(&manager, ScriptedPrompter::new(["1"]), &config)
            .with_interrupt(interrupt);
        session.run().unwrap();

        assert!(session.prompter().prompts().is_empty());
        assert!(manager.runner().calls().is_empty());
    }

    #[test]
    fn test_force_push_declined() {
        let manager = manager_with_tags("");
        run_session(&manager, &["1", "feature", "y", "n", "q"]);
        assert!(!manager.runner().was_called_with_subcommand("add"));
        assert!(!manager.runner().was_called_with_subcommand("push"));
    }

    #[test]
    fn test_force_push_confirmed() {
        let manager = manager_with_tags("");
        run_session(&manager, &["1", "feature", "y", "y", "q"]);
        assert!(manager
            .runner()
            .was_called(&["push", "origin", "feature", "--force"]));
    }

    #[test]
    fn test_list_flow_then_menu_again() {
        let manager = manager_with_tags("v2|2024-02-01|Two\nv1|2024-01-01|One\n");
        assert_eq!(run_session(&manager, &["2", "1", "", "4"]), 0);
        assert!(manager.runner().was_called(TAG_LIST_ARGS));
    }

    #[test]
    fn test_delete_flow_requires_token() {
        let manager = manager_with_tags("v2|2024-02-01|Two\nv1|2024-01-01|One\n");
        run_session(&manager, &["3", "2", "1", "delete", "q"]);
        assert!(!manager.runner().was_called_with_subcommand("push"));
        assert!(!manager.runner().was_called(&["tag", "-d", "v2"]));
    }

    #[test]
    fn test_delete_flow_local_only() {
        let manager = manager_with_tags("v2|2024-02-01|Two\nv1|2024-01-01|One\n");
        run_session(&manager, &["3", "2", "2", "DELETE", "q"]);
        assert!(manager.runner().was_called(&["tag", "-d", "v2"]));
        assert!(manager.runner().was_called(&["tag", "-d", "v1"]));
        assert!(!manager.runner().was_called_with_subcommand("push"));
    }

    #[test]
    fn test_delete_flow_cancel_option() {
        let manager = manager_with_tags("v1|2024-01-01|One\n");
        assert_eq!(run_session(&manager, &["3", "", "4", "q"]), 0);
        assert!(!manager.runner().was_called(&["tag", "-d", "v1"]));
    }

    #[test]
    fn test_delete_flow_without_tags() {
        let manager = manager_with_tags("");
        assert_eq!(run_session(&manager, &["3", "5", "q"]), 0);
    }
}
