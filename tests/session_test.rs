// tests/session_test.rs
use git_manager::cli::{Session, SessionState};
use git_manager::config::Config;
use git_manager::git::{CommandResult, CommandRunner, MockRunner};
use git_manager::git_ops::GitManager;
use git_manager::ui::{InterruptToken, PromptConfirmation, ScriptedPrompter};

const TAG_LIST_ARGS: &[&str] = &[
    "tag",
    "--sort=-creatordate",
    "--format=%(refname:strip=2)|%(creatordate:short)|%(subject)",
];

fn manager(tag_output: &str, config: &Config) -> GitManager<MockRunner> {
    let runner = MockRunner::new();
    runner.respond(TAG_LIST_ARGS, CommandResult::success(tag_output));
    runner.respond(
        &["branch", "--show-current"],
        CommandResult::success("main\n"),
    );
    GitManager::new(runner, config)
}

/// Runner that fires the interrupt token while a push is in flight.
struct InterruptingRunner {
    inner: MockRunner,
    interrupt: InterruptToken,
}

impl CommandRunner for InterruptingRunner {
    fn execute(&self, args: &[&str]) -> git_manager::Result<CommandResult> {
        if args.first() == Some(&"push") {
            self.interrupt.trigger();
        }
        self.inner.execute(args)
    }
}

#[test]
fn test_step_transitions() {
    let config = Config::default();
    let manager = manager("", &config);
    let prompter = ScriptedPrompter::new(["2", "", ""]);
    let mut session = Session::new(&manager, prompter, &config);

    assert_eq!(session.step(SessionState::Menu).unwrap(), SessionState::ListTags);
    assert_eq!(
        session.step(SessionState::ListTags).unwrap(),
        SessionState::Continue
    );
    assert_eq!(session.step(SessionState::Continue).unwrap(), SessionState::Menu);
    assert_eq!(session.step(SessionState::Exit).unwrap(), SessionState::Exit);
}

#[test]
fn test_quit_after_flow() {
    let config = Config::default();
    let manager = manager("", &config);
    let mut session = Session::new(&manager, ScriptedPrompter::new(["2", "", "Q"]), &config);

    session.run().unwrap();
    assert_eq!(session.prompter().remaining(), 0);
}

#[test]
fn test_interrupt_during_push_finishes_then_exits() {
    let config = Config::default();
    let interrupt = InterruptToken::new();
    let runner = InterruptingRunner {
        inner: MockRunner::new(),
        interrupt: interrupt.clone(),
    };
    let manager = GitManager::new(runner, &config);
    let prompter = ScriptedPrompter::new(["1", "feature", "", "", "4"]);
    let mut session = Session::new(&manager, prompter, &config).with_interrupt(interrupt);

    session.run().unwrap();

    assert!(manager
        .runner()
        .inner
        .was_called(&["push", "origin", "feature"]));
    // The continue prompt and the menu are never shown again.
    assert_eq!(session.prompter().remaining(), 2);
}

#[test]
fn test_interrupt_mid_flow_runs_nothing() {
    let config = Config::default();
    let manager = manager("v1|2024-01-01|One\n", &config);
    let mut session = Session::new(&manager, ScriptedPrompter::new(["3", "1", "1"]), &config);

    session.run().unwrap();
    assert!(!manager.runner().was_called(&["tag", "-d", "v1"]));
    assert!(!manager.runner().was_called_with_subcommand("push"));
}

#[test]
fn test_blank_token_cannot_be_confirmed_with_enter() {
    let mut config = Config::default();
    config.behavior.delete_confirmation_token = String::new();
    let manager = manager("v1|2024-01-01|One\n", &config);

    let mut session = Session::new(&manager, ScriptedPrompter::new(["3", "", "", "", "q"]), &config);
    session.run().unwrap();

    assert!(!manager.runner().was_called(&["tag", "-d", "v1"]));
    assert!(!manager.runner().was_called_with_subcommand("push"));
    assert!(git_manager::config::parse_config(
        "[behavior]\ndelete_confirmation_token = \"\"\n"
    )
    .is_err());
}

#[test]
fn test_configured_token_and_remote() {
    let mut config = Config::default();
    config.remote = "upstream".to_string();
    config.behavior.delete_confirmation_token = "YES-DELETE".to_string();
    let manager = manager("v2|2024-02-01|Two\nv1|2024-01-01|One\n", &config);

    let answers = ["3", "1", "3", "DELETE", "", "3", "1", "3", "YES-DELETE", "q"];
    let mut session = Session::new(&manager, ScriptedPrompter::new(answers), &config);
    session.run().unwrap();

    assert!(manager
        .runner()
        .was_called(&["push", "upstream", ":refs/tags/v2"]));
    assert!(!manager.runner().was_called(&["push", "upstream", ":refs/tags/v1"]));
    assert!(!manager.runner().was_called(&["tag", "-d", "v2"]));
}

#[test]
fn test_failed_deletions_return_to_menu() {
    let config = Config::default();
    let manager = manager("v2|2024-02-01|Two\nv1|2024-01-01|One\n", &config);
    manager
        .runner()
        .fail(&["push", "origin", ":refs/tags/v2"], 1, "remote rejected");

    let answers = ["3", "", "1", "DELETE", "", "4"];
    let mut session = Session::new(&manager, ScriptedPrompter::new(answers), &config);
    session.run().unwrap();

    assert!(manager.runner().was_called(&["push", "origin", ":refs/tags/v1"]));
    assert_eq!(session.prompter().remaining(), 0);
}

#[test]
fn test_delete_all_recent_through_prompt_confirmation() {
    let config = Config::default();
    let manager = manager("v3|2024-03-01|Three\nv2|2024-02-01|Two\n", &config);

    let mut prompter = ScriptedPrompter::new(["no"]);
    let mut confirmation = PromptConfirmation::new(&mut prompter);
    assert!(!manager.delete_all_recent(2, Some(&mut confirmation)));
    assert!(!manager.runner().was_called(&["tag", "-d", "v3"]));

    let mut prompter = ScriptedPrompter::new(["yes"]);
    let mut confirmation = PromptConfirmation::new(&mut prompter);
    assert!(manager.delete_all_recent(2, Some(&mut confirmation)));
    assert!(manager.runner().was_called(&["tag", "-d", "v3"]));
    assert!(manager.runner().was_called(&["push", "origin", ":refs/tags/v2"]));
}
