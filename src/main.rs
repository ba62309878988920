use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_manager::cli::Session;
use git_manager::config;
use git_manager::git::GitCommandRunner;
use git_manager::git_ops::GitManager;
use git_manager::ui::{self, InterruptToken, TerminalPrompter};

#[derive(clap::Parser)]
#[command(
    name = "git-manager",
    version,
    about = "Push pending work and clean up release tags interactively"
)]
struct Args {
    #[arg(short = 'C', long, help = "Path of the git repository to manage")]
    repo: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Show git commands as they run")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("git_manager=debug")
        } else {
            EnvFilter::new("git_manager=info")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let interrupt = match InterruptToken::install() {
        Ok(token) => token,
        Err(e) => {
            ui::display_error(&format!("Could not install Ctrl-C handler: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            return ExitCode::FAILURE;
        }
    };

    ui::display_banner();

    let repo_path = args.repo.unwrap_or_else(|| PathBuf::from("."));
    let manager = GitManager::new(GitCommandRunner::new(repo_path), &config);

    if let Err(e) = manager.check_repository() {
        ui::display_error(&e.to_string());
        return ExitCode::FAILURE;
    }

    let prompter = TerminalPrompter::new(interrupt.clone());
    let mut session = Session::new(&manager, prompter, &config).with_interrupt(interrupt);
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("Unexpected error: {}", e));
            ExitCode::FAILURE
        }
    }
}
