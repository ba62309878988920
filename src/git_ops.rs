use chrono::Local;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::{
    is_valid_branch_name, DeletionPhase, DeletionPlan, DeletionReport, DeletionScope, PushPlan,
    StagedChanges, SyncOutcome, TagRecord,
};
use crate::error::{GitManagerError, Result};
use crate::git::CommandRunner;

// Git command arguments
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
const GIT_CURRENT_BRANCH_ARGS: &[&str] = &["branch", "--show-current"];
const GIT_ADD_ALL_ARGS: &[&str] = &["add", "--all"];
const GIT_DIFF_CACHED_ARGS: &[&str] = &["diff", "--cached", "--quiet"];
const GIT_TAG_LIST_ARGS: &[&str] = &[
    "tag",
    "--sort=-creatordate",
    "--format=%(refname:strip=2)|%(creatordate:short)|%(subject)",
];

/// Exit code of `git diff --quiet` when differences exist
const DIFF_HAS_CHANGES_EXIT_CODE: i32 = 1;

const AUTO_COMMIT_PREFIX: &str = "Auto-commit: ";

/// Answers a yes/no question before a destructive action.
pub trait Confirmation {
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Builds the auto-commit message for the current local time.
pub fn auto_commit_message() -> String {
    format!(
        "{}{}",
        AUTO_COMMIT_PREFIX,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Push, tag listing and tag deletion workflows over a [CommandRunner].
///
/// Workflow entry points (`synchronize`, `list_recent_tags`, `delete_tags`,
/// `delete_all_recent`) never return errors: failures are logged and turned
/// into `false` or an empty list so an interactive caller can carry on. The
/// `try_*` variants expose the underlying errors.
pub struct GitManager<R: CommandRunner> {
    runner: R,
    remote: String,
}

impl<R: CommandRunner> GitManager<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        GitManager {
            runner,
            remote: config.remote.clone(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Checks that the working directory is inside a git repository.
    ///
    /// # Returns
    /// * `Ok(())` - `git status` succeeded
    /// * `Err(GitManagerError::NotARepository)` - git failed or could not run
    pub fn check_repository(&self) -> Result<()> {
        match self.runner.run(GIT_STATUS_PORCELAIN_ARGS) {
            Ok(_) => Ok(()),
            Err(GitManagerError::CommandFailed { stderr, .. }) => {
                Err(GitManagerError::not_a_repository(stderr.trim().to_string()))
            }
            Err(e) => Err(GitManagerError::not_a_repository(e.to_string())),
        }
    }

    /// Name of the checked out branch; empty on a detached HEAD.
    pub fn current_branch(&self) -> Result<String> {
        let result = self.runner.run(GIT_CURRENT_BRANCH_ARGS)?;
        Ok(result.stdout.trim().to_string())
    }

    fn resolve_branch(&self, requested: &str) -> Result<String> {
        let requested = requested.trim();
        if !requested.is_empty() {
            if !is_valid_branch_name(requested) {
                return Err(GitManagerError::InvalidBranch(requested.to_string()));
            }
            return Ok(requested.to_string());
        }

        let current = self.current_branch()?;
        if current.is_empty() {
            return Err(GitManagerError::NoBranchResolved);
        }
        Ok(current)
    }

    /// Checks whether the index holds anything to commit.
    pub fn staged_changes(&self) -> Result<StagedChanges> {
        match self.runner.run(GIT_DIFF_CACHED_ARGS) {
            Ok(_) => Ok(StagedChanges::Empty),
            Err(e) if e.exit_code() == Some(DIFF_HAS_CHANGES_EXIT_CODE) => {
                Ok(StagedChanges::Pending)
            }
            Err(e) => Err(e),
        }
    }

    /// Stage everything, commit if needed, and push the branch.
    pub fn try_synchronize(&self, plan: &PushPlan) -> Result<SyncOutcome> {
        let branch = self.resolve_branch(&plan.branch)?;
        info!(branch = %branch, "Pushing to branch");

        self.runner.run(GIT_ADD_ALL_ARGS)?;

        let commit_message = match self.staged_changes()? {
            StagedChanges::Empty => {
                info!("No changes to commit");
                None
            }
            StagedChanges::Pending => {
                let message = auto_commit_message();
                self.runner.run(&["commit", "-m", message.as_str()])?;
                info!(message = %message, "Committed changes");
                Some(message)
            }
        };

        let mut push_args = vec!["push", self.remote.as_str(), branch.as_str()];
        if plan.force {
            warn!(branch = %branch, "Force pushing");
            push_args.push("--force");
        }
        self.runner.run(&push_args)?;
        info!(remote = %self.remote, branch = %branch, "Pushed");

        Ok(SyncOutcome {
            branch,
            commit_message,
            forced: plan.force,
        })
    }

    /// Runs [GitManager::try_synchronize], logging any failure.
    ///
    /// Returns `true` only if every executed step succeeded.
    pub fn synchronize(&self, plan: &PushPlan) -> bool {
        match self.try_synchronize(plan) {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to push changes: {}", e);
                false
            }
        }
    }

    /// Lists up to `count` tags, newest first as ordered by git.
    pub fn try_list_recent_tags(&self, count: usize) -> Result<Vec<TagRecord>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let result = self.runner.run(GIT_TAG_LIST_ARGS)?;
        Ok(result
            .stdout
            .lines()
            .filter_map(TagRecord::parse_line)
            .take(count)
            .collect())
    }

    /// Runs [GitManager::try_list_recent_tags], logging failures and
    /// returning an empty list instead.
    pub fn list_recent_tags(&self, count: usize) -> Vec<TagRecord> {
        match self.try_list_recent_tags(count) {
            Ok(tags) => tags,
            Err(e) => {
                error!("Failed to get tags: {}", e);
                Vec::new()
            }
        }
    }

    fn delete_phase(
        &self,
        plan: &DeletionPlan,
        phase: DeletionPhase,
        report: &mut DeletionReport,
    ) {
        for tag in &plan.tags {
            let outcome = match phase {
                DeletionPhase::Local => self.runner.run(&["tag", "-d", tag.as_str()]),
                DeletionPhase::Remote => {
                    let refspec = format!(":refs/tags/{}", tag);
                    self.runner.run(&["push", self.remote.as_str(), refspec.as_str()])
                }
            };

            match outcome {
                Ok(_) => {
                    info!(tag = %tag, phase = ?phase, "Deleted tag");
                    report.record(tag, phase, None);
                }
                Err(e) => {
                    warn!(tag = %tag, phase = ?phase, "Failed to delete tag: {}", e);
                    report.record(tag, phase, Some(e.to_string()));
                }
            }
        }
    }

    /// Deletes the plan's tags and reports every per-tag outcome.
    ///
    /// Local deletions all run before remote ones; a failing tag never stops
    /// the rest of the batch.
    pub fn delete_tags_report(&self, plan: &DeletionPlan) -> DeletionReport {
        let mut report = DeletionReport::default();
        if plan.is_noop() {
            info!("No tags to delete");
            return report;
        }

        if plan.delete_local {
            info!(count = plan.tags.len(), "Deleting tags locally");
            self.delete_phase(plan, DeletionPhase::Local, &mut report);
        }

        if plan.delete_remote {
            info!(count = plan.tags.len(), remote = %self.remote, "Deleting tags from remote");
            self.delete_phase(plan, DeletionPhase::Remote, &mut report);
        }

        report
    }

    /// Deletes the plan's tags; `false` if any single deletion failed.
    pub fn delete_tags(&self, plan: &DeletionPlan) -> bool {
        self.delete_tags_report(plan).succeeded()
    }

    /// Deletes the `count` most recent tags both locally and remotely.
    ///
    /// With a confirmation provider, nothing is deleted unless it answers yes.
    pub fn delete_all_recent(
        &self,
        count: usize,
        confirmation: Option<&mut dyn Confirmation>,
    ) -> bool {
        let tags = self.list_recent_tags(count);
        if tags.is_empty() {
            return true;
        }

        let names: Vec<String> = tags.into_iter().map(|tag| tag.name).collect();

        if let Some(confirmation) = confirmation {
            let message = format!(
                "This will delete {} tags both locally and remotely: {}. Are you sure?",
                names.len(),
                names.join(", ")
            );
            match confirmation.confirm(&message) {
                Ok(true) => {}
                Ok(false) => {
                    info!("Operation cancelled");
                    return false;
                }
                Err(e) => {
                    warn!("Confirmation failed, nothing deleted: {}", e);
                    return false;
                }
            }
        }

        self.delete_tags(&DeletionPlan::new(names, DeletionScope::Both))
    }
}
