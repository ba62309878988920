/// Result of the staged-diff check.
///
/// `git diff --cached --quiet` exits 1 when something is staged, so a
/// "failed" check is the signal that a commit is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedChanges {
    /// Staged differences exist and should be committed
    Pending,
    /// Nothing is staged; the commit step is skipped
    Empty,
}

/// What a successful synchronize did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub branch: String,
    /// Message of the auto-commit, if one was created
    pub commit_message: Option<String>,
    pub forced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPhase {
    Local,
    Remote,
}

/// Outcome of deleting one tag in one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDeletion {
    pub tag: String,
    pub phase: DeletionPhase,
    /// Failure description, `None` when the deletion succeeded
    pub error: Option<String>,
}

impl TagDeletion {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-tag outcomes of a batch deletion, in processing order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletionReport {
    pub outcomes: Vec<TagDeletion>,
}

impl DeletionReport {
    pub fn record(&mut self, tag: &str, phase: DeletionPhase, error: Option<String>) {
        self.outcomes.push(TagDeletion {
            tag: tag.to_string(),
            phase,
            error,
        });
    }

    /// True when no deletion failed (vacuously true for an empty report)
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(TagDeletion::succeeded)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TagDeletion> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }

    pub fn phase(&self, phase: DeletionPhase) -> impl Iterator<Item = &TagDeletion> {
        self.outcomes.iter().filter(move |outcome| outcome.phase == phase)
    }
}
