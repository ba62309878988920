/// What to push and how
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushPlan {
    /// Branch to push; empty means the currently checked out branch
    pub branch: String,
    pub force: bool,
}

impl PushPlan {
    pub fn new(branch: impl Into<String>, force: bool) -> Self {
        PushPlan {
            branch: branch.into(),
            force,
        }
    }

    /// Push whatever branch is checked out
    pub fn current_branch(force: bool) -> Self {
        PushPlan {
            branch: String::new(),
            force,
        }
    }
}

/// Whether `name` can be passed to git as a branch without being read as an
/// option or split into several arguments.
pub fn is_valid_branch_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.chars().any(char::is_whitespace)
}

/// Where tags get deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionScope {
    Both,
    LocalOnly,
    RemoteOnly,
}

impl DeletionScope {
    pub fn deletes_local(self) -> bool {
        matches!(self, DeletionScope::Both | DeletionScope::LocalOnly)
    }

    pub fn deletes_remote(self) -> bool {
        matches!(self, DeletionScope::Both | DeletionScope::RemoteOnly)
    }

    /// Human readable location, e.g. "locally and remotely"
    pub fn describe(self) -> &'static str {
        match self {
            DeletionScope::Both => "locally and remotely",
            DeletionScope::LocalOnly => "locally",
            DeletionScope::RemoteOnly => "remotely",
        }
    }
}

/// An ordered batch of tags to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    pub tags: Vec<String>,
    pub delete_local: bool,
    pub delete_remote: bool,
}

impl DeletionPlan {
    pub fn new(tags: Vec<String>, scope: DeletionScope) -> Self {
        DeletionPlan {
            tags,
            delete_local: scope.deletes_local(),
            delete_remote: scope.deletes_remote(),
        }
    }

    /// A plan with nothing to delete or nowhere to delete it
    pub fn is_noop(&self) -> bool {
        self.tags.is_empty() || !(self.delete_local || self.delete_remote)
    }
}
