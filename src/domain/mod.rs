//! Domain types - plans, records and reports independent of how git is run

pub mod plan;
pub mod report;
pub mod tag;

pub use plan::{is_valid_branch_name, DeletionPlan, DeletionScope, PushPlan};
pub use report::{DeletionPhase, DeletionReport, StagedChanges, SyncOutcome, TagDeletion};
pub use tag::{TagRecord, TAG_FIELD_SEPARATOR};
