//! Strongly-typed models for targets, commits, and audit reports.

mod commit;
mod report;
mod target;

pub use commit::{AccountRef, CommitDetail, CommitRecord, GitIdentity};
pub use report::{CargoDependencies, TargetReport, CARGO_NOT_APPLICABLE};
pub use target::{split_policy_list, Target, CARGO_MANAGER};
