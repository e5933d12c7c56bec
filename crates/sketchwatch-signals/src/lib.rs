//! Trust evaluation, collaborator tooling, and batch orchestration.
//!
//! The signal pipeline for one target:
//!
//! ```text
//! snapshot cache hit?
//!   yes -> load snapshot
//!   no  -> GithubClient::list_commits -> save snapshot
//! snapshot -> untrusted_commits (trust policy)
//! ToolSuite -> dependency counts / sketchy files / gitignore / tarball diff
//! all signals -> TargetReport (all-or-nothing per target)
//! ```
//!
//! The batch runner walks a catalog sequentially, isolating per-target
//! failures and persisting one timestamped result file at the end.

pub mod orchestrator;
pub mod runner;
pub mod tools;
pub mod trust;

#[cfg(test)]
pub(crate) mod testutil;

pub use orchestrator::audit_target;
pub use runner::{run_batch, save_reports, BatchOutcome, TargetFailure};
pub use sketchwatch_core::{AuditError, Result};
pub use tools::{DependencyCounts, ToolSuite, SATURATED_BUILD_DEPENDENCIES};
pub use trust::untrusted_commits;
