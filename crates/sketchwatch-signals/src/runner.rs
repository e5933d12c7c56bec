//! Batch execution across a whole target catalog.

use crate::orchestrator::audit_target;
use crate::tools::ToolSuite;
use serde::{Deserialize, Serialize};
use sketchwatch_core::{Result, Target, TargetReport};
use sketchwatch_github::GithubClient;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// One target that could not be audited, with the reason it failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetFailure {
    /// The failing target's repository URL
    pub repository_url: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Everything a batch run produced.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Reports for targets that fully succeeded, in catalog order
    pub reports: Vec<TargetReport>,
    /// Targets excluded from the result sequence
    pub failures: Vec<TargetFailure>,
    /// Wall-clock time for the whole batch
    pub elapsed: Duration,
}

/// Run the orchestrator over every target, sequentially.
///
/// A target's failure is recorded and the batch moves on; only catalog-level
/// problems (handled before this point) abort a run. The accumulator is
/// local to this call, so nothing here blocks a later move to concurrent
/// workers beyond the shared snapshot directory itself.
pub async fn run_batch(
    targets: &[Target],
    client: &GithubClient,
    tools: &ToolSuite,
    snapshot_dir: &Path,
    refetch: bool,
) -> BatchOutcome {
    let started = Instant::now();
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for target in targets {
        match audit_target(target, client, tools, snapshot_dir, refetch).await {
            Ok(report) => {
                info!(repository_url = %target.repository_url, "target audit complete");
                reports.push(report);
            }
            Err(e) => {
                error!(repository_url = %target.repository_url, error = %e, "target audit failed");
                failures.push(TargetFailure {
                    repository_url: target.repository_url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let elapsed = started.elapsed();
    info!(
        succeeded = reports.len(),
        failed = failures.len(),
        elapsed_secs = elapsed.as_secs_f64(),
        "batch complete"
    );
    BatchOutcome {
        reports,
        failures,
        elapsed,
    }
}

/// Persist the full result sequence as `results_<timestamp>.json`.
///
/// Written once, after the batch; returns the path written.
pub fn save_reports(dir: &Path, reports: &[TargetReport]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("results_{stamp}.json"));
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), count = reports.len(), "saved batch results");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_target, write_standard_tools, write_tool};
    use sketchwatch_core::CargoDependencies;
    use sketchwatch_github::snapshot::{save_snapshot, snapshot_path};

    #[tokio::test]
    async fn one_failing_target_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let tools_dir = dir.path().join("helper-scripts");
        let snapshot_dir = dir.path().join("results");
        std::fs::create_dir_all(&tools_dir).unwrap();
        write_standard_tools(&tools_dir);
        // The counter rejects exactly the second target's package.
        write_tool(
            &tools_dir,
            "dependency_counter_apt.sh",
            "if [ \"$1\" = \"two\" ]; then exit 1; fi; echo \"5 12 300\"",
        );

        let targets = vec![
            sample_target("o", "one", "apt"),
            sample_target("o", "two", "apt"),
            sample_target("o", "three", "apt"),
        ];
        for target in &targets {
            save_snapshot(
                &snapshot_path(&snapshot_dir, &target.owner, &target.repository_name),
                &[],
            )
            .unwrap();
        }

        let client = GithubClient::builder(Some("tkn".into())).build();
        let tools = ToolSuite::new(&tools_dir, dir.path().join("tmp"));
        let outcome = run_batch(&targets, &client, &tools, &snapshot_dir, false).await;

        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(
            outcome.failures[0].repository_url,
            "https://github.com/o/two.git"
        );
        assert_eq!(outcome.reports[0].repository_url, "https://github.com/o/one.git");
        assert_eq!(outcome.reports[1].repository_url, "https://github.com/o/three.git");
    }

    #[tokio::test]
    async fn saved_reports_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let reports = vec![sketchwatch_core::TargetReport {
            repository_url: "https://github.com/o/r.git".into(),
            commits_from_untrusted_maintainer: 0,
            build_dependencies: "5".into(),
            package_dependencies: "12".into(),
            package_reverse_dependencies: "300".into(),
            cargo_dependencies: CargoDependencies::NotApplicable,
            sketchy_files: "0".into(),
            sketchy_files_in_gitignore: None,
            sketchy_file_types: "0".into(),
            differences_in_tarball: "0".into(),
        }];

        let path = save_reports(dir.path(), &reports).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("results_"));
        let loaded: Vec<sketchwatch_core::TargetReport> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(loaded, reports);
    }
}
