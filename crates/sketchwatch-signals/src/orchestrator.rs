//! Per-target signal orchestration.
//!
//! Combines the commit-history snapshot, the trust evaluation, and the four
//! external collaborators into one [`TargetReport`]. All-or-nothing: any
//! failing signal fails the whole target, never a partial report.

use crate::tools::ToolSuite;
use crate::trust::untrusted_commits;
use sketchwatch_core::{CargoDependencies, Result, Target, TargetReport};
use sketchwatch_github::snapshot::{load_snapshot, save_snapshot, snapshot_path};
use sketchwatch_github::GithubClient;
use std::path::Path;
use tracing::info;

/// Audit one target and assemble its report.
///
/// Snapshot acquisition is at-most-once per `(owner, repository_name)` for
/// the lifetime of `snapshot_dir`: an existing snapshot is reused without
/// any remote call unless `refetch` forces invalidation. The key ignores
/// the time window on purpose; see the snapshot module.
pub async fn audit_target(
    target: &Target,
    client: &GithubClient,
    tools: &ToolSuite,
    snapshot_dir: &Path,
    refetch: bool,
) -> Result<TargetReport> {
    info!(repository_url = %target.repository_url, "auditing target");

    // Step 1: commit snapshot, cache hit or fill.
    let cache_path = snapshot_path(snapshot_dir, &target.owner, &target.repository_name);
    let commits = if cache_path.exists() && !refetch {
        info!(path = %cache_path.display(), "reusing existing commit snapshot");
        load_snapshot(&cache_path)?
    } else {
        let fetched = client
            .list_commits(&target.owner, &target.repository_name, &target.since, &target.until)
            .await?;
        save_snapshot(&cache_path, &fetched)?;
        fetched
    };

    // Step 2: trust evaluation.
    let untrusted = untrusted_commits(&commits, &target.trusted_maintainers);

    // Step 3: dependency analysis, cargo-specific count only when asked for.
    let dependencies = tools.count_dependencies(&target.package_name).await?;
    let cargo_dependencies = if target.uses_cargo() {
        let count = tools
            .count_cargo_dependencies(&tools.package_path(&target.package_name))
            .await?;
        CargoDependencies::Counted(count)
    } else {
        CargoDependencies::NotApplicable
    };

    // Steps 4 & 5: sketchy files, plus the gitignore cross-check when the
    // working copy carries a .gitignore at all.
    let (sketchy_files, sketchy_file_types) = tools
        .scan_sketchy_files(
            &target.repository_url,
            &target.repository_name,
            &target.sketchy_files_csv(),
            &target.sketchy_file_types_csv(),
        )
        .await?;

    let gitignore_path = tools.checkout_path(&target.repository_name).join(".gitignore");
    let sketchy_files_in_gitignore = if gitignore_path.exists() {
        let found = tools
            .scan_gitignore(&gitignore_path, &target.sketchy_files_csv())
            .await?;
        info!(found = %found, "sketchy files in .gitignore");
        Some(found)
    } else {
        None
    };

    // Step 6: release tarball vs tagged tree.
    let differences_in_tarball = tools
        .diff_tarball(&target.owner, &target.repository_name, &target.release_tag)
        .await?;
    info!(differences = %differences_in_tarball, "tarball diff complete");

    Ok(TargetReport {
        repository_url: target.repository_url.clone(),
        commits_from_untrusted_maintainer: untrusted.len(),
        build_dependencies: dependencies.build,
        package_dependencies: dependencies.package,
        package_reverse_dependencies: dependencies.reverse,
        cargo_dependencies,
        sketchy_files,
        sketchy_files_in_gitignore,
        sketchy_file_types,
        differences_in_tarball,
    })
}
