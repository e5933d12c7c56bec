//! External collaborator invocation.
//!
//! Each analysis collaborator is an opaque executable taking positional
//! string arguments and answering on stdout in a small fixed shape. Every
//! invocation runs under a timeout so a hung tool fails one target instead
//! of stalling the whole batch.

use sketchwatch_core::{AuditError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

/// Generic dependency counter (distro package database)
const DEPENDENCY_COUNTER: &str = "dependency_counter_apt.sh";
/// Cargo-specific dependency counter
const CARGO_COUNTER: &str = "dependency_counter_cargo.sh";
/// Working-copy sketchy-file scanner
const SKETCHY_SCANNER: &str = "find_sketchy_files.sh";
/// `.gitignore` sketchy-file scanner
const GITIGNORE_SCANNER: &str = "find_sketchy_files_in_gitignore.sh";
/// Release-tarball vs tagged-tree diff tool
const TARBALL_DIFF: &str = "diff_source.sh";

/// The generic counter caps the build-dependency count at this literal,
/// meaning "at least this many".
pub const SATURATED_BUILD_DEPENDENCIES: &str = "100";

/// Default cap on a single collaborator invocation
const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(300);

/// Dependency counts reported by the generic counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCounts {
    /// Build-dependency count, saturating at `"100"`
    pub build: String,
    /// Package-dependency count
    pub package: String,
    /// Reverse-dependency count
    pub reverse: String,
}

/// Handle to the external analysis collaborators.
#[derive(Debug, Clone)]
pub struct ToolSuite {
    tools_dir: PathBuf,
    work_dir: PathBuf,
    tool_timeout: Duration,
}

impl ToolSuite {
    /// Create a suite rooted at a tools directory, with the scratch
    /// directory the scanner checks working copies out into.
    #[must_use]
    pub fn new(tools_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
            work_dir: work_dir.into(),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Override the per-invocation runtime cap
    #[must_use]
    pub const fn tool_timeout(mut self, cap: Duration) -> Self {
        self.tool_timeout = cap;
        self
    }

    /// Where the scanner checks this repository's working copy out
    #[must_use]
    pub fn checkout_path(&self, repository_name: &str) -> PathBuf {
        self.work_dir.join(repository_name)
    }

    /// Local path the cargo counter inspects for a package
    #[must_use]
    pub fn package_path(&self, package_name: &str) -> PathBuf {
        self.work_dir.join(package_name)
    }

    /// Count build/package/reverse dependencies for a package.
    pub async fn count_dependencies(&self, package_name: &str) -> Result<DependencyCounts> {
        let signal = "dependencies";
        let stdout = self
            .run_tool(signal, DEPENDENCY_COUNTER, &[package_name])
            .await?;

        let line = stdout.trim();
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [build, package, reverse] = fields.as_slice() else {
            return Err(AuditError::SignalCollection {
                signal,
                reason: format!("expected three counts, got `{line}`"),
            });
        };

        if *build == SATURATED_BUILD_DEPENDENCIES {
            info!(package_name, build = *build, "build-dependency count saturated (at least this many)");
        } else {
            info!(package_name, build = *build, "build dependencies");
        }
        info!(package_name, package = *package, reverse = *reverse, "package and reverse dependencies");

        Ok(DependencyCounts {
            build: (*build).to_string(),
            package: (*package).to_string(),
            reverse: (*reverse).to_string(),
        })
    }

    /// Count dependencies with the cargo-specific counter.
    pub async fn count_cargo_dependencies(&self, package_path: &Path) -> Result<String> {
        let signal = "cargo dependencies";
        let stdout = self
            .run_tool(signal, CARGO_COUNTER, &[&package_path.to_string_lossy()])
            .await?;

        let count = stdout
            .split_whitespace()
            .next()
            .ok_or_else(|| AuditError::SignalCollection {
                signal,
                reason: "empty output".into(),
            })?;
        Ok(count.to_string())
    }

    /// Scan the working copy for sketchy files and file types.
    ///
    /// The scanner streams diagnostic lines and ends with one line holding
    /// two counts; diagnostics are surfaced to the operator via the log.
    pub async fn scan_sketchy_files(
        &self,
        repository_url: &str,
        repository_name: &str,
        sketchy_files_csv: &str,
        sketchy_file_types_csv: &str,
    ) -> Result<(String, String)> {
        let signal = "sketchy files";
        let stdout = self
            .run_tool(
                signal,
                SKETCHY_SCANNER,
                &[
                    repository_url,
                    repository_name,
                    sketchy_files_csv,
                    sketchy_file_types_csv,
                ],
            )
            .await?;

        let lines: Vec<&str> = stdout.lines().collect();
        let Some((last, diagnostics)) = lines.split_last() else {
            return Err(AuditError::SignalCollection {
                signal,
                reason: "no output".into(),
            });
        };
        for line in diagnostics {
            info!(repository_name, "{}", line.trim());
        }

        let counts: Vec<&str> = last.split_whitespace().collect();
        let [files, file_types] = counts.as_slice() else {
            return Err(AuditError::SignalCollection {
                signal,
                reason: format!("expected two counts on the final line, got `{last}`"),
            });
        };
        Ok(((*files).to_string(), (*file_types).to_string()))
    }

    /// Cross-check a `.gitignore` file against the sketchy-file patterns.
    pub async fn scan_gitignore(
        &self,
        gitignore_path: &Path,
        sketchy_files_csv: &str,
    ) -> Result<String> {
        let stdout = self
            .run_tool(
                "gitignore",
                GITIGNORE_SCANNER,
                &[&gitignore_path.to_string_lossy(), sketchy_files_csv],
            )
            .await?;
        Ok(stdout.trim().to_string())
    }

    /// Count files differing between the release tarball and the tagged tree.
    pub async fn diff_tarball(
        &self,
        owner: &str,
        repository_name: &str,
        release_tag: &str,
    ) -> Result<String> {
        let stdout = self
            .run_tool("tarball diff", TARBALL_DIFF, &[owner, repository_name, release_tag])
            .await?;
        Ok(stdout.trim().to_string())
    }

    /// Run one collaborator to completion under the runtime cap.
    async fn run_tool(&self, signal: &'static str, tool: &str, args: &[&str]) -> Result<String> {
        let path = self.tools_dir.join(tool);
        debug!(tool = %path.display(), ?args, "invoking collaborator");

        let output = timeout(self.tool_timeout, Command::new(&path).args(args).output())
            .await
            .map_err(|_| AuditError::ToolTimeout {
                signal,
                secs: self.tool_timeout.as_secs(),
            })?
            .map_err(|e| AuditError::SignalCollection {
                signal,
                reason: format!("failed to run {}: {e}", path.display()),
            })?;

        if !output.status.success() {
            return Err(AuditError::SignalCollection {
                signal,
                reason: format!(
                    "{} exited with {}: {}",
                    path.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::write_tool;
    use std::time::Duration;

    #[tokio::test]
    async fn dependency_counts_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), DEPENDENCY_COUNTER, "echo \"100 12 2481\"");
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let counts = suite.count_dependencies("liblzma5").await.unwrap();
        assert_eq!(
            counts,
            DependencyCounts {
                build: "100".into(),
                package: "12".into(),
                reverse: "2481".into(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_dependency_output_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), DEPENDENCY_COUNTER, "echo \"only two\"");
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let err = suite.count_dependencies("liblzma5").await.unwrap_err();
        assert!(matches!(
            err,
            AuditError::SignalCollection { signal: "dependencies", .. }
        ));
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_signal_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(
            dir.path(),
            DEPENDENCY_COUNTER,
            "echo \"no such package\" >&2; exit 3",
        );
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let err = suite.count_dependencies("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            AuditError::SignalCollection { ref reason, .. } if reason.contains("no such package")
        ));
    }

    #[tokio::test]
    async fn hung_tool_times_out() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), TARBALL_DIFF, "sleep 5; echo 0");
        let suite =
            ToolSuite::new(dir.path(), dir.path().join("tmp")).tool_timeout(Duration::from_millis(50));

        let err = suite.diff_tarball("o", "r", "v1").await.unwrap_err();
        assert!(matches!(err, AuditError::ToolTimeout { signal: "tarball diff", .. }));
    }

    #[tokio::test]
    async fn scanner_diagnostics_precede_final_counts() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(
            dir.path(),
            SKETCHY_SCANNER,
            "echo \"cloning xz...\"; echo \"found build-to-host.m4\"; echo \"1 4\"",
        );
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let (files, file_types) = suite
            .scan_sketchy_files("https://github.com/a/xz.git", "xz", "build-to-host.m4", ".m4")
            .await
            .unwrap();
        assert_eq!(files, "1");
        assert_eq!(file_types, "4");
    }

    #[tokio::test]
    async fn scanner_final_line_must_hold_two_counts() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), SKETCHY_SCANNER, "echo \"oops\"");
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let err = suite
            .scan_sketchy_files("url", "r", "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuditError::SignalCollection { signal: "sketchy files", .. }
        ));
    }

    #[tokio::test]
    async fn gitignore_scan_returns_trimmed_stdout() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), GITIGNORE_SCANNER, "echo \"  build-to-host.m4  \"");
        let suite = ToolSuite::new(dir.path(), dir.path().join("tmp"));

        let found = suite
            .scan_gitignore(Path::new("tmp/xz/.gitignore"), "build-to-host.m4")
            .await
            .unwrap();
        assert_eq!(found, "build-to-host.m4");
    }
}
