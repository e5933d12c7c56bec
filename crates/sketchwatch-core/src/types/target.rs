//! The declarative description of one repository to audit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One audit unit: a repository plus the policies to judge it by.
///
/// Immutable after construction; built exclusively by the catalog loader
/// from one row of the target CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Clone/browse URL of the repository
    pub repository_url: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name without the owner prefix
    pub repository_name: String,
    /// Start of the commit window, passed to the API verbatim
    pub since: String,
    /// End of the commit window, passed to the API verbatim
    pub until: String,
    /// Committer logins considered authorized (case-sensitive)
    pub trusted_maintainers: BTreeSet<String>,
    /// Filename patterns worth flagging
    pub sketchy_files: Vec<String>,
    /// File-extension patterns worth flagging
    pub sketchy_file_types: Vec<String>,
    /// Release tag whose tarball gets diffed against the tree
    pub release_tag: String,
    /// Package name in the distro/registry
    pub package_name: String,
    /// Package manager identifier; `"cargo"` enables the extra count
    pub package_manager: String,
}

/// The package-manager value that triggers the cargo-specific count.
pub const CARGO_MANAGER: &str = "cargo";

impl Target {
    /// Returns true if this target needs the cargo-specific dependency count.
    #[must_use]
    pub fn uses_cargo(&self) -> bool {
        self.package_manager == CARGO_MANAGER
    }

    /// Sketchy-file patterns re-joined for collaborator argv.
    #[must_use]
    pub fn sketchy_files_csv(&self) -> String {
        self.sketchy_files.join(",")
    }

    /// Sketchy-file-type patterns re-joined for collaborator argv.
    #[must_use]
    pub fn sketchy_file_types_csv(&self) -> String {
        self.sketchy_file_types.join(",")
    }
}

/// Split a comma-delimited policy field, trimming each entry.
///
/// Empty entries survive as empty strings; the catalog is the place to fix
/// a stray trailing comma, not this parser.
#[must_use]
pub fn split_policy_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
