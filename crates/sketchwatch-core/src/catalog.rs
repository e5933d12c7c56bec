//! Target catalog loading from a tabular (CSV) specification file.

use crate::error::{AuditError, Result};
use crate::types::{split_policy_list, Target};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Header columns every catalog file must carry.
const REQUIRED_COLUMNS: [&str; 11] = [
    "repository_url",
    "owner",
    "repository_name",
    "since",
    "until",
    "trusted_maintainers",
    "sketchy_files",
    "sketchy_file_types",
    "release_tag",
    "package_name",
    "package_manager",
];

/// One raw catalog row before list fields are split.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    repository_url: String,
    owner: String,
    repository_name: String,
    since: String,
    until: String,
    trusted_maintainers: String,
    sketchy_files: String,
    sketchy_file_types: String,
    release_tag: String,
    package_name: String,
    package_manager: String,
}

impl CatalogRow {
    fn into_target(self) -> Target {
        Target {
            repository_url: self.repository_url,
            owner: self.owner,
            repository_name: self.repository_name,
            since: self.since,
            until: self.until,
            trusted_maintainers: split_policy_list(&self.trusted_maintainers)
                .into_iter()
                .collect(),
            sketchy_files: split_policy_list(&self.sketchy_files),
            sketchy_file_types: split_policy_list(&self.sketchy_file_types),
            release_tag: self.release_tag,
            package_name: self.package_name,
            package_manager: self.package_manager,
        }
    }
}

/// Load all targets from a catalog file, preserving row order.
pub fn load_targets(path: impl AsRef<Path>) -> Result<Vec<Target>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| AuditError::MalformedCatalog {
        reason: format!("cannot open {}: {e}", path.display()),
    })?;
    load_targets_from_reader(file)
}

/// Load targets from any reader holding catalog CSV.
pub fn load_targets_from_reader<R: Read>(reader: R) -> Result<Vec<Target>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AuditError::MalformedCatalog {
            reason: format!("unreadable header row: {e}"),
        })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AuditError::MalformedCatalog {
                reason: format!("missing required column `{column}`"),
            });
        }
    }

    let mut targets = Vec::new();
    for (idx, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        // Header is line 1, data starts at line 2.
        let row = row.map_err(|e| AuditError::MalformedCatalog {
            reason: format!("row {}: {e}", idx + 2),
        })?;
        targets.push(row.into_target());
    }

    info!(count = targets.len(), "parsed audit targets");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "repository_url,owner,repository_name,since,until,\
                          trusted_maintainers,sketchy_files,sketchy_file_types,\
                          release_tag,package_name,package_manager";

    #[test]
    fn parses_rows_in_order() {
        let csv = format!(
            "{HEADER}\n\
             https://github.com/a/x.git,a,x,2024-01-01,2024-02-01,alice,\"m4/build.m4, ci.yml\",.m4,v1,x,apt\n\
             https://github.com/b/y.git,b,y,2024-01-01,2024-02-01,\"bob, carol\",Makefile,.sh,v2,y,cargo\n"
        );
        let targets = load_targets_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].owner, "a");
        assert_eq!(targets[0].sketchy_files, vec!["m4/build.m4", "ci.yml"]);
        assert!(targets[1].trusted_maintainers.contains("carol"));
        assert!(targets[1].uses_cargo());
    }

    #[test]
    fn missing_column_is_malformed() {
        let csv = "repository_url,owner\nhttps://github.com/a/x.git,a\n";
        let err = load_targets_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MalformedCatalog { ref reason } if reason.contains("repository_name")
        ));
    }

    #[test]
    fn short_row_is_malformed() {
        let csv = format!("{HEADER}\nhttps://github.com/a/x.git,a,x\n");
        let err = load_targets_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AuditError::MalformedCatalog { .. }));
        assert!(err.is_fatal());
    }
}
