//! Shared fixtures for in-crate tests: fake collaborator scripts and targets.

use sketchwatch_core::Target;
use std::path::Path;

/// Drop an executable shell script standing in for a collaborator.
pub fn write_tool(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

/// Write the full set of well-behaved collaborator scripts.
pub fn write_standard_tools(dir: &Path) {
    write_tool(dir, "dependency_counter_apt.sh", "echo \"5 12 300\"");
    write_tool(dir, "dependency_counter_cargo.sh", "echo \"37\"");
    write_tool(
        dir,
        "find_sketchy_files.sh",
        "echo \"scanning $2...\"; echo \"1 4\"",
    );
    write_tool(dir, "find_sketchy_files_in_gitignore.sh", "echo \"build-to-host.m4\"");
    write_tool(dir, "diff_source.sh", "echo \"2\"");
}

/// A target pointing at the given owner/repo with a small trust policy.
pub fn sample_target(owner: &str, repo: &str, package_manager: &str) -> Target {
    Target {
        repository_url: format!("https://github.com/{owner}/{repo}.git"),
        owner: owner.into(),
        repository_name: repo.into(),
        since: "2024-01-01T00:00:00Z".into(),
        until: "2024-04-01T00:00:00Z".into(),
        trusted_maintainers: ["trusted-login".to_string()].into_iter().collect(),
        sketchy_files: vec!["build-to-host.m4".into()],
        sketchy_file_types: vec![".m4".into()],
        release_tag: "v1.0.0".into(),
        package_name: repo.into(),
        package_manager: package_manager.into(),
    }
}
