//! Evaluate an existing snapshot against a catalog's trust policy.

use crate::cli::args::FindUntrustedArgs;
use anyhow::Result;
use sketchwatch_core::load_targets;
use sketchwatch_github::snapshot::load_snapshot;
use sketchwatch_signals::untrusted_commits;

pub async fn execute(args: FindUntrustedArgs) -> Result<()> {
    let targets = load_targets(&args.targets)?;
    let target = targets
        .first()
        .ok_or_else(|| anyhow::anyhow!("catalog {} holds no targets", args.targets.display()))?;

    let commits = load_snapshot(&args.snapshot)?;
    let untrusted = untrusted_commits(&commits, &target.trusted_maintainers);

    for descriptor in &untrusted {
        println!("{descriptor}");
    }
    println!(
        "Found {} commits from untrusted maintainers in {}",
        untrusted.len(),
        args.snapshot.display()
    );
    Ok(())
}
