//! The whole pipeline: catalog -> per-target signals -> persisted results.

use crate::cli::args::FullRunArgs;
use anyhow::Result;
use sketchwatch_core::{load_targets, read_token};
use sketchwatch_github::GithubClient;
use sketchwatch_signals::{run_batch, save_reports, ToolSuite};

pub async fn execute(args: FullRunArgs) -> Result<()> {
    println!("Starting full audit run...");

    let targets = load_targets(&args.targets)?;
    println!("Loaded {} targets from {}", targets.len(), args.targets.display());

    let token = read_token(&args.common.token_file)?;
    let client = GithubClient::new(token);
    let tools = ToolSuite::new(&args.tools_dir, &args.work_dir);

    let outcome = run_batch(&targets, &client, &tools, &args.results_dir, args.refetch).await;

    for report in &outcome.reports {
        println!(
            "{}: {} untrusted commits, {} sketchy files, {} tarball differences",
            report.repository_url,
            report.commits_from_untrusted_maintainer,
            report.sketchy_files,
            report.differences_in_tarball
        );
    }
    for failure in &outcome.failures {
        eprintln!("FAILED {}: {}", failure.repository_url, failure.reason);
    }

    let path = save_reports(&args.results_dir, &outcome.reports)?;
    println!(
        "Done: {} succeeded, {} failed, elapsed {:.2}s, results in {}",
        outcome.reports.len(),
        outcome.failures.len(),
        outcome.elapsed.as_secs_f64(),
        path.display()
    );

    if outcome.reports.is_empty() && !outcome.failures.is_empty() {
        anyhow::bail!("every target failed");
    }
    Ok(())
}
