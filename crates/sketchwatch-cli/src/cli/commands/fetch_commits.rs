//! Fetch one repository's history into a snapshot file.

use crate::cli::args::FetchCommitsArgs;
use anyhow::Result;
use sketchwatch_core::read_token;
use sketchwatch_github::snapshot::save_snapshot;
use sketchwatch_github::GithubClient;

pub async fn execute(args: FetchCommitsArgs) -> Result<()> {
    let token = read_token(&args.common.token_file)?;
    let client = GithubClient::new(token);

    let commits = client
        .list_commits(&args.owner, &args.repo, &args.since, &args.until)
        .await?;
    println!(
        "Fetched {} commits from {}/{} between {} and {}",
        commits.len(),
        args.owner,
        args.repo,
        args.since,
        args.until
    );

    save_snapshot(&args.out, &commits)?;
    println!("Snapshot written to {}", args.out.display());
    Ok(())
}
