//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Audit open-source repositories for supply-chain risk signals
///
/// Fetches commit histories, flags commits landed by untrusted maintainers,
/// and combines dependency, sketchy-file, and tarball-diff signals into one
/// risk record per target.
#[derive(Parser, Debug)]
#[command(name = "sketchwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (debug-level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit every target in a catalog and persist the result set
    FullRun(FullRunArgs),

    /// Fetch one repository's commit history into a snapshot file
    FetchCommits(FetchCommitsArgs),

    /// Evaluate an existing snapshot against a catalog's trust policy
    FindUntrusted(FindUntrustedArgs),
}

/// Options shared by every command that touches the remote API or tools.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Key-value file holding GITHUB_TOKEN
    #[arg(long, default_value = ".env")]
    pub token_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct FullRunArgs {
    /// CSV catalog of audit targets
    #[arg(long)]
    pub targets: PathBuf,

    /// Directory for commit snapshots and the final result file
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Scratch directory the collaborators check working copies out into
    #[arg(long, default_value = "tmp")]
    pub work_dir: PathBuf,

    /// Directory holding the collaborator executables
    #[arg(long, default_value = "helper-scripts")]
    pub tools_dir: PathBuf,

    /// Ignore existing commit snapshots and fetch fresh histories
    #[arg(long)]
    pub refetch: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct FetchCommitsArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Window start, passed to the API verbatim
    #[arg(long)]
    pub since: String,

    /// Window end, passed to the API verbatim
    #[arg(long)]
    pub until: String,

    /// Snapshot file to write
    #[arg(long)]
    pub out: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct FindUntrustedArgs {
    /// Previously fetched commit snapshot
    #[arg(long)]
    pub snapshot: PathBuf,

    /// CSV catalog; the first row's trust policy is applied
    #[arg(long)]
    pub targets: PathBuf,
}
