//! sketchwatch - supply-chain risk-signal auditor
//!
//! Aggregates commit-trust, dependency, sketchy-file, and tarball-diff
//! signals into one risk record per target repository.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sketchwatch_cli::run().await
}
