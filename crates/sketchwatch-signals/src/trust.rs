//! Trust-policy evaluation over a retrieved commit history.

use sketchwatch_core::CommitRecord;
use std::collections::BTreeSet;
use tracing::info;

/// Rendered for a committer whose account link or login is absent; such a
/// committer can never match the trust list.
const UNKNOWN_LOGIN: &str = "unknown";

/// Classify a commit history and return the untrusted-commit descriptors.
///
/// A commit is untrusted iff the committer's account login is not in the
/// trusted set AND the commit was landed by someone other than its author.
/// Self-authored-and-committed commits are ordinary development activity;
/// the signal targets the landing actor of someone else's change, since
/// that is the injection point of concern.
///
/// Descriptors are `"<committer-name> <<committer-login>>"` in snapshot
/// order. Pure function: no I/O, no mutation of the input.
#[must_use]
pub fn untrusted_commits(commits: &[CommitRecord], trusted: &BTreeSet<String>) -> Vec<String> {
    let mut untrusted = Vec::new();
    for record in commits {
        let author = &record.commit.author.name;
        let committer = &record.commit.committer.name;
        let login = record.committer_login();

        let trusted_committer = login.is_some_and(|l| trusted.contains(l));
        if !trusted_committer && author != committer {
            untrusted.push(format!(
                "{committer} <{}>",
                login.unwrap_or(UNKNOWN_LOGIN)
            ));
        }
    }
    info!(count = untrusted.len(), "classified commits from untrusted maintainers");
    untrusted
}
