//! Commit records as returned by the GitHub commits API.
//!
//! Only the fields the trust evaluator depends on are modeled; everything
//! else the API sends is dropped on deserialization. The snapshot format on
//! disk is exactly a JSON array of [`CommitRecord`].

use serde::{Deserialize, Serialize};

/// One commit as listed by `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit SHA
    #[serde(default)]
    pub sha: String,

    /// The git-level commit object (always present)
    pub commit: CommitDetail,

    /// Linked account of the author; null for unassociated/deleted accounts
    #[serde(default)]
    pub author: Option<AccountRef>,

    /// Linked account of the committer; same caveat as `author`
    #[serde(default)]
    pub committer: Option<AccountRef>,
}

/// The git commit metadata nested under `commit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Author identity as recorded in the commit
    pub author: GitIdentity,
    /// Committer identity as recorded in the commit
    pub committer: GitIdentity,
    /// Commit message, kept for operator context
    #[serde(default)]
    pub message: Option<String>,
}

/// A name/email/date triple from the git metadata.
///
/// `name` is the one field the API guarantees; the evaluator leans on that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// ISO-8601 timestamp
    #[serde(default)]
    pub date: Option<String>,
}

/// A GitHub account reference (`author`/`committer` at the top level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRef {
    /// Account login; absent when the account was deleted
    #[serde(default)]
    pub login: Option<String>,
    /// Numeric account id
    #[serde(default)]
    pub id: Option<u64>,
}

impl CommitRecord {
    /// Login of the account that landed the commit, if one is linked.
    #[must_use]
    pub fn committer_login(&self) -> Option<&str> {
        self.committer.as_ref().and_then(|a| a.login.as_deref())
    }
}
