use thiserror::Error;

/// Result type alias for sketchwatch operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors that can occur while auditing a target repository
#[derive(Error, Debug)]
pub enum AuditError {
    /// Catalog file is missing required columns or has malformed rows
    #[error("malformed target catalog: {reason}")]
    MalformedCatalog {
        /// What was wrong with the catalog
        reason: String,
    },

    /// No usable credential was found when a remote fetch was attempted
    #[error("no GITHUB_TOKEN credential available for remote fetch")]
    CredentialMissing,

    /// The commit API returned a non-success status
    #[error("remote fetch failed ({status}): {message}")]
    RemoteFetch {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Rate limit exceeded on the commit API
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, if the API said
        retry_after: Option<u64>,
    },

    /// Cursor pagination ran past the configured page cap
    #[error("pagination exceeded the configured cap of {max_pages} pages")]
    PaginationExceeded {
        /// The configured maximum number of pages
        max_pages: u32,
    },

    /// A collaborator tool exited non-zero or produced malformed output
    #[error("signal collection failed for {signal}: {reason}")]
    SignalCollection {
        /// Which signal's collaborator failed
        signal: &'static str,
        /// Exit status or shape mismatch description
        reason: String,
    },

    /// A collaborator tool exceeded its runtime cap
    #[error("collaborator for {signal} timed out after {secs} seconds")]
    ToolTimeout {
        /// Which signal's collaborator hung
        signal: &'static str,
        /// The configured cap in seconds
        secs: u64,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Returns true if the error is worth retrying
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Http(_))
    }

    /// Returns true if the error kills the whole batch rather than one target
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedCatalog { .. })
    }
}
