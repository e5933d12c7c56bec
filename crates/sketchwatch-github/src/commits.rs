//! Time-bounded commit history retrieval with cursor pagination.

use crate::GithubClient;
use sketchwatch_core::{AuditError, CommitRecord, Result};
use tracing::{debug, info};

/// Page size requested from the commits endpoint
const PER_PAGE: u32 = 100;

impl GithubClient {
    /// Retrieve every commit in `[since, until)` for one repository.
    ///
    /// Follows the `Link: rel="next"` cursor until the API stops supplying
    /// one, accumulating pages in API-reported order (reverse-chronological).
    /// Errors with `PaginationExceeded` once the configured page cap is hit
    /// so a misbehaving endpoint cannot stall a batch forever.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: &str,
        until: &str,
    ) -> Result<Vec<CommitRecord>> {
        let mut url = format!(
            "{}/repos/{owner}/{repo}/commits?since={}&until={}&per_page={PER_PAGE}",
            self.base_url(),
            urlencoding::encode(since),
            urlencoding::encode(until),
        );

        let max_pages = self.limits().max_pages;
        let mut commits = Vec::new();
        let mut pages = 0u32;

        loop {
            if pages >= max_pages {
                return Err(AuditError::PaginationExceeded { max_pages });
            }

            let response = self.get_raw(&url).await?;
            let next = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_next_link);

            let body = response
                .text()
                .await
                .map_err(|e| AuditError::Http(e.to_string()))?;
            let page: Vec<CommitRecord> = serde_json::from_str(&body)?;
            debug!(page = pages + 1, count = page.len(), "fetched commit page");
            commits.extend(page);
            pages += 1;

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        info!(
            owner,
            repo,
            count = commits.len(),
            pages,
            "fetched commit history"
        );
        Ok(commits)
    }
}

/// Extract the `rel="next"` URL from a `Link` header value.
///
/// Header shape: `<url>; rel="prev", <url>; rel="next", ...`
fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut sections = part.split(';');
        let url = sections.next()?.trim();
        let is_next = sections.any(|s| s.trim() == r#"rel="next""#);
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
