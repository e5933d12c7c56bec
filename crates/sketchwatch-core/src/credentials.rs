//! Credential loading from a local key-value (.env style) file.

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Key the token file must carry.
const TOKEN_KEY: &str = "GITHUB_TOKEN";

/// Read the API token from a `KEY=value` file; the first match wins.
///
/// A missing file or a file without a `GITHUB_TOKEN` line yields `Ok(None)`,
/// not an error: a fully cache-hit batch never needs a credential, so the
/// absence only matters once a remote fetch is actually attempted.
pub fn read_token(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "token file not present");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == TOKEN_KEY {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(Some(value.to_string()));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn first_matching_line_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "OTHER=abc").unwrap();
        writeln!(file, "GITHUB_TOKEN=ghp_first").unwrap();
        writeln!(file, "GITHUB_TOKEN=ghp_second").unwrap();
        let token = read_token(file.path()).unwrap();
        assert_eq!(token.as_deref(), Some("ghp_first"));
    }

    #[test]
    fn missing_file_is_no_credential() {
        let token = read_token("/nonexistent/.env").unwrap();
        assert!(token.is_none());
    }

    #[test]
    fn file_without_key_is_no_credential() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SOME_KEY=1").unwrap();
        assert!(read_token(file.path()).unwrap().is_none());
    }
}
