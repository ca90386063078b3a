//! Persistence of the access token in a dotenv file, so that it survives between runs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::DateTime;

use crate::session::AccessToken;

const TOKEN_KEY: &str = "AIO123PAN_CACHED_ACCESS_TOKEN";
const EXPIRY_KEY: &str = "AIO123PAN_CACHED_TOKEN_EXPIRY";

/// Stores the access token as two `KEY=value` lines of a dotenv file.
///
/// The other lines of the file are left untouched.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl Default for TokenStore {
    /// Uses the `.env` file of the current directory
    fn default() -> Self {
        Self::new(".env")
    }
}

fn is_entry(line: &str, key: &str) -> bool {
    line.trim()
        .strip_prefix(key)
        .map_or(false, |rest| rest.starts_with('='))
}

fn entry_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim().strip_prefix(key)?.strip_prefix('=')
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_lines(&self) -> std::io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes the token, replacing the previous one in place if any.
    pub async fn save(&self, token: &AccessToken) -> std::io::Result<()> {
        let token_line = format!("{TOKEN_KEY}={}", token.value());
        let expiry_line = format!("{EXPIRY_KEY}={}", token.expired_at().to_rfc3339());

        let mut lines = Vec::new();
        let mut token_written = false;
        let mut expiry_written = false;
        if let Some(content) = self.read_lines().await? {
            for line in content.lines() {
                if is_entry(line, TOKEN_KEY) {
                    lines.push(token_line.clone());
                    token_written = true;
                } else if is_entry(line, EXPIRY_KEY) {
                    lines.push(expiry_line.clone());
                    expiry_written = true;
                } else {
                    lines.push(line.to_string());
                }
            }
        }
        if !token_written {
            lines.push(token_line);
        }
        if !expiry_written {
            lines.push(expiry_line);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut output = lines.join("\n");
        output.push('\n');
        tokio::fs::write(&self.path, output).await
    }

    /// Reads the token back.
    ///
    /// Returns `Ok(None)` when the file or one of the entries is missing, when the
    /// expiry cannot be parsed or when the token has already expired.
    pub async fn load(&self) -> std::io::Result<Option<AccessToken>> {
        let Some(content) = self.read_lines().await? else {
            return Ok(None);
        };
        let mut value = None;
        let mut expiry = None;
        for line in content.lines() {
            if let Some(found) = entry_value(line, TOKEN_KEY) {
                value = Some(found);
            } else if let Some(found) = entry_value(line, EXPIRY_KEY) {
                expiry = Some(found);
            }
        }
        let (Some(value), Some(expiry)) = (value, expiry) else {
            return Ok(None);
        };
        let Ok(expired_at) = DateTime::parse_from_rfc3339(expiry) else {
            tracing::debug!("ignoring stored token with invalid expiry {expiry:?}");
            return Ok(None);
        };
        let token = AccessToken::new(value, expired_at);
        Ok(token.is_valid().then_some(token))
    }

    /// Removes the token entries, keeping the rest of the file.
    pub async fn clear(&self) -> std::io::Result<()> {
        let Some(content) = self.read_lines().await? else {
            return Ok(());
        };
        let mut output = content
            .lines()
            .filter(|line| !is_entry(line, TOKEN_KEY) && !is_entry(line, EXPIRY_KEY))
            .collect::<Vec<_>>()
            .join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        tokio::fs::write(&self.path, output).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::TokenStore;
    use crate::session::AccessToken;

    fn token(value: &str, valid: bool) -> AccessToken {
        let delta = Duration::hours(2);
        let expired_at = if valid {
            Utc::now() + delta
        } else {
            Utc::now() - delta
        };
        AccessToken::new(value, expired_at)
    }

    #[tokio::test]
    async fn should_return_none_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("missing.env"));
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn should_keep_other_lines_when_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "PAN123_CLIENT_ID=abc\nAIO123PAN_CACHED_ACCESS_TOKEN=old\nOTHER=1\n",
        )
        .unwrap();
        let store = TokenStore::new(&path);
        store.save(&token("new", true)).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "PAN123_CLIENT_ID=abc");
        assert_eq!(lines[1], "AIO123PAN_CACHED_ACCESS_TOKEN=new");
        assert_eq!(lines[2], "OTHER=1");
        assert!(lines[3].starts_with("AIO123PAN_CACHED_TOKEN_EXPIRY="));
        assert_eq!(lines.len(), 4);

        assert_eq!(store.load().await.unwrap().unwrap().value(), "new");
    }

    #[tokio::test]
    async fn should_ignore_expired_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join(".env"));
        store.save(&token("expired", false)).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_ignore_invalid_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "AIO123PAN_CACHED_ACCESS_TOKEN=token\nAIO123PAN_CACHED_TOKEN_EXPIRY=tomorrow\n",
        )
        .unwrap();
        assert!(TokenStore::new(&path).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_only_clear_token_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "FOO=bar\n").unwrap();
        let store = TokenStore::new(&path);
        store.save(&token("value", true)).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "FOO=bar\n");
    }
}
