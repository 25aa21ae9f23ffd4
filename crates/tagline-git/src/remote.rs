//! Remote operations

use tracing::debug;
use url::Url;

use crate::repository::{GitRepo, Result};
use tagline_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Browsable repository URL derived from a remote
    pub fn web_url(&self, remote: &str) -> Result<Option<String>> {
        let url = self.remote_url(remote)?;
        let web = url.as_deref().and_then(repo_url_from_remote);
        debug!(remote, url = ?web, "resolved repository URL");
        Ok(web)
    }
}

/// Convert a remote URL into an `https://host/owner/repo` link.
///
/// Handles scp-style (`git@host:owner/repo.git`), `ssh://` and `http(s)://`
/// remotes. Credentials and the `.git` suffix are dropped. Returns `None` for
/// local paths and anything else without a host.
pub fn repo_url_from_remote(remote: &str) -> Option<String> {
    let remote = remote.trim();

    let web_url = Url::parse(remote)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https" | "ssh" | "git"));

    let (host, path) = match web_url {
        Some(url) => (url.host_str()?.to_string(), url.path().to_string()),
        None => {
            if remote.contains("://") {
                return None;
            }
            // scp-like syntax: [user@]host:path
            let (user_host, path) = remote.split_once(':')?;
            let host = user_host.rsplit('@').next()?;
            if host.is_empty() || host.contains('/') {
                return None;
            }
            (host.to_string(), path.to_string())
        }
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if path.is_empty() {
        return None;
    }

    Some(format!("https://{}/{}", host, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_repo_url_from_remote() {
        assert_eq!(
            repo_url_from_remote("git@github.com:u/r.git").as_deref(),
            Some("https://github.com/u/r")
        );
        assert_eq!(
            repo_url_from_remote("https://github.com/u/r.git").as_deref(),
            Some("https://github.com/u/r")
        );
        assert_eq!(
            repo_url_from_remote("https://token@gitlab.com/group/sub/r").as_deref(),
            Some("https://gitlab.com/group/sub/r")
        );
        assert_eq!(
            repo_url_from_remote("ssh://git@github.com/u/r.git").as_deref(),
            Some("https://github.com/u/r")
        );
        assert_eq!(
            repo_url_from_remote("github.com:u/r.git").as_deref(),
            Some("https://github.com/u/r")
        );
        assert_eq!(repo_url_from_remote("file:///srv/git/r.git"), None);
        assert_eq!(repo_url_from_remote("/srv/git/r.git"), None);
    }

    #[test]
    fn test_web_url_from_origin() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.remote("origin", "git@github.com:u/r.git").unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(
            git_repo.web_url("origin").unwrap().as_deref(),
            Some("https://github.com/u/r")
        );
    }

    #[test]
    fn test_remote_not_found() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let git_repo = GitRepo::open(temp.path()).unwrap();

        let result = git_repo.remote_url("nonexistent");
        assert!(matches!(result, Err(GitError::RemoteNotFound(_))));
    }
}
