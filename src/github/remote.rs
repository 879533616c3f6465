use url::Url;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub repo: String,
}

/// Extract owner/repo from a git remote URL.
///
/// Accepts scp-style (`git@github.com:owner/repo.git`) and URL forms
/// (`https://github.com/owner/repo`, `ssh://git@host/owner/repo.git`).
/// The host is not checked so GitHub Enterprise remotes work too.
pub fn parse_github_remote(remote_url: &str) -> Option<RemoteRepo> {
    let remote_url = remote_url.trim();

    let path = if remote_url.contains("://") {
        Url::parse(remote_url).ok()?.path().to_string()
    } else {
        // scp-like syntax: [user@]host:path
        let (_, path) = remote_url.split_once(':')?;
        path.to_string()
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut segments = path.rsplit('/');
    let repo = segments.next()?.to_string();
    let owner = segments.next()?.to_string();

    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(RemoteRepo { owner, repo })
}
