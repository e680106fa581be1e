//! Repository listing outcome.
//!
//! The host performs the HTTP request; this module turns whatever came
//! back into something the projects section can render: the visible
//! repositories, or an empty list with a user-facing message.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A public repository as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Numeric id.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Description.
    pub description: Option<String>,
    /// Repository page.
    pub html_url: String,
    /// Project homepage.
    pub homepage: Option<String>,
    /// Primary language.
    pub language: Option<String>,
    /// Topics.
    pub topics: Vec<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    pub updated_at: String,
    /// Last push timestamp (ISO 8601).
    pub pushed_at: String,
    /// Stars.
    pub stargazers_count: u32,
    /// Forks.
    pub forks_count: u32,
    /// Read-only archive.
    pub archived: bool,
    /// Disabled by the host.
    pub disabled: bool,
    /// Not publicly visible.
    pub private: bool,
    /// Default branch.
    pub default_branch: String,
}

impl Repository {
    /// Whether the repository belongs on the public site.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.private && !self.archived && !self.disabled
    }
}

/// Why a repository listing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoFetchError {
    /// The user does not exist (HTTP 404).
    NotFound {
        /// Requested user name.
        user: String,
    },
    /// The API refused the request (HTTP 403).
    RateLimited,
    /// Any other non-success status.
    Status {
        /// HTTP status code.
        code: u16,
        /// HTTP status text.
        text: String,
    },
    /// The request failed or the body was unreadable.
    Network(String),
}

impl RepoFetchError {
    /// Classify an HTTP status. `None` for success statuses.
    #[must_use]
    pub fn from_status(code: u16, text: &str, user: &str) -> Option<Self> {
        match code {
            200..=299 => None,
            404 => Some(Self::NotFound {
                user: user.to_owned(),
            }),
            403 => Some(Self::RateLimited),
            _ => Some(Self::Status {
                code,
                text: text.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RepoFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { user } => write!(f, "GitHub user \"{user}\" not found"),
            Self::RateLimited => {
                write!(f, "GitHub API rate limit exceeded. Please try again later.")
            }
            Self::Status { text, .. } => {
                write!(f, "Failed to fetch repositories: {text}")
            }
            Self::Network(msg) => write!(f, "Failed to fetch repositories: {msg}"),
        }
    }
}

impl std::error::Error for RepoFetchError {}

/// What the projects section renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoListing {
    /// Visible repositories, in the order received.
    pub repos: Vec<Repository>,
    /// User-facing message when the listing failed.
    pub error: Option<String>,
}

impl RepoListing {
    /// Listing from a fetch outcome. Private, archived and disabled
    /// repositories are dropped; failures become an empty list with a
    /// message.
    #[must_use]
    pub fn from_result(result: Result<Vec<Repository>, RepoFetchError>) -> Self {
        match result {
            Ok(repos) => {
                let total = repos.len();
                let repos: Vec<_> = repos.into_iter().filter(Repository::is_listed).collect();
                log::debug!("{} of {total} repositories listed", repos.len());
                Self { repos, error: None }
            }
            Err(e) => {
                log::error!("repository listing failed: {e}");
                Self {
                    repos: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Listing from a raw HTTP response for `user`'s repositories.
    #[must_use]
    pub fn from_response(user: &str, code: u16, status_text: &str, body: &str) -> Self {
        if let Some(e) = RepoFetchError::from_status(code, status_text, user) {
            return Self::from_result(Err(e));
        }
        let parsed = serde_json::from_str::<Vec<Repository>>(body)
            .map_err(|e| RepoFetchError::Network(e.to_string()));
        Self::from_result(parsed)
    }

    /// Whether the listing failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Listing endpoint for `user`, most recently updated first.
#[must_use]
pub fn repos_endpoint(user: &str) -> String {
    format!("https://api.github.com/users/{user}/repos?sort=updated&per_page=100")
}

/// User name from any URL containing `github.com/<user>`.
#[must_use]
pub fn extract_github_username(url: &str) -> Option<&str> {
    const HOST: &str = "github.com/";
    let start = url.find(HOST)? + HOST.len();
    let user = url[start..].split(['/', '?', '#']).next()?;
    (!user.is_empty()).then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, private: bool, archived: bool, disabled: bool) -> Repository {
        Repository {
            name: name.to_owned(),
            private,
            archived,
            disabled,
            ..Repository::default()
        }
    }

    #[test]
    fn hidden_repositories_are_filtered() {
        let listing = RepoListing::from_result(Ok(vec![
            repo("public", false, false, false),
            repo("secret", true, false, false),
            repo("old", false, true, false),
            repo("blocked", false, false, true),
        ]));
        assert_eq!(listing.repos.len(), 1);
        assert_eq!(listing.repos[0].name, "public");
        assert!(!listing.is_error());
    }

    #[test]
    fn failures_become_messages() {
        let listing = RepoListing::from_response("ghost", 404, "Not Found", "");
        assert!(listing.repos.is_empty());
        assert_eq!(listing.error.as_deref(), Some("GitHub user \"ghost\" not found"));

        let listing = RepoListing::from_response("ada", 403, "Forbidden", "");
        assert_eq!(
            listing.error.as_deref(),
            Some("GitHub API rate limit exceeded. Please try again later.")
        );

        let listing = RepoListing::from_response("ada", 500, "Internal Server Error", "");
        assert_eq!(
            listing.error.as_deref(),
            Some("Failed to fetch repositories: Internal Server Error")
        );
    }

    #[test]
    fn parses_response_body() {
        let body = r#"[
            {"id": 1, "name": "a", "html_url": "https://github.com/u/a", "private": false},
            {"id": 2, "name": "b", "archived": true}
        ]"#;
        let listing = RepoListing::from_response("u", 200, "OK", body);
        assert_eq!(listing.repos.len(), 1);
        assert_eq!(listing.repos[0].id, 1);

        let broken = RepoListing::from_response("u", 200, "OK", "not json");
        assert!(broken.is_error());
    }

    #[test]
    fn username_from_url() {
        assert_eq!(extract_github_username("https://github.com/ada"), Some("ada"));
        assert_eq!(
            extract_github_username("https://github.com/ada/folio?tab=repos"),
            Some("ada")
        );
        assert_eq!(extract_github_username("github.com/ada#top"), Some("ada"));
        assert_eq!(extract_github_username("https://github.com/"), None);
        assert_eq!(extract_github_username("https://gitlab.com/ada"), None);
        assert_eq!(
            repos_endpoint("ada"),
            "https://api.github.com/users/ada/repos?sort=updated&per_page=100"
        );
    }
}
