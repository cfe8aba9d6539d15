//! Run configuration and the fixed product constants

use std::time::Duration;

/// Cookie domain the extractor filters on.
pub const TARGET_DOMAIN: &str = "leetcode.com";

/// Session cookie name in Chrome's cookie store.
pub const SESSION_COOKIE: &str = "LEETCODE_SESSION";

/// CSRF cookie name in Chrome's cookie store.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Key written to `.env` and GitHub secrets for the session token.
pub const SESSION_KEY: &str = "LEETCODE_SESSION";

/// Key written to `.env` and GitHub secrets for the CSRF token.
pub const CSRF_KEY: &str = "LEETCODE_CSRF_TOKEN";

/// GraphQL endpoint used to verify the extracted cookies.
pub const GRAPHQL_ENDPOINT: &str = "https://leetcode.com/graphql/";

/// Referer header required by the GraphQL endpoint.
pub const SITE_URL: &str = "https://leetcode.com";

/// Timeout for the single validation request.
pub const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the file the Local Persister writes in the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Where a run propagates the refreshed cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Save to the project `.env` file only (default).
    Local,
    /// Update GitHub Actions secrets only.
    Github,
    /// Both destinations.
    Both,
}

impl Mode {
    pub fn persists_local(self) -> bool {
        matches!(self, Mode::Local | Mode::Both)
    }

    pub fn publishes_remote(self) -> bool {
        matches!(self, Mode::Github | Mode::Both)
    }
}

/// Options resolved from the command line for one run.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    /// Explicit `owner/name` override for the target repository.
    pub repo_override: Option<String>,
    /// Chrome profile name, or a direct path to a cookie database.
    pub profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn local_mode_only_persists_locally() {
        assert!(Mode::Local.persists_local());
        assert!(!Mode::Local.publishes_remote());
    }

    #[test]
    fn github_mode_only_publishes_remotely() {
        assert!(!Mode::Github.persists_local());
        assert!(Mode::Github.publishes_remote());
    }

    #[test]
    fn both_mode_does_both() {
        assert!(Mode::Both.persists_local());
        assert!(Mode::Both.publishes_remote());
    }
}
