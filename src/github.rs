//! GitHub integration: repository resolution and secret publishing.
//!
//! Everything here goes through external tools the developer already has
//! set up: `git` for remote discovery and the authenticated `gh` CLI for
//! writing Actions secrets.

use crate::browser::SessionCookies;
use crate::config::{CSRF_KEY, SESSION_KEY};
use crate::error::{LeetfreshError, Result};
use regex::Regex;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

const REMOTE_URL_PATTERN: &str = r"github\.com[:/](.+?)/(.+?)(?:\.git)?$";

/// owner/name pair identifying the repository receiving the secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl RepoSlug {
    /// Parse an explicit `owner/name` override.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(LeetfreshError::Config(format!(
                "Invalid repo format '{}'. Expected 'owner/name'.",
                input
            ))),
        }
    }

    /// Extract owner and name from a GitHub remote URL, covering both
    /// `git@github.com:owner/repo.git` and `https://github.com/owner/repo`.
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let pattern = Regex::new(REMOTE_URL_PATTERN)
            .map_err(|e| LeetfreshError::Config(format!("Invalid remote URL pattern: {}", e)))?;
        let captures = pattern.captures(url).ok_or_else(|| {
            LeetfreshError::Config(format!(
                "Could not parse GitHub owner/repo from: {}\n\
                 Use --repo owner/name to specify manually.",
                url
            ))
        })?;
        Ok(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }
}

/// Check that `gh` is installed and authenticated.
pub fn ensure_cli_ready() -> Result<()> {
    if which::which("gh").is_err() {
        return Err(LeetfreshError::Dependency(
            "GitHub CLI (gh) is not installed.\n\
             Install it from: https://cli.github.com/"
                .to_string(),
        ));
    }

    let status = Command::new("gh")
        .args(["auth", "status"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        return Err(LeetfreshError::Auth(
            "GitHub CLI is not authenticated.\n\
             Run: gh auth login"
                .to_string(),
        ));
    }

    Ok(())
}

/// Resolve the target repository from the override or the `origin` remote.
pub fn resolve_repo(override_slug: Option<&str>) -> Result<RepoSlug> {
    if let Some(slug) = override_slug {
        return RepoSlug::parse(slug);
    }

    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output();
    let url = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => {
            return Err(LeetfreshError::Config(
                "Could not get git remote URL.\n\
                 Use --repo owner/name to specify manually."
                    .to_string(),
            ))
        }
    };
    RepoSlug::from_remote_url(&url)
}

/// Upload both cookies as repository secrets, one `gh secret set` each.
/// The first failure aborts the run; the remaining secret is not attempted.
pub fn publish_secrets(repo: &RepoSlug, cookies: &SessionCookies) -> Result<()> {
    let secrets = [
        (SESSION_KEY, cookies.session.as_str()),
        (CSRF_KEY, cookies.csrf.as_str()),
    ];
    for (name, value) in secrets {
        set_secret(repo, name, value)?;
        println!("  Updated secret: {}", name);
    }
    Ok(())
}

fn set_secret(repo: &RepoSlug, name: &str, value: &str) -> Result<()> {
    let mut child = Command::new("gh")
        .args(["secret", "set", name, "--repo", &repo.to_string()])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            LeetfreshError::Publish(format!("Failed to update secret {}: {}", name, e))
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(value.as_bytes()).map_err(|e| {
            LeetfreshError::Publish(format!("Failed to update secret {}: {}", name, e))
        })?;
    }

    let output = child.wait_with_output().map_err(|e| {
        LeetfreshError::Publish(format!("Failed to update secret {}: {}", name, e))
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LeetfreshError::Publish(format!(
            "Failed to update secret {}: {}",
            name,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::RepoSlug;
    use crate::error::LeetfreshError;

    #[test]
    fn parse_accepts_owner_slash_name() {
        let slug = RepoSlug::parse("acme/widgets").expect("valid slug");
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.name, "widgets");
        assert_eq!(slug.to_string(), "acme/widgets");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let err = RepoSlug::parse("acme").expect_err("no separator");
        assert!(matches!(err, LeetfreshError::Config(_)));
    }

    #[test]
    fn parse_rejects_extra_separators() {
        let err = RepoSlug::parse("acme/widgets/extra").expect_err("too many separators");
        assert!(matches!(err, LeetfreshError::Config(_)));
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!(RepoSlug::parse("/widgets").is_err());
        assert!(RepoSlug::parse("acme/").is_err());
    }

    #[test]
    fn from_remote_url_handles_ssh_form() {
        let slug = RepoSlug::from_remote_url("git@github.com:acme/widgets.git").expect("ssh url");
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.name, "widgets");
    }

    #[test]
    fn from_remote_url_handles_https_form() {
        let slug = RepoSlug::from_remote_url("https://github.com/acme/widgets").expect("https url");
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.name, "widgets");
    }

    #[test]
    fn from_remote_url_strips_git_suffix_only_once() {
        let slug =
            RepoSlug::from_remote_url("https://github.com/acme/widgets.git").expect("https url");
        assert_eq!(slug.name, "widgets");
    }

    #[test]
    fn from_remote_url_rejects_other_hosts() {
        let err = RepoSlug::from_remote_url("https://gitlab.com/acme/widgets")
            .expect_err("not github");
        assert!(matches!(err, LeetfreshError::Config(_)));
    }
}
