//! End-of-run summary block with masked secrets.

use crate::browser::SessionCookies;
use crate::config::{CSRF_COOKIE, SESSION_COOKIE};
use crate::github::RepoSlug;
use std::fmt;

const RULE_WIDTH: usize = 60;

/// Mask a token value for display. Short values are hidden entirely; longer
/// ones keep just enough of each end to be recognizable.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 10 {
        return "***".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// What one run accomplished, rendered as the closing summary block.
pub struct Summary<'a> {
    pub cookies: &'a SessionCookies,
    pub username: Option<&'a str>,
    pub env_updated: bool,
    pub repo: Option<&'a RepoSlug>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "COOKIES REFRESHED SUCCESSFULLY")?;
        writeln!(f, "{}", rule)?;
        write_line(f, SESSION_COOKIE, &mask(&self.cookies.session))?;
        write_line(f, CSRF_COOKIE, &mask(&self.cookies.csrf))?;
        if let Some(username) = self.username {
            write_line(f, "Logged in as", username)?;
        }
        if self.env_updated {
            write_line(f, ".env file", "Updated")?;
        }
        if let Some(repo) = self.repo {
            write_line(f, "GitHub secrets", &format!("Updated ({})", repo))?;
        }
        write!(f, "{}", rule)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "  {:<17} {}", format!("{}:", label), value)
}
