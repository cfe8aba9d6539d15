//! Browser cookie extraction module
//!
//! Reads the LeetCode authentication cookies out of the local Chrome profile.
//! Chrome is the only supported source, matching the sign-in flow this tool
//! is meant to piggyback on.

use crate::config::{CSRF_COOKIE, SESSION_COOKIE, TARGET_DOMAIN};
use crate::error::{LeetfreshError, Result};

pub mod chrome;

/// A cookie read from the browser's store, already decrypted.
#[derive(Debug, Clone)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
}

/// The two cookie values needed to authenticate against LeetCode.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    pub session: String,
    pub csrf: String,
}

impl SessionCookies {
    /// Render the pair as a `Cookie:` header value.
    pub fn cookie_header(&self) -> String {
        format!(
            "{}={}; {}={}",
            SESSION_COOKIE, self.session, CSRF_COOKIE, self.csrf
        )
    }
}

/// Extract the LeetCode session cookies from Chrome.
///
/// `profile` selects a Chrome profile by name, or points directly at a cookie
/// database file. Fails with remediation guidance when the store cannot be
/// read or the user is not logged in to the site.
pub fn session_cookies(profile: Option<&str>) -> Result<SessionCookies> {
    let cookies = chrome::domain_cookies(TARGET_DOMAIN, profile).map_err(|err| match err {
        LeetfreshError::Unsupported(message) => LeetfreshError::Unsupported(message),
        other => LeetfreshError::BrowserCookie(format!(
            "{other}\nMake sure Chrome is installed and you're logged into {TARGET_DOMAIN}.\n\
             You may need to close Chrome first on some systems."
        )),
    })?;

    let mut session = None;
    let mut csrf = None;
    for cookie in cookies {
        if cookie.name == SESSION_COOKIE {
            session = Some(cookie.value);
        } else if cookie.name == CSRF_COOKIE {
            csrf = Some(cookie.value);
        }
    }

    match (session, csrf) {
        (Some(session), Some(csrf)) => Ok(SessionCookies { session, csrf }),
        _ => Err(LeetfreshError::Auth(format!(
            "Could not find LeetCode cookies in Chrome.\n\
             Make sure you're logged into https://{TARGET_DOMAIN} in Chrome."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::SessionCookies;

    #[test]
    fn cookie_header_joins_both_cookies() {
        let cookies = SessionCookies {
            session: "sess-value".to_string(),
            csrf: "csrf-value".to_string(),
        };
        assert_eq!(
            cookies.cookie_header(),
            "LEETCODE_SESSION=sess-value; csrftoken=csrf-value"
        );
    }
}
