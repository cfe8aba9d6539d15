//! Flat `KEY=VALUE` environment file handling.
//!
//! The persisted file is rewritten wholesale on every refresh, but existing
//! entries and their relative order survive the round trip. Comments and
//! blank lines do not.

use crate::browser::SessionCookies;
use crate::config::{CSRF_KEY, ENV_FILE_NAME, SESSION_KEY};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Ordered key-value store backing the persisted file.
#[derive(Debug, Default)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Load from `path`; a missing file yields an empty mapping.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Comments, blank lines, and lines without a `=` are dropped. A
    /// duplicated key keeps its first position with the last value.
    fn parse(contents: &str) -> Self {
        let mut file = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                file.set(key.trim(), value.trim());
            }
        }
        file
    }

    /// Overwrite `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| existing == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back out, one `KEY=VALUE` line per entry in mapping order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }
}

/// Merge the refreshed cookies into the env file at `path`.
pub fn persist(path: &Path, cookies: &SessionCookies) -> Result<()> {
    let mut file = EnvFile::load(path)?;
    file.set(SESSION_KEY, &cookies.session);
    file.set(CSRF_KEY, &cookies.csrf);
    file.save(path)
}

/// The git toplevel when inside a repository, else the current directory.
pub fn project_root() -> PathBuf {
    let output = Command::new("git")
        .arg("rev-parse")
        .arg("--show-toplevel")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output();
    if let Ok(output) = output {
        if output.status.success() {
            let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !toplevel.is_empty() {
                return PathBuf::from(toplevel);
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Where the Local Persister writes: `<project root>/.env`.
pub fn project_env_path() -> PathBuf {
    project_root().join(ENV_FILE_NAME)
}
