//! Utility functions and helpers

use crate::error::{LeetfreshError, Result};
use std::path::PathBuf;

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(rest) = path.strip_prefix('~') {
            let home_dir = dirs::home_dir().ok_or_else(|| {
                LeetfreshError::Config("Cannot determine home directory".to_string())
            })?;
            Ok(home_dir.join(rest.strip_prefix('/').unwrap_or(rest)))
        } else {
            Ok(PathBuf::from(path))
        }
    }
}
