//! Fallback for targets without a cookie decryption implementation.

use crate::error::{LeetfreshError, Result};
use std::path::PathBuf;

const MESSAGE: &str = "Chrome cookie extraction is only implemented for macOS and Linux";

pub(super) fn user_data_dir() -> Result<PathBuf> {
    Err(LeetfreshError::Unsupported(MESSAGE.to_string()))
}

pub(super) struct CookieDecryptor;

impl CookieDecryptor {
    pub(super) fn new(_meta_version: i64) -> Result<Self> {
        Err(LeetfreshError::Unsupported(MESSAGE.to_string()))
    }

    pub(super) fn decrypt(&self, _encrypted_value: &[u8]) -> Option<String> {
        None
    }
}
