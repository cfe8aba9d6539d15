//! macOS key acquisition for the Chrome cookie store.
//!
//! The AES key is derived from the "Chrome Safe Storage" password in the
//! login keychain; reading it prompts the user once per binary.

use super::{decrypt_aes_cbc, derive_key, strip_domain_hash, KEY_LENGTH};
use crate::error::{LeetfreshError, Result};
use security_framework::passwords::get_generic_password;
use std::path::PathBuf;

const KEY_DERIVE_ITERATIONS: u32 = 1003;
const KEYCHAIN_SERVICE: &str = "Chrome Safe Storage";
const KEYCHAIN_ACCOUNT: &str = "Chrome";

pub(super) fn user_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LeetfreshError::Config("Cannot determine home directory".to_string()))?;
    Ok(home.join("Library/Application Support/Google/Chrome"))
}

pub(super) struct CookieDecryptor {
    key: Option<[u8; KEY_LENGTH]>,
    meta_version: i64,
}

impl CookieDecryptor {
    pub(super) fn new(meta_version: i64) -> Result<Self> {
        let password = match get_generic_password(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT) {
            Ok(password) => Some(password),
            Err(err) => {
                log::warn!("Failed to read keychain password for Chrome: {}", err);
                None
            }
        };
        let key = password.map(|pass| derive_key(&pass, KEY_DERIVE_ITERATIONS));
        Ok(Self { key, meta_version })
    }

    pub(super) fn decrypt(&self, encrypted_value: &[u8]) -> Option<String> {
        if encrypted_value.len() < 3 {
            return None;
        }
        let (version, ciphertext) = encrypted_value.split_at(3);
        if version == b"v10" {
            let key = self.key.as_ref()?;
            let decrypted = decrypt_aes_cbc(ciphertext, key).ok()?;
            let trimmed = strip_domain_hash(&decrypted, self.meta_version);
            String::from_utf8(trimmed.to_vec()).ok()
        } else {
            String::from_utf8(encrypted_value.to_vec()).ok()
        }
    }
}
