//! Linux key acquisition for the Chrome cookie store.
//!
//! `v10` values use the fixed fallback password, `v11` values use the key
//! Chrome parked in the GNOME keyring. Some distributions store an empty
//! password, so that key is always tried last.

use super::{decrypt_aes_cbc, derive_key, strip_domain_hash, KEY_LENGTH};
use crate::error::{LeetfreshError, Result};
use secret_service::blocking::SecretService;
use secret_service::EncryptionType;
use std::path::PathBuf;

const KEY_DERIVE_ITERATIONS: u32 = 1;
const V10_PASSWORD: &[u8] = b"peanuts";
const KEYRING_LABEL: &str = "Chrome Safe Storage";

pub(super) fn user_data_dir() -> Result<PathBuf> {
    let config_home = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or_else(|| {
            LeetfreshError::Config("Cannot determine config directory".to_string())
        })?;
    Ok(config_home.join("google-chrome"))
}

pub(super) struct CookieDecryptor {
    v10_key: [u8; KEY_LENGTH],
    empty_key: [u8; KEY_LENGTH],
    v11_key: Option<[u8; KEY_LENGTH]>,
    meta_version: i64,
}

impl CookieDecryptor {
    pub(super) fn new(meta_version: i64) -> Result<Self> {
        let v10_key = derive_key(V10_PASSWORD, KEY_DERIVE_ITERATIONS);
        let empty_key = derive_key(b"", KEY_DERIVE_ITERATIONS);
        let v11_key = keyring_password().map(|password| derive_key(&password, KEY_DERIVE_ITERATIONS));

        Ok(Self {
            v10_key,
            empty_key,
            v11_key,
            meta_version,
        })
    }

    pub(super) fn decrypt(&self, encrypted_value: &[u8]) -> Option<String> {
        if encrypted_value.len() < 3 {
            return None;
        }
        let (version, ciphertext) = encrypted_value.split_at(3);
        let keys: Vec<&[u8; KEY_LENGTH]> = match version {
            b"v10" => vec![&self.v10_key, &self.empty_key],
            b"v11" => match self.v11_key.as_ref() {
                Some(key) => vec![key, &self.empty_key],
                None => {
                    log::warn!("Cannot decrypt v11 cookie without a keyring password");
                    return None;
                }
            },
            _ => {
                log::warn!("Unknown Chrome cookie version: {:?}", version);
                return None;
            }
        };

        for key in keys {
            let decrypted = match decrypt_aes_cbc(ciphertext, key) {
                Ok(decrypted) => decrypted,
                Err(_) => continue,
            };
            let trimmed = strip_domain_hash(&decrypted, self.meta_version);
            if let Ok(value) = String::from_utf8(trimmed.to_vec()) {
                return Some(value);
            }
        }
        log::warn!("Failed to decrypt Chrome cookie: no candidate key matched");
        None
    }
}

/// Look up "Chrome Safe Storage" in the session keyring. Any failure is
/// logged and treated as "no keyring password"; the v10 fallback still works.
fn keyring_password() -> Option<Vec<u8>> {
    let service = match SecretService::connect(EncryptionType::Dh) {
        Ok(service) => service,
        Err(err) => {
            log::warn!("Failed to connect to secret service: {}", err);
            return None;
        }
    };

    let collection = service
        .get_default_collection()
        .or_else(|_| service.get_any_collection());
    let collection = match collection {
        Ok(collection) => collection,
        Err(err) => {
            log::warn!("Failed to read keyring collection: {}", err);
            return None;
        }
    };

    let items = match collection.get_all_items() {
        Ok(items) => items,
        Err(err) => {
            log::warn!("Failed to read keyring items: {}", err);
            return None;
        }
    };

    for item in items {
        if item.get_label().unwrap_or_default() != KEYRING_LABEL {
            continue;
        }
        if item.is_locked().unwrap_or(false) {
            if let Err(err) = item.unlock() {
                log::warn!("Failed to unlock keyring item: {}", err);
            }
        }
        match item.get_secret() {
            Ok(secret) => return Some(secret),
            Err(err) => {
                log::warn!("Failed to read keyring secret: {}", err);
                return None;
            }
        }
    }

    log::debug!("No {} entry in the keyring", KEYRING_LABEL);
    None
}
