//! Chrome cookie store access
//!
//! The cookie store is a SQLite database under the per-OS user data
//! directory. Values are AES-128-CBC encrypted with a PBKDF2-derived key;
//! where that key comes from differs per platform, so key acquisition lives
//! in the platform modules and everything else is shared here.

use crate::browser::Cookie;
use crate::error::{LeetfreshError, Result};
use crate::utils::FileUtils;
use aes::Aes128;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rusqlite::{params, Connection, Row};
use sha1::Sha1;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as platform;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as platform;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod unsupported;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use unsupported as platform;

const KEY_DERIVE_SALT: &[u8] = b"saltysalt";
const KEY_LENGTH: usize = 16;
const AES_IV: &[u8; 16] = b"                ";

/// Read all cookies scoped to `domain` from the local Chrome profile.
///
/// `profile` may be a profile directory name under the user data dir, or a
/// path pointing at a cookie database file directly.
pub fn domain_cookies(domain: &str, profile: Option<&str>) -> Result<Vec<Cookie>> {
    let cookie_db = find_cookie_database(profile)?;

    // Chrome keeps the live database locked while running; read a snapshot.
    let temp_dir = tempdir()
        .map_err(|e| LeetfreshError::BrowserCookie(format!("Failed to create temp dir: {}", e)))?;
    let temp_db = temp_dir.path().join("chrome-cookies.sqlite");
    fs::copy(&cookie_db, &temp_db)
        .map_err(|e| LeetfreshError::BrowserCookie(format!("Failed to copy cookies DB: {}", e)))?;

    let conn = Connection::open(&temp_db)
        .map_err(|e| LeetfreshError::BrowserCookie(format!("Failed to open cookies DB: {}", e)))?;
    let meta_version = read_meta_version(&conn);
    let decryptor = platform::CookieDecryptor::new(meta_version)?;

    let mut stmt = conn
        .prepare("SELECT host_key, name, value, encrypted_value FROM cookies WHERE host_key LIKE ?1")
        .map_err(|e| {
            LeetfreshError::BrowserCookie(format!("Failed to prepare cookie query: {}", e))
        })?;
    let mut rows = stmt
        .query(params![format!("%{}", domain)])
        .map_err(|e| LeetfreshError::BrowserCookie(format!("Failed to query cookies: {}", e)))?;

    let mut cookies = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|e| LeetfreshError::BrowserCookie(format!("Failed to read cookie row: {}", e)))?
    {
        if let Some(cookie) = row_to_cookie(row, &decryptor)? {
            if domain_matches(&cookie.domain, domain) {
                cookies.push(cookie);
            }
        }
    }

    Ok(cookies)
}

/// Host-key match: the exact domain, a `www.`-style subdomain, or Chrome's
/// leading-dot domain cookies.
fn domain_matches(host_key: &str, domain: &str) -> bool {
    let host = host_key.trim_start_matches('.');
    host == domain || host.ends_with(&format!(".{}", domain))
}

fn find_cookie_database(profile: Option<&str>) -> Result<PathBuf> {
    let search_root = if let Some(profile) = profile {
        if is_path_like(profile) {
            let expanded = FileUtils::expand_path(profile)?;
            if expanded.is_file() {
                return Ok(expanded);
            }
            expanded
        } else {
            platform::user_data_dir()?.join(profile)
        }
    } else {
        platform::user_data_dir()?
    };

    if !search_root.exists() {
        return Err(LeetfreshError::FileNotFound(format!(
            "Chrome data dir not found: {:?}",
            search_root
        )));
    }

    let candidates = find_files(&search_root, "Cookies")?;
    newest_path(candidates).ok_or_else(|| {
        LeetfreshError::FileNotFound("Chrome cookies database not found".to_string())
    })
}

fn is_path_like(value: &str) -> bool {
    value.contains('/') || value.contains('\\') || value.starts_with('~')
}

fn find_files(root: &Path, filename: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| {
            LeetfreshError::BrowserCookie(format!("Failed to read directory {:?}: {}", dir, e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                LeetfreshError::BrowserCookie(format!(
                    "Failed to read directory entry in {:?}: {}",
                    dir, e
                ))
            })?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.file_name().and_then(|name| name.to_str()) == Some(filename) {
                matches.push(path);
            }
        }
    }
    Ok(matches)
}

fn newest_path(paths: Vec<PathBuf>) -> Option<PathBuf> {
    paths
        .into_iter()
        .filter_map(|path| {
            let modified = fs::metadata(&path).ok()?.modified().ok()?;
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}

fn read_meta_version(conn: &Connection) -> i64 {
    let result: std::result::Result<String, _> =
        conn.query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
            row.get(0)
        });
    result
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

fn row_to_cookie(row: &Row<'_>, decryptor: &platform::CookieDecryptor) -> Result<Option<Cookie>> {
    let host_key: String = row.get(0).map_err(|e| {
        LeetfreshError::BrowserCookie(format!("Failed to read cookie host: {}", e))
    })?;
    let name: String = row.get(1).map_err(|e| {
        LeetfreshError::BrowserCookie(format!("Failed to read cookie name: {}", e))
    })?;
    let value: String = row.get(2).map_err(|e| {
        LeetfreshError::BrowserCookie(format!("Failed to read cookie value: {}", e))
    })?;
    let encrypted_value = read_encrypted_value(row)?;

    let cookie_value = if !value.is_empty() {
        value
    } else if !encrypted_value.is_empty() {
        match decryptor.decrypt(&encrypted_value) {
            Some(value) => value,
            None => return Ok(None),
        }
    } else {
        return Ok(None);
    };

    Ok(Some(Cookie {
        name,
        value: cookie_value,
        domain: host_key,
    }))
}

fn read_encrypted_value(row: &Row<'_>) -> Result<Vec<u8>> {
    let value = row.get_ref(3).map_err(|e| {
        LeetfreshError::BrowserCookie(format!("Failed to read cookie ciphertext: {}", e))
    })?;
    match value {
        rusqlite::types::ValueRef::Blob(bytes) => Ok(bytes.to_vec()),
        rusqlite::types::ValueRef::Text(text) => Ok(text.to_vec()),
        rusqlite::types::ValueRef::Null => Ok(Vec::new()),
        _ => Err(LeetfreshError::BrowserCookie(
            "Unsupported cookie ciphertext type".to_string(),
        )),
    }
}

fn derive_key(password: &[u8], iterations: u32) -> [u8; KEY_LENGTH] {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha1>(password, KEY_DERIVE_SALT, iterations, &mut key);
    key
}

fn decrypt_aes_cbc(ciphertext: &[u8], key: &[u8; KEY_LENGTH]) -> Result<Vec<u8>> {
    let mut buffer = ciphertext.to_vec();
    let decryptor = cbc::Decryptor::<Aes128>::new_from_slices(key, AES_IV).map_err(|e| {
        LeetfreshError::BrowserCookie(format!("Failed to create AES decryptor: {}", e))
    })?;
    let plaintext = decryptor
        .decrypt_padded_mut::<Pkcs7>(&mut buffer)
        .map_err(|_| LeetfreshError::BrowserCookie("Failed to decrypt cookie".to_string()))?;
    Ok(plaintext.to_vec())
}

/// Cookie DBs with meta version 24 and later prefix the plaintext with a
/// 32-byte SHA-256 hash of the host key.
fn strip_domain_hash(decrypted: &[u8], meta_version: i64) -> &[u8] {
    if meta_version >= 24 && decrypted.len() > 32 {
        &decrypted[32..]
    } else {
        decrypted
    }
}
