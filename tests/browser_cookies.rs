#![cfg(any(target_os = "macos", target_os = "linux"))]

use leetfresh::browser;
use leetfresh::error::LeetfreshError;
use rusqlite::Connection;
use std::path::Path;
use tempfile::tempdir;

fn create_chrome_cookie_db(path: &Path, cookies: &[(&str, &str, &str)]) {
    let conn = Connection::open(path).expect("open chrome db");
    conn.execute("CREATE TABLE meta (key TEXT, value TEXT)", [])
        .expect("create meta");
    conn.execute("INSERT INTO meta (key, value) VALUES ('version', '24')", [])
        .expect("insert meta");
    conn.execute(
        "CREATE TABLE cookies (
            host_key TEXT,
            name TEXT,
            value TEXT,
            encrypted_value BLOB,
            path TEXT,
            expires_utc INTEGER,
            is_secure INTEGER,
            is_httponly INTEGER
        )",
        [],
    )
    .expect("create cookies");
    for (host, name, value) in cookies {
        conn.execute(
            "INSERT INTO cookies (
                host_key, name, value, encrypted_value, path, expires_utc, is_secure, is_httponly
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            (host, name, value, Vec::<u8>::new(), "/", 0i64, 1i64, 1i64),
        )
        .expect("insert cookie");
    }
}

#[test]
fn session_cookies_found_in_fixture_db() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("Cookies");
    create_chrome_cookie_db(
        &db_path,
        &[
            (".leetcode.com", "LEETCODE_SESSION", "session-value"),
            ("leetcode.com", "csrftoken", "csrf-value"),
            ("example.com", "other", "unrelated"),
        ],
    );

    let cookies = browser::session_cookies(Some(&db_path.to_string_lossy()))
        .expect("extract session cookies");
    assert_eq!(cookies.session, "session-value");
    assert_eq!(cookies.csrf, "csrf-value");
}

#[test]
fn missing_session_cookie_reports_login_remediation() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("Cookies");
    create_chrome_cookie_db(&db_path, &[("leetcode.com", "csrftoken", "csrf-value")]);

    let err = browser::session_cookies(Some(&db_path.to_string_lossy()))
        .expect_err("session cookie absent");
    assert!(matches!(err, LeetfreshError::Auth(_)));
    assert!(err.to_string().contains("logged into"));
}

#[test]
fn cookies_from_other_domains_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("Cookies");
    create_chrome_cookie_db(
        &db_path,
        &[
            ("notleetcode.com", "LEETCODE_SESSION", "spoofed"),
            ("notleetcode.com", "csrftoken", "spoofed"),
        ],
    );

    let err = browser::session_cookies(Some(&db_path.to_string_lossy()))
        .expect_err("wrong-domain cookies must not count");
    assert!(matches!(err, LeetfreshError::Auth(_)));
}

#[test]
fn profile_directory_is_searched_for_the_newest_store() {
    let dir = tempdir().expect("tempdir");
    let profile_dir = dir.path().join("Default");
    std::fs::create_dir(&profile_dir).expect("profile dir");
    let db_path = profile_dir.join("Cookies");
    create_chrome_cookie_db(
        &db_path,
        &[
            ("leetcode.com", "LEETCODE_SESSION", "session-value"),
            ("leetcode.com", "csrftoken", "csrf-value"),
        ],
    );

    let cookies = browser::session_cookies(Some(&dir.path().to_string_lossy()))
        .expect("extract via directory search");
    assert_eq!(cookies.session, "session-value");
}

#[test]
fn unreadable_store_reports_close_chrome_hint() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nowhere/Cookies");

    let err = browser::session_cookies(Some(&missing.to_string_lossy()))
        .expect_err("missing data dir");
    assert!(matches!(err, LeetfreshError::BrowserCookie(_)));
    assert!(err.to_string().contains("close Chrome"));
}
