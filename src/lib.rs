//! leetfresh - LeetCode cookie refresh helper
//!
//! This crate reads the LeetCode session cookies straight out of Chrome's
//! cookie store, verifies them against the LeetCode API, and pushes them to
//! the project `.env` file and/or GitHub Actions secrets via the `gh` CLI.

pub mod browser;
pub mod cli;
pub mod config;
pub mod envfile;
pub mod error;
pub mod github;
pub mod leetcode;
pub mod logging;
pub mod summary;
pub mod utils;

pub use error::{LeetfreshError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
