//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and the end-to-end
//! refresh flow. Helpers below return errors; only `run` converts a failure
//! into the printed message and the process exit status.

use crate::browser;
use crate::config::{Mode, Options};
use crate::envfile;
use crate::error::Result;
use crate::github;
use crate::leetcode::LeetCodeApi;
use crate::summary::Summary;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};

/// Main entry point for the CLI application
pub fn run() {
    crate::logging::init();

    let app = create_app();
    let matches = app.get_matches();
    let options = build_options_from_args(&matches);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            println!("leetfresh: error: Failed to create async runtime: {}", e);
            std::process::exit(1);
        }
    };

    // An interrupt is a clean exit, not a stack trace.
    rt.spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\nCancelled.");
            std::process::exit(0);
        }
    });

    match rt.block_on(run_with_options(&options)) {
        Ok(()) => {}
        Err(e) => {
            println!("leetfresh: error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run one refresh end to end with resolved options.
async fn run_with_options(options: &Options) -> Result<()> {
    // Prerequisites and target repository, only when publishing remotely.
    let repo = if options.mode.publishes_remote() {
        github::ensure_cli_ready()?;
        let repo = github::resolve_repo(options.repo_override.as_deref())?;
        println!("Target repository: {}", repo);
        Some(repo)
    } else {
        None
    };

    println!("Reading cookies from Chrome...");
    let cookies = browser::session_cookies(options.profile.as_deref())?;
    println!("Cookies extracted successfully.");

    let api = LeetCodeApi::new()?;
    let username = api.current_username(&cookies).await;
    match username.as_deref() {
        Some(username) => println!("Verified: logged in as '{}'", username),
        None => println!("Warning: Could not verify cookies (they may still work)."),
    }

    let env_updated = if options.mode.persists_local() {
        println!();
        println!("Saving cookies to .env file...");
        let path = envfile::project_env_path();
        envfile::persist(&path, &cookies)?;
        println!("  Updated: {}", path.display());
        true
    } else {
        false
    };

    if let Some(repo) = &repo {
        println!();
        println!("Updating GitHub secrets for {}...", repo);
        github::publish_secrets(repo, &cookies)?;
    }

    println!();
    println!(
        "{}",
        Summary {
            cookies: &cookies,
            username: username.as_deref(),
            env_updated,
            repo: repo.as_ref(),
        }
    );

    Ok(())
}

/// Create the CLI application structure
fn create_app() -> Command {
    Command::new("leetfresh")
        .version(crate::VERSION)
        .about("Refresh LeetCode session cookies from Chrome")
        .arg(
            Arg::new("local")
                .long("local")
                .help("Save cookies to the project .env file (default)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("github")
                .long("github")
                .help("Update GitHub Actions secrets via the gh CLI")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("both")
                .long("both")
                .help("Save to .env and update GitHub secrets")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("mode")
                .args(["local", "github", "both"])
                .multiple(false),
        )
        .arg(
            Arg::new("repo")
                .long("repo")
                .value_name("OWNER/NAME")
                .help("Override the auto-detected GitHub repository"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_name("NAME|PATH")
                .help("Chrome profile name, or a path to a cookie database"),
        )
}

/// Resolve run options from parsed command line arguments
fn build_options_from_args(matches: &ArgMatches) -> Options {
    let mode = if matches.get_flag("both") {
        Mode::Both
    } else if matches.get_flag("github") {
        Mode::Github
    } else {
        Mode::Local
    };

    Options {
        mode,
        repo_override: matches.get_one::<String>("repo").cloned(),
        profile: matches.get_one::<String>("profile").cloned(),
    }
}
