//! CLI command implementations

pub mod auth;
pub mod config;
pub mod favorites;
pub mod movies;
pub mod profile;
pub mod users;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use myflix_core::domain::parse_birthday;
use myflix_core::MyflixContext;
use tracing::debug;

/// Environment variable overriding the data directory
const DATA_DIR_ENV: &str = "MYFLIX_DIR";

/// Get the myflix directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".myflix"))
}

/// Build the myflix context over the data directory
pub fn get_context() -> Result<MyflixContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create myflix directory: {:?}", data_dir))?;
    debug!(data_dir = %data_dir.display(), "opening myflix context");

    MyflixContext::new(&data_dir).context("Failed to initialize myflix context")
}

/// One-line message for a failed command
///
/// API failures show their short user-facing text; anything else shows
/// the full context chain.
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<myflix_core::Error>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", error),
    }
}

/// Parse an optional `--birthday` value; blank means not given
pub fn parse_birthday_arg(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_birthday(s)
            .map(Some)
            .with_context(|| format!("Invalid birthday '{}', expected YYYY-MM-DD", s)),
    }
}

/// Whether we can ask the user questions
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}
