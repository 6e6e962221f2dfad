//! Configuration for the replay driver.
//!
//! Defaults work out of the box; overrides come from a few environment
//! variables:
//!
//! - `MATCHBOOK_SHOW_BOOK`      (default: "true")  — print the final top-of-book
//! - `MATCHBOOK_ARENA_CAPACITY` (default: "65536") — resting-order slots to preallocate

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Replay driver configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to print the final top-of-book after the trade stream.
    pub show_book: bool,

    /// Number of resting-order slots to preallocate in the book arena.
    pub arena_capacity: usize,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back to
    /// the defaults above.
    pub fn from_env() -> Result<Self> {
        let show_book = read_env_or_default("MATCHBOOK_SHOW_BOOK", true)?;
        let arena_capacity = read_env_or_default("MATCHBOOK_ARENA_CAPACITY", 65_536usize)?;

        Ok(Config {
            show_book,
            arena_capacity,
        })
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}")),
        Err(_) => Ok(default),
    }
}
