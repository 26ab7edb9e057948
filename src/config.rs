//! Application configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::llm::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts};
use crate::quote::HITOKOTO_URL;

pub const DEFAULT_STORE_PATH: &str = "moodcard-store.json";
pub const DEFAULT_CARD_PATH: &str = "moodcard-card.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Provider settings file.
    pub store_path: PathBuf,
    /// Working card file used by the CLI.
    pub card_path: PathBuf,
    pub quote_url: String,
    pub timeouts: Timeouts,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// All optional:
    /// - `MOODCARD_STORE_PATH`: default `moodcard-store.json`
    /// - `MOODCARD_CARD_PATH`: default `moodcard-card.json`
    /// - `MOODCARD_QUOTE_URL`: default `https://v1.hitokoto.cn`
    /// - `MOODCARD_REQUEST_TIMEOUT_SECS`: default 120
    /// - `MOODCARD_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source. Blank values count as
    /// unset and unparseable numbers fall back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_u64 = |key: &str, default: u64| var(key).and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default);

        Self {
            store_path: var("MOODCARD_STORE_PATH").map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            card_path: var("MOODCARD_CARD_PATH").map_or_else(|| PathBuf::from(DEFAULT_CARD_PATH), PathBuf::from),
            quote_url: var("MOODCARD_QUOTE_URL").unwrap_or_else(|| HITOKOTO_URL.to_owned()),
            timeouts: Timeouts {
                request_secs: parse_u64("MOODCARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_u64("MOODCARD_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}
