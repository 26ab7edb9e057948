//! Quote-of-the-day source (hitokoto).

#[cfg(test)]
#[path = "quote_test.rs"]
mod quote_test;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ErrorCode;

pub const HITOKOTO_URL: &str = "https://v1.hitokoto.cn";

const UNKNOWN_AUTHOR: &str = "佚名";

/// A quote ready to drop onto a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    /// Already formatted as `— name`.
    pub author: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Request(String),
    #[error("quote service returned status {0}")]
    Status(u16),
    #[error("quote response malformed: {0}")]
    Parse(String),
}

impl ErrorCode for QuoteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_QUOTE_REQUEST",
            Self::Status(_) => "E_QUOTE_STATUS",
            Self::Parse(_) => "E_QUOTE_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}

#[derive(Deserialize)]
struct Hitokoto {
    hitokoto: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    from_who: Option<String>,
}

/// Parse a hitokoto body. Attribution prefers `from_who`, then `from`.
///
/// # Errors
///
/// Returns `Parse` when the body lacks a `hitokoto` string.
pub fn parse_quote(json: &str) -> Result<Quote, QuoteError> {
    let raw: Hitokoto = serde_json::from_str(json).map_err(|e| QuoteError::Parse(e.to_string()))?;
    let nonblank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
    let name = nonblank(raw.from_who)
        .or_else(|| nonblank(raw.from))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned());
    Ok(Quote { text: raw.hitokoto, author: format!("— {name}") })
}

/// Fetch one quote from `url` (normally [`HITOKOTO_URL`]).
///
/// # Errors
///
/// Returns an error on network failure, non-2xx status or an unreadable body.
pub async fn fetch_quote(http: &reqwest::Client, url: &str) -> Result<Quote, QuoteError> {
    let resp = http.get(url).send().await.map_err(|e| QuoteError::Request(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "quote service rejected request");
        return Err(QuoteError::Status(status.as_u16()));
    }
    let body = resp.text().await.map_err(|e| QuoteError::Request(e.to_string()))?;
    let quote = parse_quote(&body)?;
    info!(text_len = quote.text.len(), "quote fetched");
    Ok(quote)
}
