//! Anthropic Messages API adapter.
//!
//! `POST {base}/v1/messages` with `x-api-key` and `anthropic-version`
//! headers; the system instruction travels in the top-level `system` field.

use serde::{Deserialize, Serialize};

use super::config::{ANTHROPIC_API_VERSION, SYSTEM_PROMPT, effective_base_url, effective_model};
use super::types::{GenerationError, ProviderConfig, ProviderRequest};
use crate::consts::MAX_OUTPUT_TOKENS;

/// Build the messages request for `config`.
///
/// # Errors
///
/// Returns `TransportFailure` if the body cannot be encoded.
pub fn build_request(config: &ProviderConfig, prompt: &str) -> Result<ProviderRequest, GenerationError> {
    let model = effective_model(config);
    let body = ApiRequest {
        model: &model,
        max_tokens: MAX_OUTPUT_TOKENS,
        system: SYSTEM_PROMPT,
        messages: [ApiMessage { role: "user", content: prompt }],
    };
    let body = serde_json::to_value(&body).map_err(|e| GenerationError::TransportFailure(e.to_string()))?;

    Ok(ProviderRequest {
        vendor: config.provider,
        url: format!("{}/v1/messages", effective_base_url(config)),
        headers: vec![
            ("x-api-key", config.api_key.clone()),
            ("anthropic-version", ANTHROPIC_API_VERSION.to_string()),
        ],
        body,
    })
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ApiMessage<'a>; 1],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    /// Any other block type (thinking, tool use, ...).
    #[serde(other)]
    Unknown,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract `content[0].text`; a missing or non-text first block yields `""`.
///
/// # Errors
///
/// Returns `TransportFailure` when the body is not valid JSON of the
/// expected shape.
pub fn parse_response(json: &str) -> Result<String, GenerationError> {
    let api: ApiResponse = serde_json::from_str(json)
        .map_err(|e| GenerationError::TransportFailure(format!("messages response parse failed: {e}")))?;
    Ok(match api.content.into_iter().next() {
        Some(ContentBlock::Text { text }) => text,
        Some(ContentBlock::Unknown) | None => String::new(),
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
