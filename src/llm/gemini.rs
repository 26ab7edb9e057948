//! Gemini `generateContent` adapter.
//!
//! The key travels in the query string and there is no system role, so the
//! instruction is prepended to the prompt.

use serde::{Deserialize, Serialize};

use super::config::{SYSTEM_PROMPT, effective_base_url, effective_model};
use super::types::{GenerationError, ProviderConfig, ProviderRequest};
use crate::consts::MAX_OUTPUT_TOKENS;

/// Build `{base}/{model}:generateContent?key={api_key}`.
///
/// # Errors
///
/// Returns `TransportFailure` if the base URL does not parse or the body
/// cannot be encoded.
pub fn build_request(config: &ProviderConfig, prompt: &str) -> Result<ProviderRequest, GenerationError> {
    let endpoint = format!("{}/{}:generateContent", effective_base_url(config), effective_model(config));
    let mut url = reqwest::Url::parse(&endpoint)
        .map_err(|e| GenerationError::TransportFailure(format!("invalid Gemini endpoint '{endpoint}': {e}")))?;
    url.query_pairs_mut().append_pair("key", &config.api_key);

    let text = format!("{SYSTEM_PROMPT}\n\n{prompt}");
    let body = GenerateRequest {
        contents: [RequestContent { parts: [RequestPart { text: &text }] }],
        generation_config: GenerationConfig { max_output_tokens: MAX_OUTPUT_TOKENS },
    };
    let body = serde_json::to_value(&body).map_err(|e| GenerationError::TransportFailure(e.to_string()))?;

    Ok(ProviderRequest { vendor: config.provider, url: url.into(), headers: Vec::new(), body })
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract `candidates[0].content.parts[0].text`; anything missing yields `""`.
///
/// # Errors
///
/// Returns `TransportFailure` when the body is not valid JSON of the
/// expected shape.
pub fn parse_response(json: &str) -> Result<String, GenerationError> {
    let resp: GenerateResponse = serde_json::from_str(json)
        .map_err(|e| GenerationError::TransportFailure(format!("generateContent response parse failed: {e}")))?;
    Ok(resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default())
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
