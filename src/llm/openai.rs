//! OpenAI-compatible chat completions adapter.
//!
//! Shared by `OpenAI`, Zhipu and Volcengine: all three accept
//! `POST {base}/chat/completions` with bearer auth and answer with
//! `choices[0].message.content`. Volcengine's `model` is an inference
//! endpoint id rather than a model name, which changes nothing on the wire.

use serde::{Deserialize, Serialize};

use super::config::{SYSTEM_PROMPT, effective_base_url, effective_model};
use super::types::{GenerationError, ProviderConfig, ProviderRequest};
use crate::consts::MAX_OUTPUT_TOKENS;

// =============================================================================
// REQUEST
// =============================================================================

/// Build the chat completions request for `config`.
///
/// # Errors
///
/// Returns `TransportFailure` if the body cannot be encoded.
pub fn build_request(config: &ProviderConfig, prompt: &str) -> Result<ProviderRequest, GenerationError> {
    let model = effective_model(config);
    let body = CcRequest {
        model: &model,
        messages: [
            CcMessage { role: "system", content: SYSTEM_PROMPT },
            CcMessage { role: "user", content: prompt },
        ],
        max_tokens: MAX_OUTPUT_TOKENS,
    };
    let body = serde_json::to_value(&body).map_err(|e| GenerationError::TransportFailure(e.to_string()))?;

    Ok(ProviderRequest {
        vendor: config.provider,
        url: format!("{}/chat/completions", effective_base_url(config)),
        headers: vec![("Authorization", format!("Bearer {}", config.api_key))],
        body,
    })
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: [CcMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CcResponse {
    #[serde(default)]
    choices: Vec<CcChoice>,
}

#[derive(Deserialize)]
struct CcChoice {
    #[serde(default)]
    message: Option<CcReplyMessage>,
}

#[derive(Deserialize)]
struct CcReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract `choices[0].message.content`; absent or null yields `""`.
///
/// # Errors
///
/// Returns `TransportFailure` when the body is not valid JSON of the
/// expected shape.
pub fn parse_response(json: &str) -> Result<String, GenerationError> {
    let resp: CcResponse = serde_json::from_str(json)
        .map_err(|e| GenerationError::TransportFailure(format!("chat completions response parse failed: {e}")))?;
    Ok(resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default())
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
