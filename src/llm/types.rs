//! Gateway types: provider ids, stored configs, requests and results.
//!
//! Provider-neutral types shared by every vendor adapter.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// PROVIDER KIND
// =============================================================================

/// The vendors the gateway can talk to. Closed set: adding a vendor means a
/// new variant here plus one adapter, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// `OpenAI` chat completions.
    OpenAi,
    /// Anthropic messages.
    Anthropic,
    /// Zhipu GLM, OpenAI-compatible.
    Zhipu,
    /// Volcengine Ark, OpenAI-compatible; the model field is an endpoint id.
    Volcengine,
    /// Google Gemini `generateContent`.
    Gemini,
}

impl ProviderKind {
    pub const ALL: [Self; 5] = [Self::OpenAi, Self::Anthropic, Self::Zhipu, Self::Volcengine, Self::Gemini];

    /// Storage / wire id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Zhipu => "zhipu",
            Self::Volcengine => "volcengine",
            Self::Gemini => "gemini",
        }
    }

    /// Name shown in provider pickers.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic (Claude)",
            Self::Zhipu => "智谱 AI (GLM)",
            Self::Volcengine => "火山引擎",
            Self::Gemini => "Google Gemini",
        }
    }

    /// Short vendor name used in upstream error messages.
    #[must_use]
    pub fn vendor_label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Zhipu => "Zhipu",
            Self::Volcengine => "Volcengine",
            Self::Gemini => "Gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| format!("unknown provider '{s}'"))
    }
}

// =============================================================================
// PROVIDER CONFIG
// =============================================================================

/// Saved credentials and endpoint for one provider. Blank `base_url` or
/// `model_name` fall back to the vendor default at request time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub model_name: String,
}

impl ProviderConfig {
    #[must_use]
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self { provider, api_key: api_key.into(), base_url: String::new(), model_name: String::new() }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

// =============================================================================
// REQUEST / REPLY
// =============================================================================

/// A fully built vendor HTTP request. Always a JSON `POST`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub vendor: ProviderKind,
    pub url: String,
    /// Extra headers beyond `Content-Type: application/json`.
    pub headers: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

impl ProviderRequest {
    /// Value of a header, by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP reply as seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

// =============================================================================
// RESULT
// =============================================================================

/// Successful generation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// May be empty when the vendor returned no text.
    pub text: String,
}

/// Either generated text or a tagged failure, never both.
pub type GenerationResult = Result<Generated, GenerationError>;

/// Failures of a generation request. All are returned as values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No provider is selected (or the selected one has no saved config).
    #[error("no AI provider configured; add an API key in settings first")]
    NotConfigured,

    /// The vendor answered with a non-2xx status.
    #[error("{vendor} API error: {body}")]
    UpstreamError { vendor: &'static str, status: u16, body: String },

    /// Network failure, unreadable body, or malformed JSON.
    #[error("generation failed: {0}; please try again")]
    TransportFailure(String),

    /// A generation from the same control is already outstanding.
    #[error("a generation request is already in progress")]
    Busy,
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_NOT_CONFIGURED",
            Self::UpstreamError { .. } => "E_UPSTREAM",
            Self::TransportFailure(_) => "E_TRANSPORT",
            Self::Busy => "E_BUSY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::TransportFailure(_) | Self::UpstreamError { status: 429 | 500..=599, .. })
    }
}
