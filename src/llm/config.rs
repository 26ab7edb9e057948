//! Per-vendor defaults and HTTP timeouts for the gateway.

use super::types::{ProviderConfig, ProviderKind};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Fixed instruction sent with every prompt: a copywriting assistant for
/// short aesthetic, emotional or inspirational lines that returns only the
/// text itself.
pub const SYSTEM_PROMPT: &str =
    "你是一个专业的文案生成助手，擅长生成唯美、情感、励志的短句。请直接返回文案，不要添加其他说明。";

pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[must_use]
pub fn default_base_url(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAi => "https://api.openai.com/v1",
        ProviderKind::Anthropic => "https://api.anthropic.com",
        ProviderKind::Zhipu => "https://open.bigmodel.cn/api/paas/v4",
        ProviderKind::Volcengine => "https://ark.cn-beijing.volces.com/api/v3",
        ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
    }
}

#[must_use]
pub fn default_model(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAi => "gpt-3.5-turbo",
        ProviderKind::Anthropic => "claude-3-haiku-20240307",
        ProviderKind::Zhipu => "glm-4-flash",
        // Placeholder endpoint id; real use needs the account's own.
        ProviderKind::Volcengine => "ep-20241001000000-xxxxx",
        ProviderKind::Gemini => "models/gemini-pro",
    }
}

/// Stored base URL, or the vendor default when blank. No trailing slash.
#[must_use]
pub fn effective_base_url(config: &ProviderConfig) -> String {
    let raw = config.base_url.trim();
    let raw = if raw.is_empty() { default_base_url(config.provider) } else { raw };
    raw.trim_end_matches('/').to_string()
}

/// Stored model name, or the vendor default when blank.
#[must_use]
pub fn effective_model(config: &ProviderConfig) -> String {
    let raw = config.model_name.trim();
    if raw.is_empty() { default_model(config.provider).to_string() } else { raw.to_string() }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
