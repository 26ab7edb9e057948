use std::sync::Mutex;

use super::*;
use crate::error::ErrorCode;
use crate::storage::MemoryStore;
use types::HttpReply;

/// Fake transport: records every request and answers with a canned reply.
struct CountingTransport {
    reply: Result<HttpReply, GenerationError>,
    seen: Mutex<Vec<ProviderRequest>>,
}

impl CountingTransport {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(HttpReply { status, body: body.into() }), seen: Mutex::new(Vec::new()) })
    }

    fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(GenerationError::TransportFailure(msg.into())), seen: Mutex::new(Vec::new()) })
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn last(&self) -> ProviderRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl HttpTransport for CountingTransport {
    async fn post_json(&self, request: &ProviderRequest) -> Result<HttpReply, GenerationError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

fn gateway_with(transport: &Arc<CountingTransport>, config: Option<ProviderConfig>) -> ProviderGateway<MemoryStore> {
    let mut gw = ProviderGateway::new(MemoryStore::new(), transport.clone());
    if let Some(config) = config {
        let kind = config.provider;
        gw.save(config).unwrap();
        gw.select(kind).unwrap();
    }
    gw
}

#[tokio::test]
async fn not_configured_makes_no_request() {
    let transport = CountingTransport::replying(200, "{}");
    let gw = gateway_with(&transport, None);

    assert_eq!(gw.generate("hi").await, Err(GenerationError::NotConfigured));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn selected_but_unsaved_is_not_configured() {
    let transport = CountingTransport::replying(200, "{}");
    let mut gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::OpenAi, "k")));
    gw.select(ProviderKind::Anthropic).unwrap();

    assert_eq!(gw.generate("hi").await, Err(GenerationError::NotConfigured));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn openai_defaults_scenario() {
    let transport =
        CountingTransport::replying(200, r#"{"choices":[{"message":{"role":"assistant","content":"山海皆可平"}}]}"#);
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::OpenAi, "sk-x")));

    let out = gw.generate("写一句").await.unwrap();
    assert_eq!(out.text, "山海皆可平");
    assert_eq!(transport.calls(), 1);

    let req = transport.last();
    assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(req.body["model"], "gpt-3.5-turbo");
}

#[tokio::test]
async fn unauthorized_maps_to_upstream_error() {
    let transport = CountingTransport::replying(401, "invalid key");
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::OpenAi, "bad")));

    let err = gw.generate("p").await.unwrap_err();
    assert_eq!(err, GenerationError::UpstreamError { vendor: "OpenAI", status: 401, body: "invalid key".into() });
    assert!(err.to_string().contains("invalid key"));
    assert_eq!(err.error_code(), "E_UPSTREAM");
    assert!(!err.retryable());
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let transport = CountingTransport::replying(503, "overloaded");
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::Anthropic, "k")));

    let err = gw.generate("p").await.unwrap_err();
    assert!(matches!(err, GenerationError::UpstreamError { vendor: "Anthropic", status: 503, .. }));
    assert!(err.retryable());
}

#[tokio::test]
async fn transport_failure_passes_through() {
    let transport = CountingTransport::failing("connection refused");
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::Gemini, "k")));

    let err = gw.generate("p").await.unwrap_err();
    assert_eq!(err, GenerationError::TransportFailure("connection refused".into()));
    assert!(err.to_string().contains("please try again"));
}

#[tokio::test]
async fn malformed_success_body_is_transport_failure() {
    let transport = CountingTransport::replying(200, "<!doctype html>");
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::Zhipu, "k")));

    assert!(matches!(gw.generate("p").await, Err(GenerationError::TransportFailure(_))));
}

#[tokio::test]
async fn any_2xx_counts_as_success() {
    let transport = CountingTransport::replying(201, r#"{"content":[{"type":"text","text":"ok"}]}"#);
    let gw = gateway_with(&transport, Some(ProviderConfig::new(ProviderKind::Anthropic, "k")));

    assert_eq!(gw.generate("p").await.unwrap().text, "ok");
}

#[tokio::test]
async fn config_survives_reload() {
    let transport = CountingTransport::replying(200, r#"{"choices":[]}"#);
    let mut cfg = ProviderConfig::new(ProviderKind::Volcengine, "vk");
    cfg.model_name = "ep-abc".into();
    let gw = gateway_with(&transport, Some(cfg.clone()));

    let reloaded = ProviderGateway::new(gw.into_store(), transport.clone());
    assert_eq!(reloaded.selected(), Some(&cfg));
    assert_eq!(reloaded.list_configured().count(), 1);

    reloaded.generate("p").await.unwrap();
    assert_eq!(transport.last().body["model"], "ep-abc");
}

