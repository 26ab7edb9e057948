use super::*;
use crate::llm::types::ProviderKind;

#[test]
fn defaults_scenario_targets_openai_chat_completions() {
    let cfg = ProviderConfig::new(ProviderKind::OpenAi, "sk-test");
    let req = build_request(&cfg, "写一句关于秋天的文案").unwrap();

    assert_eq!(req.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(req.header("Authorization"), Some("Bearer sk-test"));
    assert_eq!(req.body["model"], "gpt-3.5-turbo");
    assert_eq!(req.body["max_tokens"], 500);
    assert_eq!(req.body["messages"][0]["role"], "system");
    assert_eq!(req.body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(req.body["messages"][1]["role"], "user");
    assert_eq!(req.body["messages"][1]["content"], "写一句关于秋天的文案");
}

#[test]
fn compatible_vendors_use_their_own_base() {
    let zhipu = build_request(&ProviderConfig::new(ProviderKind::Zhipu, "k"), "p").unwrap();
    assert_eq!(zhipu.url, "https://open.bigmodel.cn/api/paas/v4/chat/completions");
    assert_eq!(zhipu.body["model"], "glm-4-flash");

    let mut volc = ProviderConfig::new(ProviderKind::Volcengine, "k");
    volc.model_name = "ep-real-endpoint".into();
    let volc = build_request(&volc, "p").unwrap();
    assert_eq!(volc.url, "https://ark.cn-beijing.volces.com/api/v3/chat/completions");
    assert_eq!(volc.body["model"], "ep-real-endpoint");
    assert_eq!(volc.vendor, ProviderKind::Volcengine);
}

#[test]
fn parse_reads_first_choice() {
    let json = r#"{"choices":[{"message":{"role":"assistant","content":"风里有光"}},{"message":{"content":"x"}}]}"#;
    assert_eq!(parse_response(json).unwrap(), "风里有光");
}

#[test]
fn parse_missing_fields_yield_empty() {
    assert_eq!(parse_response(r#"{"choices":[]}"#).unwrap(), "");
    assert_eq!(parse_response("{}").unwrap(), "");
    assert_eq!(parse_response(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap(), "");
}

#[test]
fn parse_rejects_non_json() {
    let err = parse_response("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, GenerationError::TransportFailure(_)));
}
