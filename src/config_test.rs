use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = AppConfig::from_lookup(|_| None);
    assert_eq!(cfg.store_path, PathBuf::from("moodcard-store.json"));
    assert_eq!(cfg.card_path, PathBuf::from("moodcard-card.json"));
    assert_eq!(cfg.quote_url, "https://v1.hitokoto.cn");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 120, connect_secs: 10 });
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn overrides_are_read() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        ("MOODCARD_STORE_PATH", "/tmp/s.json"),
        ("MOODCARD_CARD_PATH", "/tmp/c.json"),
        ("MOODCARD_QUOTE_URL", "http://localhost:9000"),
        ("MOODCARD_REQUEST_TIMEOUT_SECS", "42"),
        ("MOODCARD_CONNECT_TIMEOUT_SECS", " 7 "),
    ]));
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/s.json"));
    assert_eq!(cfg.card_path, PathBuf::from("/tmp/c.json"));
    assert_eq!(cfg.quote_url, "http://localhost:9000");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn bad_or_blank_values_fall_back() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        ("MOODCARD_STORE_PATH", "  "),
        ("MOODCARD_REQUEST_TIMEOUT_SECS", "soon"),
        ("MOODCARD_CONNECT_TIMEOUT_SECS", "-1"),
    ]));
    assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    assert_eq!(cfg.timeouts, Timeouts::default());
}
