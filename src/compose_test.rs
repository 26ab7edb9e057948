use super::*;

#[test]
fn prompt_without_hint_is_base() {
    assert_eq!(default_prompt(None), BASE_PROMPT);
    assert_eq!(default_prompt(Some("   ")), BASE_PROMPT);
}

#[test]
fn prompt_appends_hint() {
    let p = default_prompt(Some(" 秋天 "));
    assert!(p.starts_with(BASE_PROMPT));
    assert!(p.ends_with("Theme: 秋天."));
}

#[test]
fn two_lines_become_text_and_author() {
    let partial = split_generated("\n  \n星光不问赶路人\n— 佚名\n多余的一行").unwrap();
    assert_eq!(partial.text.as_deref(), Some("星光不问赶路人"));
    assert_eq!(partial.author.as_deref(), Some("— 佚名"));
    assert!(partial.date.is_none());
    assert!(partial.font_family.is_none());
}

#[test]
fn single_line_gets_fallback_author() {
    let partial = split_generated("风会记得").unwrap();
    assert_eq!(partial.author.as_deref(), Some(AI_AUTHOR_FALLBACK));
}

#[test]
fn crlf_lines_split_cleanly() {
    let partial = split_generated("一\r\n二\r\n").unwrap();
    assert_eq!(partial.text.as_deref(), Some("一"));
    assert_eq!(partial.author.as_deref(), Some("二"));
}

#[test]
fn blank_output_yields_nothing() {
    assert!(split_generated("").is_none());
    assert!(split_generated(" \n\t\n").is_none());
}
