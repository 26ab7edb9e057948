//! Generation prompt and how generated text lands on the card.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use crate::card::PartialCardState;

/// Attribution used when the vendor returns a single line.
pub const AI_AUTHOR_FALLBACK: &str = "— AI 生成";

const BASE_PROMPT: &str = "Generate a short, aesthetic, emotional or inspirational sentence in Chinese, max 20 words. \
     Optionally include a matching author name or 'Unknown'. \
     Return ONLY the sentence on the first line and the author on the second line.";

/// The copy prompt, with an optional theme hint appended.
#[must_use]
pub fn default_prompt(hint: Option<&str>) -> String {
    match hint.map(str::trim).filter(|h| !h.is_empty()) {
        Some(hint) => format!("{BASE_PROMPT} Theme: {hint}."),
        None => BASE_PROMPT.to_owned(),
    }
}

/// Turn generated text into a content update.
///
/// Blank lines are dropped; the first remaining line is the text, the
/// second the author. `None` when nothing is left.
#[must_use]
pub fn split_generated(generated: &str) -> Option<PartialCardState> {
    let mut lines = generated.lines().filter(|l| !l.trim().is_empty());
    let text = lines.next()?;
    let author = lines.next().unwrap_or(AI_AUTHOR_FALLBACK);
    Some(PartialCardState {
        text: Some(text.to_owned()),
        author: Some(author.to_owned()),
        ..PartialCardState::default()
    })
}
