use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Citation and editorial markers that survive text extraction:
    // [1], [a], [note 3], [citation needed], [update], [when?], ...
    static ref CITATION_RE: Regex = Regex::new(
        r"(?i)\[(?:\d+|[a-z]|note \d+|citation needed|clarification needed|update|according to whom\?|when\?|who\?|which\?)\]"
    ).unwrap();

    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    static ref SPACE_BEFORE_PUNCT_RE: Regex = Regex::new(r"\s+([.,!?;:])").unwrap();
}

const ELLIPSIS: char = '…';

/// Normalizes raw text pulled out of article HTML: drops citation markers,
/// collapses whitespace runs to single spaces, and removes stray spaces
/// left in front of punctuation.
pub fn clean_text(text: &str) -> String {
    let stripped = CITATION_RE.replace_all(text, "");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let tidy = SPACE_BEFORE_PUNCT_RE.replace_all(&collapsed, "$1");
    tidy.trim().to_string()
}

/// Cleans `raw_text` and truncates it to the last sentence boundary at or
/// before `max_chars` (counted in chars, so multi-byte text never splits).
/// When no sentence ends within the bound the text is cut hard at
/// `max_chars` and an ellipsis appended. Deterministic and total: empty or
/// whitespace-only input yields an empty string.
pub fn summarize(raw_text: &str, max_chars: usize) -> String {
    let text = clean_text(raw_text);
    if text.is_empty() {
        return text;
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text;
    }

    // A sentence ends at '.', '!' or '?' followed by whitespace or
    // end-of-text. Track the last such end inside the bound.
    let mut sentence_end = None;
    for (i, c) in chars.iter().copied().enumerate().take(max_chars) {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.get(i + 1).map_or(true, |next| next.is_whitespace());
            if at_boundary {
                sentence_end = Some(i + 1);
            }
        }
    }

    match sentence_end {
        Some(end) => chars[..end].iter().collect(),
        None => {
            let cut: String = chars[..max_chars].iter().collect();
            format!("{}{}", cut.trim_end(), ELLIPSIS)
        }
    }
}
