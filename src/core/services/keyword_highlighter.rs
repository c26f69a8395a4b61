use regex::{NoExpand, RegexBuilder};

use crate::core::models::SearchQuery;
use crate::global_constants;

/// Compiled-size budget per keyword byte. Case-insensitive literals expand
/// every letter into a small class, so long keywords outgrow the default
/// limits of the `regex` crate.
const PATTERN_BYTES_PER_KEYWORD_BYTE: usize = 512;
const MIN_PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Result of searching a text for a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOutcome {
    /// The text with every match wrapped in the highlight marker.
    Highlighted(String),
    NotFound,
}

impl HighlightOutcome {
    pub fn into_display_text(self) -> String {
        match self {
            HighlightOutcome::Highlighted(text) => text,
            HighlightOutcome::NotFound => global_constants::MESSAGE_KEYWORD_NOT_FOUND.to_string(),
        }
    }
}

/// Wraps every case-insensitive occurrence of `keyword` in `text` with the
/// highlight marker.
///
/// The keyword is matched literally. Each occurrence is replaced by the
/// keyword exactly as the caller typed it, so `("Hello World", "world")`
/// becomes `"Hello **world**"`. Callers skip the search for an empty keyword;
/// if one arrives anyway it is reported as not found.
pub fn highlight(text: &str, keyword: &str) -> HighlightOutcome {
    if keyword.is_empty() {
        log::warn!("[HIGHLIGHTER] Called with an empty keyword, nothing to search for");
        return HighlightOutcome::NotFound;
    }

    let replacement = format!(
        "{marker}{keyword}{marker}",
        marker = global_constants::HIGHLIGHT_MARKER,
        keyword = keyword
    );

    let size_limit = keyword
        .len()
        .saturating_mul(PATTERN_BYTES_PER_KEYWORD_BYTE)
        .max(MIN_PATTERN_SIZE_LIMIT);

    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .size_limit(size_limit)
        .dfa_size_limit(size_limit)
        .build()
    {
        Ok(pattern) => pattern,
        Err(error) => {
            log::warn!(
                "[HIGHLIGHTER] Could not build pattern for {}-byte keyword, scanning literally: {}",
                keyword.len(),
                error
            );
            return highlight_by_scanning(text, keyword, &replacement);
        }
    };

    let match_count = pattern.find_iter(text).count();
    if match_count == 0 {
        log::debug!("[HIGHLIGHTER] Keyword not found");
        return HighlightOutcome::NotFound;
    }

    log::debug!("[HIGHLIGHTER] Highlighting {} occurrence(s)", match_count);

    HighlightOutcome::Highlighted(pattern.replace_all(text, NoExpand(&replacement)).into_owned())
}

fn highlight_by_scanning(text: &str, keyword: &str, replacement: &str) -> HighlightOutcome {
    let keyword_chars: Vec<char> = keyword.chars().collect();
    let mut highlighted = String::with_capacity(text.len());
    let mut copied_up_to = 0;
    let mut position = 0;
    let mut match_count = 0;

    while position < text.len() {
        match match_length_at(&text[position..], &keyword_chars) {
            Some(length) => {
                highlighted.push_str(&text[copied_up_to..position]);
                highlighted.push_str(replacement);
                position += length;
                copied_up_to = position;
                match_count += 1;
            }
            None => {
                position += text[position..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
            }
        }
    }

    if match_count == 0 {
        return HighlightOutcome::NotFound;
    }

    log::debug!("[HIGHLIGHTER] Highlighting {} occurrence(s)", match_count);
    highlighted.push_str(&text[copied_up_to..]);
    HighlightOutcome::Highlighted(highlighted)
}

/// Byte length of the case-insensitive match of `keyword` at the start of
/// `haystack`, if there is one.
fn match_length_at(haystack: &str, keyword: &[char]) -> Option<usize> {
    let mut haystack_chars = haystack.char_indices();

    for expected in keyword {
        let (_, actual) = haystack_chars.next()?;
        if actual != *expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }

    Some(
        haystack_chars
            .next()
            .map(|(index, _)| index)
            .unwrap_or(haystack.len()),
    )
}

pub fn highlight_query(query: &SearchQuery) -> HighlightOutcome {
    highlight(query.text(), query.keyword())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_match_using_typed_casing() {
        let outcome = highlight("Hello World", "world");

        assert_eq!(outcome, HighlightOutcome::Highlighted("Hello **world**".to_string()));
    }

    #[test]
    fn test_highlight_replaces_every_occurrence_regardless_of_source_casing() {
        let outcome = highlight("Rust, RUST and rust", "Rust");

        assert_eq!(
            outcome,
            HighlightOutcome::Highlighted("**Rust**, **Rust** and **Rust**".to_string())
        );
    }

    #[test]
    fn test_highlight_reports_not_found() {
        let outcome = highlight("abc", "xyz");

        assert_eq!(outcome, HighlightOutcome::NotFound);
        assert_eq!(outcome.into_display_text(), "Keyword not found in the text.");
    }

    #[test]
    fn test_highlight_treats_dot_literally() {
        let outcome = highlight("3.14 is pi", ".");

        assert_eq!(outcome, HighlightOutcome::Highlighted("3**.**14 is pi".to_string()));
    }

    #[test]
    fn test_highlight_treats_star_literally() {
        assert_eq!(highlight("no stars here", "*"), HighlightOutcome::NotFound);
        assert_eq!(
            highlight("a*b", "*"),
            HighlightOutcome::Highlighted("a*****b".to_string())
        );
    }

    #[test]
    fn test_highlight_does_not_expand_dollar_in_replacement() {
        let outcome = highlight("costs $1 today", "$1");

        assert_eq!(
            outcome,
            HighlightOutcome::Highlighted("costs **$1** today".to_string())
        );
    }

    #[test]
    fn test_highlight_matches_devanagari_keyword() {
        let outcome = highlight("नमस्ते दुनिया", "दुनिया");

        assert_eq!(
            outcome,
            HighlightOutcome::Highlighted("नमस्ते **दुनिया**".to_string())
        );
    }

    #[test]
    fn test_highlight_on_empty_text_is_not_found() {
        assert_eq!(highlight("", "test"), HighlightOutcome::NotFound);
    }

    #[test]
    fn test_highlight_with_empty_keyword_is_not_found() {
        assert_eq!(highlight("anything", ""), HighlightOutcome::NotFound);
    }

    #[test]
    fn test_highlight_leaves_query_text_untouched() {
        let query = SearchQuery::new("Hello World", "WORLD");

        let outcome = highlight_query(&query);

        assert_eq!(query.text(), "Hello World");
        assert_eq!(outcome.into_display_text(), "Hello **WORLD**");
    }

    #[test]
    fn test_highlight_finds_very_long_keyword() {
        let keyword = "ab".repeat(200_000);
        let text = format!("start {} end", keyword.to_uppercase());

        let outcome = highlight(&text, &keyword);

        assert_eq!(
            outcome,
            HighlightOutcome::Highlighted(format!("start **{}** end", keyword))
        );
    }

    #[test]
    fn test_scanning_matches_regex_behaviour() {
        let replacement = "**world**";

        assert_eq!(
            highlight_by_scanning("Hello WORLD, hello World", "world", replacement),
            HighlightOutcome::Highlighted("Hello **world**, hello **world**".to_string())
        );
        assert_eq!(
            highlight_by_scanning("नमस्ते दुनिया", "दुनिया", "**दुनिया**"),
            HighlightOutcome::Highlighted("नमस्ते **दुनिया**".to_string())
        );
        assert_eq!(
            highlight_by_scanning("abc", "xyz", "**xyz**"),
            HighlightOutcome::NotFound
        );
    }
}
