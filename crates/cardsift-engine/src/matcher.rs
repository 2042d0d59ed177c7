//! Literal keyword matching with a bounded negation lookback.
//!
//! Matching is substring based over normalized text. Negation is decided per
//! occurrence by looking at the [`NEGATION_WINDOW`] tokens that precede it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Number of tokens inspected before a keyword occurrence.
pub const NEGATION_WINDOW: usize = 3;

/// Tokens that negate a following keyword.
pub const NEGATION_WORDS: &[&str] = &[
    "no", "not", "never", "without", "dont", "don't", "doesnt", "doesn't", "wont", "won't",
    "не", "нет", "без", "никогда", "ни",
];

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z0-9']+|[а-яё]+").expect("word pattern is valid"));

static KEYWORD_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\n]+").expect("keyword separator pattern is valid"));

/// Ordered, deduplicated, lower-cased keyword list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    /// Build a list from configured entries.
    ///
    /// Each entry may hold several keywords separated by `,`, `;` or
    /// newlines. Blank pieces are dropped and the first occurrence wins.
    pub fn parse<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for entry in entries {
            for piece in KEYWORD_SPLIT_RE.split(entry.as_ref()) {
                let kw = piece.trim().to_lowercase();
                if kw.is_empty() {
                    continue;
                }
                if seen.insert(kw.clone()) {
                    out.push(kw);
                }
            }
        }
        Self(out)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A word-like span over normalized text. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// Collapse whitespace runs, trim, and lower-case.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keywords (in list order) that occur in `text` as literal substrings.
pub fn find_matches(text: &str, keywords: &KeywordList) -> Vec<String> {
    keywords
        .as_slice()
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .cloned()
        .collect()
}

/// Split `text` into ASCII-word and Cyrillic-word tokens, left to right.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_RE
        .find_iter(text)
        .map(|m| Token {
            word: m.as_str().to_lowercase(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

fn is_negation(word: &str) -> bool {
    NEGATION_WORDS.contains(&word)
}

/// Index of the first token overlapping an occurrence starting at `start`,
/// or of the first token after it when nothing overlaps.
fn first_token_at(tokens: &[Token], start: usize) -> Option<usize> {
    tokens.iter().position(|t| t.end > start)
}

/// Whether any occurrence of `keyword` in `text` is preceded, within
/// [`NEGATION_WINDOW`] tokens, by a negation word.
///
/// A single negated occurrence is enough, even if the keyword also appears
/// elsewhere without negation.
pub fn is_negated(text: &str, keyword: &str, tokens: &[Token]) -> bool {
    if keyword.is_empty() {
        return false;
    }
    text.match_indices(keyword).any(|(start, _)| {
        let Some(first) = first_token_at(tokens, start) else {
            return false;
        };
        let window_start = first.saturating_sub(NEGATION_WINDOW);
        tokens[window_start..first]
            .iter()
            .any(|t| is_negation(&t.word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negated(text: &str, keyword: &str) -> bool {
        let norm = normalize(text);
        let tokens = tokenize(&norm);
        is_negated(&norm, keyword, &tokens)
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Hello\n\t WORLD  "), "hello world");
        assert_eq!(normalize("Привет   МИР"), "привет мир");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_keyword_list_parse_splits_and_dedupes() {
        let list = KeywordList::parse(["Fitness, travel;BOOKS", "travel\n  ", " fitness "]);
        assert_eq!(list.as_slice(), &["fitness", "travel", "books"]);
    }

    #[test]
    fn test_keyword_list_parse_empty() {
        let list = KeywordList::parse(Vec::<String>::new());
        assert!(list.is_empty());
        let list = KeywordList::parse([" ,; "]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_find_matches_in_list_order_once() {
        let list = KeywordList::parse(["travel", "fitness", "cats"]);
        let hits = find_matches("fitness and travel, travel, travel", &list);
        assert_eq!(hits, vec!["travel", "fitness"]);
    }

    #[test]
    fn test_find_matches_is_substring_based() {
        let list = KeywordList::parse(["кур"]);
        assert_eq!(find_matches("не курит", &list), vec!["кур"]);
    }

    #[test]
    fn test_tokenize_two_classes() {
        let tokens = tokenize("don't курю2 ok!");
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["don't", "курю", "2", "ok"]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 5);
    }

    #[test]
    fn test_tokenize_classes_do_not_merge() {
        let tokens = tokenize("abcабв");
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["abc", "абв"]);
    }

    #[test]
    fn test_tokenize_byte_offsets_for_cyrillic() {
        let text = "не курит";
        let tokens = tokenize(text);
        assert_eq!(&text[tokens[1].start..tokens[1].end], "курит");
    }

    #[test]
    fn test_negation_cyrillic() {
        assert!(negated("Не курит", "курит"));
        assert!(negated("без вредных привычек, курит", "привычек"));
    }

    #[test]
    fn test_negation_english() {
        assert!(negated("I do not smoke", "smoke"));
        assert!(negated("never ever really smoke", "smoke"));
        assert!(!negated("I smoke", "smoke"));
    }

    #[test]
    fn test_negation_window_is_three_tokens() {
        assert!(negated("not a b smoke", "smoke"));
        assert!(!negated("not a b c smoke", "smoke"));
    }

    #[test]
    fn test_negation_clipped_at_text_start() {
        assert!(!negated("smoke", "smoke"));
        assert!(negated("no smoke", "smoke"));
    }

    #[test]
    fn test_negation_any_occurrence_suffices() {
        assert!(negated("I smoke a lot, just kidding I do not smoke", "smoke"));
    }

    #[test]
    fn test_negation_inside_word_occurrence() {
        // "курит" inside "накурится" starts in the middle of the token.
        assert!(negated("никогда не накурится", "курит"));
    }

    #[test]
    fn test_negation_multiword_keyword() {
        assert!(negated("not into heavy drinking", "heavy drinking"));
        assert!(!negated("into heavy drinking", "heavy drinking"));
    }

    #[test]
    fn test_negation_empty_keyword() {
        assert!(!negated("not anything", ""));
    }

    #[test]
    fn test_negation_punctuation_keyword_without_following_token() {
        // Nothing overlaps or follows the occurrence.
        assert!(!negated("not !!", "!!"));
    }
}
