//! Like/skip classification of profile text.

use crate::matcher::{find_matches, is_negated, normalize, tokenize, KeywordList};
use cardsift_core::config::{FilterConfig, IncludeMode};
use cardsift_core::event::Action;
use std::collections::HashSet;
use std::fmt;

/// How many exclude keywords the human-readable reason lists.
const REASON_EXCLUDE_LIMIT: usize = 5;

/// Why a decision was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Normalized text is below the minimum length.
    TooShort,
    /// Non-negated exclude keywords were found.
    Exclude(Vec<String>),
    /// The include rule passed.
    IncludeMatch,
    /// An include list is configured and its rule failed.
    NoInclude,
    /// No include list is configured.
    NoIncludes,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("too_short"),
            Self::Exclude(keywords) => {
                let shown: Vec<&str> = keywords
                    .iter()
                    .take(REASON_EXCLUDE_LIMIT)
                    .map(String::as_str)
                    .collect();
                write!(f, "exclude:{}", shown.join(","))
            }
            Self::IncludeMatch => f.write_str("include_match"),
            Self::NoInclude => f.write_str("no_include"),
            Self::NoIncludes => f.write_str("no_includes"),
        }
    }
}

/// Outcome of classifying one profile text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub reason: Reason,
    pub matched_include: Vec<String>,
    pub matched_exclude: Vec<String>,
}

impl Decision {
    fn new(
        action: Action,
        reason: Reason,
        matched_include: Vec<String>,
        matched_exclude: Vec<String>,
    ) -> Self {
        Self {
            action,
            reason,
            matched_include,
            matched_exclude,
        }
    }
}

/// Stateless classifier over fixed keyword rules.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    include: KeywordList,
    exclude: KeywordList,
    mode: IncludeMode,
    min_text_len: usize,
}

impl DecisionEngine {
    pub fn new(
        include: KeywordList,
        exclude: KeywordList,
        mode: IncludeMode,
        min_text_len: usize,
    ) -> Self {
        Self {
            include,
            exclude,
            mode,
            min_text_len,
        }
    }

    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self::new(
            KeywordList::parse(&cfg.include_keywords),
            KeywordList::parse(&cfg.exclude_keywords),
            cfg.include_mode,
            cfg.min_text_len,
        )
    }

    pub fn include(&self) -> &KeywordList {
        &self.include
    }

    pub fn exclude(&self) -> &KeywordList {
        &self.exclude
    }

    pub fn mode(&self) -> IncludeMode {
        self.mode
    }

    pub fn min_text_len(&self) -> usize {
        self.min_text_len
    }

    /// Classify `text`. Never fails.
    ///
    /// Rules apply in order: length gate, exclude (minus negated
    /// occurrences), include. Exclude always wins over include.
    pub fn decide(&self, text: &str) -> Decision {
        let normalized = normalize(text);
        if self.min_text_len > 0 && normalized.chars().count() < self.min_text_len {
            return Decision::new(Action::Skip, Reason::TooShort, Vec::new(), Vec::new());
        }

        let matched_exclude = find_matches(&normalized, &self.exclude);
        if !matched_exclude.is_empty() {
            let tokens = tokenize(&normalized);
            let active: Vec<String> = matched_exclude
                .iter()
                .filter(|kw| !is_negated(&normalized, kw, &tokens))
                .cloned()
                .collect();
            if !active.is_empty() {
                return Decision::new(
                    Action::Skip,
                    Reason::Exclude(active.clone()),
                    Vec::new(),
                    active,
                );
            }
        }

        if self.include.is_empty() {
            return Decision::new(Action::Like, Reason::NoIncludes, Vec::new(), matched_exclude);
        }

        let matched_include = find_matches(&normalized, &self.include);
        let passed = match self.mode {
            IncludeMode::All => {
                let distinct: HashSet<&String> = matched_include.iter().collect();
                distinct.len() == self.include.len()
            }
            IncludeMode::Any => !matched_include.is_empty(),
        };

        if passed {
            Decision::new(
                Action::Like,
                Reason::IncludeMatch,
                matched_include,
                matched_exclude,
            )
        } else {
            Decision::new(
                Action::Skip,
                Reason::NoInclude,
                matched_include,
                matched_exclude,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(include: &[&str], exclude: &[&str], mode: IncludeMode, min: usize) -> DecisionEngine {
        DecisionEngine::new(
            KeywordList::parse(include),
            KeywordList::parse(exclude),
            mode,
            min,
        )
    }

    #[test]
    fn test_too_short_ignores_keywords() {
        let e = engine(&["travel"], &["smoke"], IncludeMode::Any, 20);
        for text in ["", "   ", "travel", "smoke travel", "  short   text  "] {
            let d = e.decide(text);
            assert_eq!(d.action, Action::Skip, "text: {text:?}");
            assert_eq!(d.reason, Reason::TooShort);
            assert!(d.matched_include.is_empty());
            assert!(d.matched_exclude.is_empty());
        }
    }

    #[test]
    fn test_length_counts_normalized_chars() {
        // 10 Cyrillic chars are 20 bytes; whitespace collapses.
        let e = engine(&[], &[], IncludeMode::Any, 11);
        assert_eq!(e.decide("привет    мир!").reason, Reason::NoIncludes);
        assert_eq!(e.decide("привет мир").reason, Reason::TooShort);
    }

    #[test]
    fn test_zero_min_len_disables_gate() {
        let e = engine(&[], &[], IncludeMode::Any, 0);
        let d = e.decide("");
        assert_eq!(d.action, Action::Like);
        assert_eq!(d.reason, Reason::NoIncludes);
    }

    #[test]
    fn test_negated_exclude_does_not_skip() {
        let e = engine(&[], &["курит"], IncludeMode::Any, 0);
        let d = e.decide("Не курит, люблю горы");
        assert_eq!(d.action, Action::Like);
        assert_eq!(d.reason, Reason::NoIncludes);
        // Full exclude match list is kept for audit.
        assert_eq!(d.matched_exclude, vec!["курит"]);
    }

    #[test]
    fn test_exclude_skips_with_reason_prefix() {
        let e = engine(&["travel"], &["smoke"], IncludeMode::Any, 0);
        let d = e.decide("I smoke and travel");
        assert_eq!(d.action, Action::Skip);
        assert_eq!(d.reason.to_string(), "exclude:smoke");
        assert!(d.matched_include.is_empty());
        assert_eq!(d.matched_exclude, vec!["smoke"]);
    }

    #[test]
    fn test_exclude_reason_truncated_list_not() {
        let kws = ["a1", "b2", "c3", "d4", "e5", "f6"];
        let e = engine(&[], &kws, IncludeMode::Any, 0);
        let d = e.decide("a1 b2 c3 d4 e5 f6");
        assert_eq!(d.reason.to_string(), "exclude:a1,b2,c3,d4,e5");
        assert_eq!(d.matched_exclude.len(), 6);
    }

    #[test]
    fn test_only_active_excludes_reported() {
        let e = engine(&[], &["smoke", "drink"], IncludeMode::Any, 0);
        let d = e.decide("I do not smoke but I really like to drink");
        assert_eq!(d.reason, Reason::Exclude(vec!["drink".to_string()]));
        assert_eq!(d.matched_exclude, vec!["drink"]);
    }

    #[test]
    fn test_include_all_mode() {
        let e = engine(&["fitness", "travel"], &[], IncludeMode::All, 0);
        let d = e.decide("I love fitness");
        assert_eq!(d.action, Action::Skip);
        assert_eq!(d.reason.to_string(), "no_include");
        assert_eq!(d.matched_include, vec!["fitness"]);

        let d = e.decide("Fitness and TRAVEL every week");
        assert_eq!(d.action, Action::Like);
        assert_eq!(d.reason.to_string(), "include_match");
        assert_eq!(d.matched_include, vec!["fitness", "travel"]);
    }

    #[test]
    fn test_include_any_mode() {
        let e = engine(&["fitness", "travel"], &[], IncludeMode::Any, 0);
        assert_eq!(e.decide("travel a lot").action, Action::Like);
        let d = e.decide("books only");
        assert_eq!(d.action, Action::Skip);
        assert_eq!(d.reason, Reason::NoInclude);
        assert!(d.matched_include.is_empty());
    }

    #[test]
    fn test_include_match_keeps_full_exclude_list() {
        let e = engine(&["travel"], &["smoke"], IncludeMode::Any, 0);
        let d = e.decide("never smoke, travel often");
        assert_eq!(d.action, Action::Like);
        assert_eq!(d.reason, Reason::IncludeMatch);
        assert_eq!(d.matched_exclude, vec!["smoke"]);
    }

    #[test]
    fn test_exclude_precedes_include() {
        let e = engine(&["travel"], &["travel agent"], IncludeMode::Any, 0);
        let d = e.decide("I am a travel agent");
        assert_eq!(d.action, Action::Skip);
        assert!(d.reason.to_string().starts_with("exclude:"));
    }

    #[test]
    fn test_from_config() {
        let cfg = FilterConfig {
            include_keywords: vec!["Travel, Books".to_string()],
            exclude_keywords: vec!["smoke".to_string()],
            include_mode: IncludeMode::All,
            min_text_len: 5,
        };
        let e = DecisionEngine::from_config(&cfg);
        assert_eq!(e.include().as_slice(), &["travel", "books"]);
        assert_eq!(e.exclude().as_slice(), &["smoke"]);
        assert_eq!(e.mode(), IncludeMode::All);
        assert_eq!(e.min_text_len(), 5);
    }
}
