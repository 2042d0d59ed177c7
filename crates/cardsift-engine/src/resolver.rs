//! Maps an abstract action onto one concrete control.
//!
//! Tiers are tried in [`TIERS`] order and the first hit wins:
//!
//! 1. [`Tier::ExactLabel`]: the configured literal label, compared against
//!    the trimmed control label.
//! 2. [`Tier::Preference`]: the first control (in control order) whose
//!    lower-cased label contains any preference fragment for the action.
//! 3. [`Tier::Position`]: like/skip only, when exactly 2 or 3 controls are
//!    visible: index 0 likes, index 1 skips.

use cardsift_core::config::ButtonConfig;
use cardsift_core::event::{Action, Control};

/// One resolution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    ExactLabel,
    Preference,
    Position,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactLabel => "exact",
            Self::Preference => "preference",
            Self::Position => "position",
        }
    }
}

/// Evaluation order of the tiers.
pub const TIERS: [Tier; 3] = [Tier::ExactLabel, Tier::Preference, Tier::Position];

const HEARTS: &[&str] = &[
    "❤", "❤️", "♥", "💖", "💘", "💗", "💞", "💓", "💙", "💚", "💛", "🧡", "💜", "🖤", "🤍", "🤎",
];

const LIKE_PREFS: &[&str] = &["like", "invite", "match", "heart", "yes"];
const LIKE_PREFS_RU: &[&str] = &["да", "лайк", "приглас", "серд"];
const SKIP_PREFS: &[&str] = &[
    "skip", "next", "no", "pass", "👎", "далее", "пропуск", "нет", "след",
];
const SLEEP_PREFS: &[&str] = &["sleep", "pause", "zzz", "пауза", "сон"];

/// Built-in preference fragments for `action`.
pub fn builtin_preferences(action: Action) -> Vec<&'static str> {
    match action {
        Action::Like => LIKE_PREFS
            .iter()
            .chain(HEARTS)
            .chain(LIKE_PREFS_RU)
            .copied()
            .collect(),
        Action::Skip => SKIP_PREFS.to_vec(),
        Action::Sleep => SLEEP_PREFS.to_vec(),
    }
}

/// A chosen control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index into the control slice passed to [`ButtonResolver::resolve`].
    pub index: usize,
    pub tier: Tier,
}

/// Resolver configured with the per-action literal labels.
#[derive(Debug, Clone, Default)]
pub struct ButtonResolver {
    like: String,
    skip: String,
    sleep: String,
}

impl ButtonResolver {
    pub fn new(like: &str, skip: &str, sleep: &str) -> Self {
        Self {
            like: like.to_string(),
            skip: skip.to_string(),
            sleep: sleep.to_string(),
        }
    }

    pub fn from_config(cfg: &ButtonConfig) -> Self {
        Self::new(&cfg.like, &cfg.skip, &cfg.sleep)
    }

    /// Configured literal label for `action`, if set.
    pub fn literal(&self, action: Action) -> Option<&str> {
        let label = match action {
            Action::Like => &self.like,
            Action::Skip => &self.skip,
            Action::Sleep => &self.sleep,
        };
        (!label.is_empty()).then_some(label.as_str())
    }

    /// Lower-cased preference fragments: the literal label first, then the
    /// built-in list.
    pub fn preferences(&self, action: Action) -> Vec<String> {
        self.literal(action)
            .into_iter()
            .chain(builtin_preferences(action))
            .map(str::to_lowercase)
            .collect()
    }

    /// Pick a control for `action`, or `None` if no tier matches.
    pub fn resolve(&self, action: Action, controls: &[Control]) -> Option<Resolution> {
        TIERS.iter().find_map(|&tier| {
            self.try_tier(tier, action, controls)
                .map(|index| Resolution { index, tier })
        })
    }

    /// Evaluate a single tier in isolation.
    pub fn try_tier(&self, tier: Tier, action: Action, controls: &[Control]) -> Option<usize> {
        match tier {
            Tier::ExactLabel => {
                let literal = self.literal(action)?;
                controls.iter().position(|c| c.label.trim() == literal)
            }
            Tier::Preference => {
                let prefs = self.preferences(action);
                controls.iter().position(|c| {
                    let label = c.label.to_lowercase();
                    prefs.iter().any(|p| label.contains(p.as_str()))
                })
            }
            Tier::Position => match (action, controls.len()) {
                (Action::Like, 2 | 3) => Some(0),
                (Action::Skip, 2 | 3) => Some(1),
                _ => None,
            },
        }
    }
}
