//! # cardsift-engine
//!
//! The profile decision-and-correlation engine:
//! - `matcher`: normalization, literal keyword matching, negation lookback
//! - `decision`: length/exclude/include rules producing a [`Decision`]
//! - `correlation`: pairs profile text with its controls across events
//! - `resolver`: maps an [`Action`](cardsift_core::event::Action) onto one visible control

pub mod correlation;
pub mod decision;
pub mod matcher;
pub mod resolver;

pub use correlation::{ControlSource, Correlator, Step};
pub use decision::{Decision, DecisionEngine, Reason};
pub use matcher::KeywordList;
pub use resolver::{ButtonResolver, Resolution, Tier};
