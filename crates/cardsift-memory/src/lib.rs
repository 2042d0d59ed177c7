//! # cardsift-memory
//!
//! Persistent decision log for cardsift (SQLite-backed).

pub mod store;

pub use store::{DecisionCounts, DecisionRow, Store};
