//! # cardsift-core
//!
//! Core types, traits, configuration, and error handling for cardsift.

pub mod config;
pub mod error;
pub mod event;
pub mod traits;

pub use config::shellexpand;
