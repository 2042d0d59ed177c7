//! # cardsift-channels
//!
//! Messaging transports for cardsift.

pub mod telegram;
