//! The conversation-driven profiling engine: phase state machine, lexical
//! scoring, follow-up strategy, and question selection.

pub mod engine;
pub mod extract;
pub mod handlers;
pub mod phase;
pub mod questions;
pub mod scores;
pub mod signals;
pub mod strategy;
