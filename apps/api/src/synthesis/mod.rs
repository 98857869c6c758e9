//! Résumé preview synthesis from accumulated interview state.

pub mod preview;
pub mod prompts;
pub mod synthesizer;
