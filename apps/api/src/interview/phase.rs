//! Interview phases — the fixed forward-only order the conversation moves through.
//!
//! Transitions are a pure function of `(phase, questions answered in phase)`.
//! Nothing else may trigger a transition, and no phase is ever revisited.

use serde::{Deserialize, Serialize};

/// The six interview phases in strict forward order. `Generation` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Introduction,
    Profiling,
    DeepDive,
    Specialization,
    Synthesis,
    Generation,
}

impl Phase {
    /// Number of answered questions that completes this phase.
    pub fn question_threshold(self) -> u32 {
        match self {
            Phase::Introduction => 2,
            Phase::Profiling => 6,
            Phase::DeepDive => 5,
            Phase::Specialization => 4,
            Phase::Synthesis => 2,
            // Terminal — never advances, threshold unreachable
            Phase::Generation => u32::MAX,
        }
    }

    /// Fixed progress lookup keyed by phase. Deliberately not a continuous
    /// function of turn count so progress stays monotone and phase-aligned.
    pub fn progress_percentage(self) -> u32 {
        match self {
            Phase::Introduction => 10,
            Phase::Profiling => 25,
            Phase::DeepDive => 50,
            Phase::Specialization => 75,
            Phase::Synthesis => 90,
            Phase::Generation => 100,
        }
    }

    pub fn next(self) -> Phase {
        match self {
            Phase::Introduction => Phase::Profiling,
            Phase::Profiling => Phase::DeepDive,
            Phase::DeepDive => Phase::Specialization,
            Phase::Specialization => Phase::Synthesis,
            Phase::Synthesis => Phase::Generation,
            Phase::Generation => Phase::Generation,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Generation
    }

    /// Phases whose answers count as achievement stories for synthesis.
    pub fn is_story_phase(self) -> bool {
        matches!(self, Phase::DeepDive | Phase::Specialization)
    }
}

/// Pure transition rule: advance exactly one phase once the per-phase counter
/// reaches the threshold, otherwise stay put.
pub fn transition(phase: Phase, question_count_in_phase: u32) -> Phase {
    if question_count_in_phase >= phase.question_threshold() {
        phase.next()
    } else {
        phase
    }
}
